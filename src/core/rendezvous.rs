//! # Completion rendezvous.
//!
//! A single-use, single-value handoff from a registration's task to the waiting
//! side of the program, built on [`tokio::sync::oneshot`].
//!
//! ```text
//!   rendezvous() ──► (Notifier, Completion)
//!                        │          │
//!        Closer::register┘          └──► main: completion.wait_with(&cfg).await
//!                        │                      ├─ Ok(Report)              → exit
//!   signal ─► chain ─► publish(Report) ─────────┤
//!                                               └─ Err(DeadlineExceeded)   → raise(escalate)
//! ```
//!
//! ## Rules
//! - The notifier is written at most once; the registration consumes it.
//! - Waiting is cancel-safe: a deadline race leaves the completion usable.
//! - Once received, the report is cached; later waits return it again.
//! - If the notifier is dropped unpublished, waiting yields [`CloserError::Abandoned`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::warn;

use crate::chain::ChainReport;
use crate::config::Config;
use crate::error::CloserError;
use crate::signals::{self, SignalKind};

/// What a registration hands back once its chain has run.
#[derive(Debug, Clone)]
pub struct Report {
    /// Always `true`: a report is only ever published after the chain finished.
    pub done: bool,
    /// Registration label.
    pub registration: Arc<str>,
    /// The signal that fired the registration.
    pub signal: SignalKind,
    /// Per-action results.
    pub chain: ChainReport,
}

/// Creates a connected notifier/completion pair.
pub fn rendezvous() -> (Notifier, Completion) {
    let (tx, rx) = oneshot::channel();
    (
        Notifier { tx },
        Completion {
            slot: Slot::Pending(rx),
        },
    )
}

/// Write half, consumed by a registration.
#[derive(Debug)]
pub struct Notifier {
    tx: oneshot::Sender<Report>,
}

impl Notifier {
    /// Publishes the report; hands it back if the waiting side is gone.
    pub(crate) fn publish(self, report: Report) -> Result<(), Report> {
        self.tx.send(report)
    }

    /// True if the [`Completion`] has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Debug)]
enum Slot {
    Pending(oneshot::Receiver<Report>),
    Received(Report),
    Abandoned,
}

/// Read half, kept by the caller.
#[derive(Debug)]
pub struct Completion {
    slot: Slot,
}

impl Completion {
    /// Waits until the registration publishes its report.
    pub async fn wait(&mut self) -> Result<Report, CloserError> {
        let rx = match &mut self.slot {
            Slot::Received(report) => return Ok(report.clone()),
            Slot::Abandoned => return Err(CloserError::Abandoned),
            Slot::Pending(rx) => rx,
        };

        match rx.await {
            Ok(report) => {
                self.slot = Slot::Received(report.clone());
                Ok(report)
            }
            Err(_) => {
                self.slot = Slot::Abandoned;
                Err(CloserError::Abandoned)
            }
        }
    }

    /// Waits at most `deadline`.
    ///
    /// On timeout returns [`CloserError::DeadlineExceeded`]; the completion stays
    /// usable and a later report is still delivered.
    pub async fn wait_timeout(&mut self, deadline: Duration) -> Result<Report, CloserError> {
        match tokio::time::timeout(deadline, self.wait()).await {
            Ok(res) => res,
            Err(_) => Err(CloserError::DeadlineExceeded { deadline }),
        }
    }

    /// Waits at most `deadline`, then self-delivers `escalate`.
    ///
    /// When OS listeners are installed in this process, an interceptable `escalate`
    /// is delivered as [`SignalKind::Kill`] instead.
    ///
    /// Still returns [`CloserError::DeadlineExceeded`] after a successful escalation so
    /// the caller can decide whether to wait again.
    pub async fn wait_or_escalate(
        &mut self,
        deadline: Duration,
        escalate: SignalKind,
    ) -> Result<Report, CloserError> {
        match self.wait_timeout(deadline).await {
            Err(err) if err.is_deadline() => {
                let signal = signals::escalation_signal(escalate);
                warn!(?deadline, requested = %escalate, %signal, "cleanup still running; escalating");
                signals::raise(signal)?;
                Err(err)
            }
            other => other,
        }
    }

    /// Waits according to `cfg.grace` and `cfg.escalate`.
    pub async fn wait_with(&mut self, cfg: &Config) -> Result<Report, CloserError> {
        match (cfg.grace_limit(), cfg.escalate) {
            (None, _) => self.wait().await,
            (Some(deadline), Some(signal)) => self.wait_or_escalate(deadline, signal).await,
            (Some(deadline), None) => self.wait_timeout(deadline).await,
        }
    }

    /// Returns the report if it has already been published.
    pub fn try_wait(&mut self) -> Option<Report> {
        let rx = match &mut self.slot {
            Slot::Received(report) => return Some(report.clone()),
            Slot::Abandoned => return None,
            Slot::Pending(rx) => rx,
        };

        match rx.try_recv() {
            Ok(report) => {
                self.slot = Slot::Received(report.clone());
                Some(report)
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.slot = Slot::Abandoned;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> Report {
        Report {
            done: true,
            registration: "test".into(),
            signal: SignalKind::Interrupt,
            chain: ChainReport::default(),
        }
    }

    #[tokio::test]
    async fn published_report_is_received_and_cached() {
        let (tx, mut rx) = rendezvous();
        assert!(rx.try_wait().is_none());
        tx.publish(report()).unwrap();

        let first = rx.wait().await.unwrap();
        assert!(first.done);
        assert_eq!(first.signal, SignalKind::Interrupt);
        let again = rx.wait().await.unwrap();
        assert_eq!(&*again.registration, "test");
        assert!(rx.try_wait().is_some());
    }

    #[tokio::test]
    async fn deadline_without_publish_is_not_a_completion() {
        let (tx, mut rx) = rendezvous();
        let err = rx.wait_timeout(Duration::from_millis(20)).await.unwrap_err();
        assert!(err.is_deadline());

        // still usable after losing the race
        tx.publish(report()).unwrap();
        assert!(rx.wait_timeout(Duration::from_secs(1)).await.is_ok());
    }

    #[tokio::test]
    async fn dropped_notifier_abandons() {
        let (tx, mut rx) = rendezvous();
        drop(tx);
        assert!(matches!(rx.wait().await, Err(CloserError::Abandoned)));
        assert!(matches!(rx.wait().await, Err(CloserError::Abandoned)));
        assert!(rx.try_wait().is_none());
    }

    #[tokio::test]
    async fn publish_to_dropped_completion_hands_report_back() {
        let (tx, rx) = rendezvous();
        drop(rx);
        assert!(tx.is_closed());
        assert!(tx.publish(report()).is_err());
    }

    #[tokio::test]
    async fn wait_with_without_escalation_only_times_out() {
        let (_tx, mut rx) = rendezvous();
        let cfg = Config {
            grace: Duration::from_millis(10),
            escalate: None,
            ..Config::default()
        };
        let err = rx.wait_with(&cfg).await.unwrap_err();
        assert_eq!(err.as_label(), "closer_deadline_exceeded");
    }
}
