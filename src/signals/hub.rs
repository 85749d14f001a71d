//! # In-process signal hub.
//!
//! [`SignalHub`] is a thin wrapper around [`tokio::sync::broadcast`] that lets a
//! process (or a test) trigger registrations without touching OS signal state.
//!
//! ```text
//!   SignalHub::deliver(kind) ──► broadcast ──┬──► HubReceiver ──► registration 1
//!                                            └──► HubReceiver ──► registration N
//! ```
//!
//! ## Rules
//! - **Fan-out**: every receiver observes every delivery made after it subscribed.
//! - **Non-blocking**: `deliver()` never blocks.
//! - **No persistence**: deliveries with no receivers are dropped.
//! - **Lag**: a lagging receiver skips older deliveries and reports the next one.

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{SignalKind, SignalSource};

/// Broadcast hub for in-process signal delivery.
///
/// Cheap to clone (internally holds an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct SignalHub {
    tx: broadcast::Sender<SignalKind>,
}

impl SignalHub {
    /// Creates a new hub with the given channel capacity (clamped to at least 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Delivers a signal to every current receiver.
    ///
    /// Returns how many receivers were reached.
    pub fn deliver(&self, kind: SignalKind) -> usize {
        self.tx.send(kind).unwrap_or(0)
    }

    /// Creates a new independent receiver for subsequent deliveries.
    pub fn subscribe(&self) -> HubReceiver {
        HubReceiver {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live receivers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SignalHub {
    fn default() -> Self {
        Self::new(crate::Config::default().hub_capacity_clamped())
    }
}

/// One subscription to a [`SignalHub`].
#[derive(Debug)]
pub struct HubReceiver {
    rx: broadcast::Receiver<SignalKind>,
}

#[async_trait]
impl SignalSource for HubReceiver {
    async fn recv(&mut self) -> Option<SignalKind> {
        loop {
            match self.rx.recv().await {
                Ok(kind) => return Some(kind),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivery_fans_out_to_every_receiver() {
        let hub = SignalHub::new(4);
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        assert_eq!(hub.deliver(SignalKind::Terminate), 2);
        assert_eq!(a.recv().await, Some(SignalKind::Terminate));
        assert_eq!(b.recv().await, Some(SignalKind::Terminate));
    }

    #[tokio::test]
    async fn delivery_without_receivers_is_dropped() {
        let hub = SignalHub::new(1);
        assert_eq!(hub.deliver(SignalKind::Interrupt), 0);

        let mut late = hub.subscribe();
        hub.deliver(SignalKind::Terminate);
        assert_eq!(late.recv().await, Some(SignalKind::Terminate));
    }

    #[tokio::test]
    async fn dropped_hub_closes_receivers() {
        let hub = SignalHub::new(1);
        let mut rx = hub.subscribe();
        drop(hub);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn lagging_receiver_still_sees_latest() {
        let hub = SignalHub::new(1);
        let mut rx = hub.subscribe();
        hub.deliver(SignalKind::Interrupt);
        hub.deliver(SignalKind::Terminate);
        assert_eq!(rx.recv().await, Some(SignalKind::Terminate));
    }
}
