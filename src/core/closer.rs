//! # Closer: binds a chain and a completion to the monitored signals.
//!
//! ## Key responsibilities
//! - install signal listeners before returning, so the registration is armed on return
//! - spawn exactly one listening task per registration
//! - run the chain once, off the async workers, and publish one [`Report`]
//!
//! ## Registration task
//! ```text
//! register(done, chain)
//!   ├─► OsSignals::install()                 (or any SignalSource via register_with)
//!   ├─► publish Armed
//!   └─► tokio::spawn(listen):
//!          ├─► source.recv().await            Armed
//!          ├─► drop(source)                   Fired  (no further signals observed)
//!          ├─► spawn_blocking(chain.run)      actions in order, failures recorded
//!          └─► done.publish(Report)           Done
//! ```
//!
//! Several registrations may be armed at once; each reacts on its own to the
//! next qualifying signal and their relative order is unspecified.
//!
//! ## Example
//! ```no_run
//! use closer::{Config, chain, closer, rendezvous};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), closer::CloserError> {
//!     let (done, mut completion) = rendezvous();
//!     closer(done, chain![|| println!("close listeners"), || println!("flush journal")])?;
//!
//!     // ... serve until a signal arrives ...
//!
//!     let report = completion.wait_with(&Config::default()).await?;
//!     println!("cleanup done after {}", report.signal);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::registration::{Registration, RegistrationState, StateCell};
use super::rendezvous::{Notifier, Report};
use crate::chain::Chain;
use crate::config::Config;
use crate::error::CloserError;
use crate::events::{Event, EventKind};
use crate::observers::ObserverSet;
use crate::signals::{OsSignals, SignalSource};

/// Registers cleanup chains against the monitored signals.
#[derive(Debug, Clone, Default)]
pub struct Closer {
    cfg: Config,
    observers: ObserverSet,
}

/// Registers `chain` with the default configuration and OS signals.
///
/// `chain` is a [`Chain`] or a single action: [`NoOp`](crate::NoOp), an
/// [`ActionFn`](crate::ActionFn) or an [`ActionRef`](crate::ActionRef).
///
/// Returns as soon as the listeners are installed and the task is spawned.
pub fn closer(done: Notifier, chain: impl Into<Chain>) -> Result<Registration, CloserError> {
    Closer::default().register(done, chain)
}

impl Closer {
    /// Creates a closer without observers.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            observers: ObserverSet::empty(),
        }
    }

    /// Starts a [`CloserBuilder`](super::CloserBuilder).
    pub fn builder(cfg: Config) -> super::CloserBuilder {
        super::CloserBuilder::new(cfg)
    }

    pub(crate) fn from_parts(cfg: Config, observers: ObserverSet) -> Self {
        Self { cfg, observers }
    }

    /// Configuration used for every registration made by this closer.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Arms `chain` against the OS termination signals.
    pub fn register(
        &self,
        done: Notifier,
        chain: impl Into<Chain>,
    ) -> Result<Registration, CloserError> {
        let source = OsSignals::install()?;
        self.register_with(done, chain, source)
    }

    /// Arms `chain` against an arbitrary signal source (e.g. a [`SignalHub`](crate::SignalHub) receiver).
    pub fn register_with<S: SignalSource>(
        &self,
        done: Notifier,
        chain: impl Into<Chain>,
        source: S,
    ) -> Result<Registration, CloserError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| CloserError::NoRuntime)?;

        let name: Arc<str> = Arc::from(self.cfg.name.as_ref());
        let state = Arc::new(StateCell::default());
        let chain = chain.into();

        debug!(registration = %name, actions = chain.len(), "arming");
        self.observers
            .emit(&Event::new(EventKind::Armed).with_registration(name.clone()));

        runtime.spawn(listen(
            source,
            chain,
            done,
            Listener {
                name: name.clone(),
                state: state.clone(),
                observers: self.observers.clone(),
            },
        ));

        Ok(Registration { name, state })
    }
}

struct Listener {
    name: Arc<str>,
    state: Arc<StateCell>,
    observers: ObserverSet,
}

impl Listener {
    fn dropped(&self, reason: &str) {
        warn!(registration = %self.name, reason, "completion not published");
        self.observers.emit(
            &Event::new(EventKind::CompletionDropped)
                .with_registration(self.name.clone())
                .with_reason(reason),
        );
    }
}

async fn listen<S: SignalSource>(mut source: S, chain: Chain, done: Notifier, ctx: Listener) {
    let Some(signal) = source.recv().await else {
        ctx.dropped("signal source closed before any signal");
        return;
    };
    drop(source);
    ctx.state.advance(RegistrationState::Fired);

    info!(registration = %ctx.name, %signal, actions = chain.len(), "signal received; running cleanup chain");
    ctx.observers.emit(
        &Event::new(EventKind::SignalReceived)
            .with_registration(ctx.name.clone())
            .with_signal(signal),
    );

    let observers = ctx.observers.clone();
    let report = match tokio::task::spawn_blocking(move || chain.run(&observers)).await {
        Ok(report) => report,
        Err(err) => {
            ctx.dropped(&format!("chain task failed: {err}"));
            return;
        }
    };

    let mut completed = Event::new(EventKind::ChainCompleted)
        .with_registration(ctx.name.clone())
        .with_elapsed(report.elapsed);
    if !report.is_clean() {
        completed = completed.with_reason(format!("{} action(s) failed", report.failures.len()));
    }
    ctx.observers.emit(&completed);
    ctx.state.advance(RegistrationState::Done);

    let report = Report {
        done: true,
        registration: ctx.name.clone(),
        signal,
        chain: report,
    };
    match done.publish(report) {
        Ok(()) => {
            debug!(registration = %ctx.name, "completion published");
            ctx.observers.emit(
                &Event::new(EventKind::CompletionPublished)
                    .with_registration(ctx.name.clone())
                    .with_signal(signal),
            );
        }
        Err(_) => ctx.dropped("completion receiver dropped"),
    }
}
