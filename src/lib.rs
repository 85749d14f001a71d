//! # closer
//!
//! **closer** is a deterministic shutdown-signal coordinator for tokio programs.
//!
//! It listens for process termination signals and, on the first one, runs an
//! ordered chain of cleanup actions exactly once, then hands a completion report
//! back to the waiting side of the program.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ActionFn   ActionFn   ActionFn            (closures, or any `Action`)
//!      │          │          │
//!      └──────────┼──────────┘
//!                 ▼
//!   ┌──────────────────────────────┐
//!   │ Chain  (right fold, in order)│
//!   └──────────────┬───────────────┘
//!                  ▼
//!   ┌──────────────────────────────┐     ┌──────────────────────────┐
//!   │ Closer::register(done, chain)│◄────│ OsSignals / SignalHub    │
//!   │  - install listeners (armed) │     │ (SIGINT, SIGTERM; SIGKILL│
//!   │  - spawn one listening task  │     │  is listed, never caught)│
//!   └──────────────┬───────────────┘     └──────────────────────────┘
//!                  ▼  first signal
//!   ┌──────────────────────────────┐     ┌──────────────────────────┐
//!   │ chain.run()  (blocking pool) │────►│ ObserverSet (optional)   │
//!   │  a1 ─► a2 ─► a3              │     │  LogWriter, custom ...   │
//!   └──────────────┬───────────────┘     └──────────────────────────┘
//!                  ▼
//!   Notifier ──► Report ──► Completion::wait_with(&cfg) in main
//!                              └─ deadline exceeded ─► raise(escalate)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Armed ──(signal)──► Fired ──(chain done)──► Done      (terminal, never re-armed)
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types                                 |
//! |-------------------|--------------------------------------------------------------|-------------------------------------------|
//! | **Composition**   | Ordered, synchronous composition of cleanup steps.           | [`Chain`], [`chain!`], [`ActionFn`]       |
//! | **Coordination**  | Arm a chain against the monitored termination signals.       | [`Closer`], [`closer()`], [`Registration`]|
//! | **Completion**    | Single-use handoff, deadline race, escalation.               | [`rendezvous()`], [`Completion`]          |
//! | **Signals**       | Fixed signal set, OS listeners, in-process hub, self-delivery.| [`SignalKind`], [`SignalHub`], [`raise`] |
//! | **Observers**     | Optional hooks around each action and lifecycle transition.  | [`Observe`], [`Event`]                    |
//! | **Errors**        | Typed errors for registration and waiting.                   | [`CloserError`], [`ActionError`]          |
//! | **Configuration** | Registration label, grace period, escalation signal.         | [`Config`]                                |
//!
//! ## Optional features
//! - `logging` (default): exports the built-in [`LogWriter`] observer.
//!
//! ## Example
//! ```no_run
//! use std::sync::{Arc, Mutex};
//! use closer::{Closer, Config, chain, rendezvous};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let journal = Arc::new(Mutex::new(Vec::<&str>::new()));
//!     let (j1, j2) = (journal.clone(), journal.clone());
//!
//!     let cfg = Config::named("server");
//!     let (done, mut completion) = rendezvous();
//!     Closer::new(cfg.clone()).register(
//!         done,
//!         chain![
//!             move || j1.lock().unwrap().push("stop accepting"),
//!             move || j2.lock().unwrap().push("close pool"),
//!         ],
//!     )?;
//!
//!     // run the service ...
//!
//!     let report = completion.wait_with(&cfg).await?;
//!     println!("shut down by {} after {:?}", report.signal, report.chain.elapsed);
//!     Ok(())
//! }
//! ```
mod chain;
mod config;
mod core;
mod error;
mod events;
mod observers;
mod signals;

// ---- Public re-exports ----

pub use chain::{
    Action, ActionFailure, ActionFn, ActionRef, Chain, ChainBuilder, ChainReport, IntoOutcome,
    Iter, NoOp, chain,
};
pub use config::Config;
pub use crate::core::{
    Closer, CloserBuilder, Completion, Notifier, Registration, RegistrationState, Report, closer,
    rendezvous,
};
pub use error::{ActionError, CloserError};
pub use events::{Event, EventKind};
pub use observers::{Observe, ObserverSet};
pub use signals::{HubReceiver, OsSignals, SignalHub, SignalKind, SignalSource, raise};

// Built-in `tracing` observer.
// Disable with: `--no-default-features`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
