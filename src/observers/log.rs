//! # LogWriter: event logger
//!
//! A minimal observer that renders every [`Event`] through `tracing`.
//! Install a `tracing` subscriber to see the output.
//!
//! ## Example output
//! ```text
//! INFO armed registration="closer"
//! INFO signal received registration="closer" signal=SIGINT
//! DEBUG action starting action="flush" index=0
//! WARN action failed action="close-db" index=1 reason="connection reset"
//! INFO chain completed registration="closer" elapsed_ms=12
//! INFO completion published registration="closer"
//! ```

use tracing::{debug, info, warn};

use crate::events::{Event, EventKind};
use crate::observers::Observe;

/// Tracing-backed event writer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Observe for LogWriter {
    fn on_event(&self, e: &Event) {
        let registration = e.registration.as_deref().unwrap_or("-");
        let action = e.action.as_deref().unwrap_or("-");
        match e.kind {
            EventKind::Armed => {
                info!(registration, "armed");
            }
            EventKind::SignalReceived => {
                info!(registration, signal = ?e.signal, "signal received");
            }
            EventKind::ActionStarting => {
                debug!(action, index = ?e.index, "action starting");
            }
            EventKind::ActionCompleted => {
                debug!(action, index = ?e.index, elapsed_ms = ?e.elapsed_ms, "action completed");
            }
            EventKind::ActionFailed => {
                warn!(action, index = ?e.index, reason = ?e.reason, "action failed");
            }
            EventKind::ChainCompleted => {
                info!(registration, elapsed_ms = ?e.elapsed_ms, reason = ?e.reason, "chain completed");
            }
            EventKind::CompletionPublished => {
                info!(registration, signal = ?e.signal, "completion published");
            }
            EventKind::CompletionDropped => {
                warn!(registration, reason = ?e.reason, "completion dropped");
            }
            EventKind::ObserverPanicked => {
                warn!(observer = action, reason = ?e.reason, "observer panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
