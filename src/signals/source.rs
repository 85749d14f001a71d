//! # Signal source trait.
//!
//! A [`SignalSource`] is one registration's private view of signal delivery.
//! Every registration owns its own source, so one delivery fans out to all of them:
//!
//! ```text
//!   kill -INT <pid> ──► OS ──┬──► OsSignals (registration A) ──► chain A
//!                            └──► OsSignals (registration B) ──► chain B
//!
//!   SignalHub::deliver ──────┬──► HubReceiver (registration C) ──► chain C
//!                            └──► HubReceiver (registration D) ──► chain D
//! ```
//!
//! No ordering is implied between registrations reacting to the same delivery.

use async_trait::async_trait;

use super::SignalKind;

/// Per-registration stream of monitored signals.
#[async_trait]
pub trait SignalSource: Send + 'static {
    /// Waits for the next monitored signal.
    ///
    /// Returns `None` once the source can never yield again (runtime or hub gone).
    async fn recv(&mut self) -> Option<SignalKind>;
}
