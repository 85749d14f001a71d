//! Signal kinds, sources and self-delivery.
//!
//! ## Contents
//! - [`SignalKind`] the fixed set of monitored termination signals
//! - [`SignalSource`] per-registration stream of signals (fan-out by construction)
//! - [`OsSignals`] tokio-backed OS listeners
//! - [`SignalHub`] / [`HubReceiver`] in-process broadcast trigger
//! - [`raise`] self-delivery used for escalation

mod hub;
mod kind;
mod os;
mod source;

pub use hub::{HubReceiver, SignalHub};
pub use kind::SignalKind;
pub use os::{OsSignals, raise};
pub(crate) use os::escalation_signal;
pub use source::SignalSource;
