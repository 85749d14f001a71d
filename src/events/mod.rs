//! Coordinator events.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//!
//! ## Quick reference
//! - **Publishers**: `Chain::run` (action events), the registration task
//!   (armed/fired/completed/published), `ObserverSet` (observer panics).
//! - **Consumers**: user observers via [`ObserverSet`](crate::ObserverSet).

mod event;

pub use event::{Event, EventKind};
