//! # Observer trait.
//!
//! Provides [`Observe`], the optional instrumentation hook invoked before and after
//! every action and at each registration transition.
//!
//! ## Rules
//! - Observers run **synchronously** on the thread executing the chain; keep them fast.
//! - Panics are caught; the remaining observers still see the event and an
//!   `EventKind::ObserverPanicked` is delivered to them.
//! - Observers cannot alter chain execution.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use closer::{Event, EventKind, Observe};
//!
//! #[derive(Default)]
//! struct FailureCounter(AtomicUsize);
//!
//! impl Observe for FailureCounter {
//!     fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::ActionFailed) {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "failure-counter" }
//! }
//! ```

use crate::events::Event;

/// Instrumentation hook for chain and registration events.
pub trait Observe: Send + Sync + 'static {
    /// Handles a single event.
    fn on_event(&self, event: &Event);

    /// Returns the observer name used in logs and `ObserverPanicked` events.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
