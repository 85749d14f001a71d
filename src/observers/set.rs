//! # ObserverSet: synchronous fan-out over multiple observers
//!
//! [`ObserverSet`] hands each [`Event`] to every observer in registration order.
//!
//! ## What it guarantees
//! - Per-observer delivery in emission order.
//! - A panicking observer does not prevent delivery to the others.
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        ├──► O1.on_event()  ── panic caught ──┐
//!        ├──► O2.on_event()                    │
//!        └──► ON.on_event()                    ▼
//!                                  ObserverPanicked ──► every other observer
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::warn;

use super::Observe;
use crate::error::panic_message;
use crate::events::Event;

/// Composite fan-out over observers. Cheap to clone.
#[derive(Clone)]
pub struct ObserverSet {
    observers: Arc<[Arc<dyn Observe>]>,
}

impl ObserverSet {
    /// Creates a new set.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn Observe>>) -> Self {
        Self {
            observers: observers.into(),
        }
    }

    /// A set with no observers.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Delivers one event to every observer.
    pub fn emit(&self, event: &Event) {
        if self.observers.is_empty() {
            return;
        }
        for (idx, name, info) in self.deliver(event, None) {
            let panicked = Event::observer_panicked(name, info);
            // panics while reporting a panic are only logged
            let _ = self.deliver(&panicked, Some(idx));
        }
    }

    fn deliver(&self, event: &Event, skip: Option<usize>) -> Vec<(usize, &'static str, String)> {
        let mut panics = Vec::new();
        for (idx, obs) in self.observers.iter().enumerate() {
            if skip == Some(idx) {
                continue;
            }
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| obs.on_event(event))) {
                let info = panic_message(payload.as_ref());
                warn!(observer = obs.name(), %info, "observer panicked");
                panics.push((idx, obs.name(), info));
            }
        }
        panics
    }

    /// True if there are no observers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Number of observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }
}

impl Default for ObserverSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl std::fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.observers.iter().map(|o| o.name()))
            .finish()
    }
}
