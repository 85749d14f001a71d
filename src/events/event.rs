//! # Events emitted around chain execution and registration transitions.
//!
//! The [`EventKind`] enum classifies events across three categories:
//! - **Registration events**: armed, signal received, completion published/dropped
//! - **Action events**: starting, completed, failed (one set per action in a chain)
//! - **Observer events**: an observer panicked while handling an event
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Within one chain run, action events are emitted strictly in chain order.
//!
//! ## Example
//! ```rust
//! use closer::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ActionFailed)
//!     .with_registration("db")
//!     .with_action("flush", 2)
//!     .with_reason("disk full");
//!
//! assert_eq!(ev.kind, EventKind::ActionFailed);
//! assert_eq!(ev.action.as_deref(), Some("flush"));
//! assert_eq!(ev.index, Some(2));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::signals::SignalKind;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of coordinator events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Registration events ===
    /// Listeners installed, task spawned.
    ///
    /// Sets: `registration`
    Armed,

    /// A monitored signal arrived; the registration fired.
    ///
    /// Sets: `registration`, `signal`
    SignalReceived,

    /// The chain finished (every action attempted).
    ///
    /// Sets: `registration`, `elapsed_ms`, `reason` (failure count, if any)
    ChainCompleted,

    /// The completion report was handed to the waiting side.
    ///
    /// Sets: `registration`, `signal`
    CompletionPublished,

    /// The completion could not be published (waiting side gone, or the chain task died).
    ///
    /// Sets: `registration`, `reason`
    CompletionDropped,

    // === Action events ===
    /// An action is about to be invoked.
    ///
    /// Sets: `action`, `index` (0-based position in the chain)
    ActionStarting,

    /// An action returned successfully.
    ///
    /// Sets: `action`, `index`, `elapsed_ms`
    ActionCompleted,

    /// An action returned an error or panicked. The chain continues.
    ///
    /// Sets: `action`, `index`, `elapsed_ms`, `reason`
    ActionFailed,

    // === Observer events ===
    /// An observer panicked while handling an event.
    ///
    /// Sets: `action` (observer name), `reason` (panic info)
    ObserverPanicked,
}

/// Coordinator event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Registration label (see `Config::name`).
    pub registration: Option<Arc<str>>,
    /// Action name (or observer name for `ObserverPanicked`).
    pub action: Option<Arc<str>>,
    /// Position of the action in its chain.
    pub index: Option<u32>,
    /// Signal that fired the registration.
    pub signal: Option<SignalKind>,
    /// Elapsed time in milliseconds (compact).
    pub elapsed_ms: Option<u32>,
    /// Human-readable reason (errors, panic info, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            registration: None,
            action: None,
            index: None,
            signal: None,
            elapsed_ms: None,
            reason: None,
        }
    }

    /// Attaches a registration label.
    #[inline]
    pub fn with_registration(mut self, name: impl Into<Arc<str>>) -> Self {
        self.registration = Some(name.into());
        self
    }

    /// Attaches an action name and its position in the chain.
    #[inline]
    pub fn with_action(mut self, name: impl Into<Arc<str>>, index: usize) -> Self {
        self.action = Some(name.into());
        self.index = Some(u32::try_from(index).unwrap_or(u32::MAX));
        self
    }

    /// Attaches the observed signal.
    #[inline]
    pub fn with_signal(mut self, signal: SignalKind) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Attaches an elapsed duration (stored as milliseconds).
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.elapsed_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates an observer panic event.
    #[inline]
    pub fn observer_panicked(observer: &'static str, info: String) -> Self {
        Event::new(EventKind::ObserverPanicked)
            .with_reason(info)
            .with_observer(observer)
    }

    #[inline]
    fn with_observer(mut self, observer: &'static str) -> Self {
        self.action = Some(observer.into());
        self
    }

    /// True for events emitted around a single action (starting, completed, failed).
    #[inline]
    pub fn is_action_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::ActionStarting | EventKind::ActionCompleted | EventKind::ActionFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic() {
        let a = Event::new(EventKind::Armed);
        let b = Event::new(EventKind::Armed);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn elapsed_saturates() {
        let ev = Event::new(EventKind::ChainCompleted).with_elapsed(Duration::from_secs(u64::MAX));
        assert_eq!(ev.elapsed_ms, Some(u32::MAX));
    }

    #[test]
    fn observer_panic_carries_name_and_info() {
        let ev = Event::observer_panicked("audit", "boom".into());
        assert_eq!(ev.kind, EventKind::ObserverPanicked);
        assert_eq!(ev.action.as_deref(), Some("audit"));
        assert_eq!(ev.reason.as_deref(), Some("boom"));
        assert!(!ev.is_action_event());
    }
}
