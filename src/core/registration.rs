//! # Registration handle and lifecycle.
//!
//! ```text
//!   Armed ──(first monitored signal)──► Fired ──(chain finished)──► Done
//! ```
//!
//! The lifecycle is terminal. There is no cancellation and no re-arming; dropping
//! the handle does not disarm the registration.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RegistrationState {
    /// Listening; no signal seen yet.
    Armed = 0,
    /// A signal arrived; the chain is running.
    Fired = 1,
    /// The chain finished and publishing was attempted; the waiting side may
    /// already have been gone.
    Done = 2,
}

impl RegistrationState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => RegistrationState::Armed,
            1 => RegistrationState::Fired,
            _ => RegistrationState::Done,
        }
    }
}

/// Shared state cell between the handle and the registration task.
#[derive(Debug, Default)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn advance(&self, to: RegistrationState) {
        self.0.fetch_max(to as u8, Ordering::AcqRel);
    }

    pub(crate) fn get(&self) -> RegistrationState {
        RegistrationState::from_u8(self.0.load(Ordering::Acquire))
    }
}

/// Observation handle returned by [`Closer::register`](crate::Closer::register).
#[derive(Debug, Clone)]
pub struct Registration {
    pub(crate) name: Arc<str>,
    pub(crate) state: Arc<StateCell>,
}

impl Registration {
    /// Registration label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RegistrationState {
        self.state.get()
    }

    /// True once the chain has run, whether or not anyone received the completion.
    pub fn is_done(&self) -> bool {
        self.state() == RegistrationState::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_only_moves_forward() {
        let cell = StateCell::default();
        assert_eq!(cell.get(), RegistrationState::Armed);
        cell.advance(RegistrationState::Done);
        cell.advance(RegistrationState::Fired);
        assert_eq!(cell.get(), RegistrationState::Done);
    }
}
