//! # Action abstraction and function-backed implementation.
//!
//! An [`Action`] is an opaque, zero-argument cleanup step. It is invoked, never
//! inspected. Its outcome exists only so that observers can report failures; the
//! chain runs the next action regardless.
//!
//! [`ActionFn`] wraps any closure returning `()` or `Result<(), E: Display>`.
//! The common handle type is [`ActionRef`], an `Arc<dyn Action>`.
//!
//! ## Example
//! ```rust
//! use closer::{Action, ActionFn, ActionRef};
//!
//! let flush: ActionRef = ActionFn::arc("flush", || println!("flushing"));
//! let close: ActionRef = ActionFn::arc("close", || -> Result<(), std::io::Error> { Ok(()) });
//!
//! assert_eq!(flush.name(), "flush");
//! assert!(close.invoke().is_ok());
//! ```

use std::borrow::Cow;
use std::fmt::Display;
use std::sync::Arc;

use crate::error::ActionError;

/// Shared handle to an action.
pub type ActionRef = Arc<dyn Action>;

/// # Zero-argument cleanup step.
pub trait Action: Send + Sync + 'static {
    /// Returns a human-readable name for events and logs.
    ///
    /// The default uses `type_name::<Self>()`.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Runs the action once.
    fn invoke(&self) -> Result<(), ActionError>;
}

/// Conversion of a closure's return value into an action outcome.
pub trait IntoOutcome {
    fn into_outcome(self) -> Result<(), ActionError>;
}

impl IntoOutcome for () {
    #[inline]
    fn into_outcome(self) -> Result<(), ActionError> {
        Ok(())
    }
}

impl<E: Display> IntoOutcome for Result<(), E> {
    #[inline]
    fn into_outcome(self) -> Result<(), ActionError> {
        self.map_err(ActionError::failed)
    }
}

/// Function-backed action.
#[derive(Debug)]
pub struct ActionFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ActionFn<F> {
    /// Creates a new function-backed action.
    ///
    /// Prefer [`ActionFn::arc`] when you immediately need an [`ActionRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the action and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F, R> Action for ActionFn<F>
where
    F: Fn() -> R + Send + Sync + 'static, // Fn, not FnMut
    R: IntoOutcome,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self) -> Result<(), ActionError> {
        (self.f)().into_outcome()
    }
}

/// Action that does nothing and never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOp;

impl Action for NoOp {
    fn name(&self) -> &str {
        "noop"
    }

    fn invoke(&self) -> Result<(), ActionError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn unit_closure_always_succeeds() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let a = ActionFn::new("count", move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert!(a.invoke().is_ok());
        assert!(a.invoke().is_ok());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(a.name(), "count");
    }

    #[test]
    fn result_closure_maps_error() {
        let a = ActionFn::new("fail", || Err::<(), _>("socket closed"));
        assert_eq!(
            a.invoke(),
            Err(ActionError::Failed {
                error: "socket closed".into()
            })
        );
    }

    #[test]
    fn noop_is_silent() {
        assert_eq!(NoOp.invoke(), Ok(()));
        assert_eq!(NoOp.name(), "noop");
    }
}
