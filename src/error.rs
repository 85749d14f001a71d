//! Error types used by the coordinator and by cleanup actions.
//!
//! This module defines two enums:
//!
//! - [`CloserError`]: errors raised by registration and by the caller-side wait helpers.
//! - [`ActionError`]: the outcome of a single failed cleanup action.
//!
//! Both provide `as_label` (stable snake_case label for logs).
//! [`ActionError`] never influences chain execution; it is reported to observers only.

use std::time::Duration;
use thiserror::Error;

use crate::signals::SignalKind;

/// # Errors produced by the coordinator.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CloserError {
    /// A signal listener could not be installed at registration time.
    #[error("failed to install {signal} listener: {source}")]
    SignalInstall {
        /// The signal whose listener failed.
        signal: SignalKind,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Registration was attempted outside a tokio runtime.
    #[error("closer must be registered from within a tokio runtime")]
    NoRuntime,

    /// The completion was not published before the caller's deadline.
    #[error("completion not published within {deadline:?}")]
    DeadlineExceeded {
        /// The deadline the caller waited for.
        deadline: Duration,
    },

    /// The registration went away without publishing a completion.
    #[error("registration dropped before publishing completion")]
    Abandoned,

    /// Self-delivering a signal failed.
    #[error("failed to raise {signal}: {reason}")]
    Raise {
        /// The signal that could not be delivered.
        signal: SignalKind,
        /// OS error description.
        reason: String,
    },

    /// The signal cannot be raised on this platform.
    #[error("raising {signal} is not supported on this platform")]
    Unsupported {
        /// The requested signal.
        signal: SignalKind,
    },
}

impl CloserError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use closer::CloserError;
    ///
    /// assert_eq!(CloserError::Abandoned.as_label(), "closer_abandoned");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CloserError::SignalInstall { .. } => "closer_signal_install",
            CloserError::NoRuntime => "closer_no_runtime",
            CloserError::DeadlineExceeded { .. } => "closer_deadline_exceeded",
            CloserError::Abandoned => "closer_abandoned",
            CloserError::Raise { .. } => "closer_raise",
            CloserError::Unsupported { .. } => "closer_unsupported",
        }
    }

    /// True if the caller simply ran out of time (the registration may still complete).
    pub fn is_deadline(&self) -> bool {
        matches!(self, CloserError::DeadlineExceeded { .. })
    }
}

/// # Outcome of a failed cleanup action.
///
/// Actions are best-effort: a failure is recorded and observed, the chain moves on.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The action reported a failure.
    #[error("action failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// The action panicked; the panic was caught.
    #[error("action panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl ActionError {
    /// Creates a [`ActionError::Failed`] from any displayable error.
    pub fn failed(error: impl std::fmt::Display) -> Self {
        ActionError::Failed {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ActionError::Failed { .. } => "action_failed",
            ActionError::Panicked { .. } => "action_panicked",
        }
    }

    /// Returns the human-readable reason without the variant prefix.
    pub fn as_message(&self) -> &str {
        match self {
            ActionError::Failed { error } => error,
            ActionError::Panicked { info } => info,
        }
    }
}

/// Renders a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        let err = CloserError::DeadlineExceeded {
            deadline: Duration::from_secs(1),
        };
        assert_eq!(err.as_label(), "closer_deadline_exceeded");
        assert!(err.is_deadline());
        assert!(!CloserError::Abandoned.is_deadline());
        assert_eq!(ActionError::failed("x").as_label(), "action_failed");
    }

    #[test]
    fn action_error_message_strips_prefix() {
        let err = ActionError::failed("disk full");
        assert_eq!(err.to_string(), "action failed: disk full");
        assert_eq!(err.as_message(), "disk full");
    }

    #[test]
    fn panic_payloads_render() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("static boom");
        assert_eq!(panic_message(boxed.as_ref()), "static boom");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(boxed.as_ref()), "owned boom");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
