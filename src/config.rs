//! # Coordinator configuration.
//!
//! Provides [`Config`] settings for a [`Closer`](crate::Closer) and for the
//! caller-side waiting helper [`Completion::wait_with`](crate::Completion::wait_with).
//!
//! The monitored signal set is fixed and deliberately not part of the configuration.
//!
//! ## Sentinel values
//! - `grace = 0s` → wait for completion without a deadline
//! - `escalate = None` → on deadline, report `DeadlineExceeded` without self-delivering a signal

use std::borrow::Cow;
use std::time::Duration;

use crate::signals::SignalKind;

/// Configuration for registrations and for waiting on their completion.
///
/// ## Field semantics
/// - `name`: registration label carried by events and log lines
/// - `grace`: how long the caller waits for the chain to finish (`0s` = unbounded)
/// - `escalate`: signal self-delivered when `grace` elapses
/// - `hub_capacity`: default ring size for [`SignalHub`](crate::SignalHub) (min 1)
#[derive(Clone, Debug)]
pub struct Config {
    /// Registration label.
    pub name: Cow<'static, str>,

    /// Maximum time the caller waits for the completion report.
    ///
    /// Cleanup that takes longer is not interrupted; the caller escalates instead.
    pub grace: Duration,

    /// Signal delivered to the own process once `grace` is exceeded.
    ///
    /// `Some(SignalKind::Kill)` forces the process down. An interceptable signal is
    /// upgraded to `Kill` once this process has installed its own listeners, since
    /// those listeners would otherwise swallow it.
    pub escalate: Option<SignalKind>,

    /// Capacity of a [`SignalHub`](crate::SignalHub) built from this config.
    pub hub_capacity: usize,
}

impl Config {
    /// Creates the default configuration with a custom registration label.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the caller-side deadline as an `Option`.
    ///
    /// - `None` → wait forever
    /// - `Some(d)` → race completion against `d`
    #[inline]
    pub fn grace_limit(&self) -> Option<Duration> {
        if self.grace == Duration::ZERO {
            None
        } else {
            Some(self.grace)
        }
    }

    /// Returns a hub capacity clamped to a minimum of 1.
    #[inline]
    pub fn hub_capacity_clamped(&self) -> usize {
        self.hub_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `name = "closer"`
    /// - `grace = 30s`
    /// - `escalate = Some(SignalKind::Kill)`
    /// - `hub_capacity = 16`
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("closer"),
            grace: Duration::from_secs(30),
            escalate: Some(SignalKind::Kill),
            hub_capacity: 16,
        }
    }
}
