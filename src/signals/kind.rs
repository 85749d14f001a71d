//! # Monitored signal kinds.
//!
//! The set is fixed:
//! - [`SignalKind::Interrupt`]: `SIGINT` (Ctrl-C in a terminal)
//! - [`SignalKind::Terminate`]: `SIGTERM` (default `kill`, systemd/Kubernetes stop)
//! - [`SignalKind::Kill`]: `SIGKILL`, listed for completeness; no process can intercept it
//!
//! Only `Kill` is skipped when listeners are installed.

use std::fmt;

/// A termination-indicating signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Interrupt request (`SIGINT`, Ctrl-C).
    Interrupt,
    /// Polite termination request (`SIGTERM`).
    Terminate,
    /// Forceful termination request (`SIGKILL`).
    Kill,
}

impl SignalKind {
    /// Every signal kind a registration is armed for.
    pub const MONITORED: [SignalKind; 3] =
        [SignalKind::Interrupt, SignalKind::Terminate, SignalKind::Kill];

    /// Conventional name (`SIGINT`, `SIGTERM`, `SIGKILL`).
    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::Interrupt => "SIGINT",
            SignalKind::Terminate => "SIGTERM",
            SignalKind::Kill => "SIGKILL",
        }
    }

    /// True if a handler can be installed for this signal.
    pub fn is_interceptable(self) -> bool {
        !matches!(self, SignalKind::Kill)
    }

    #[cfg(unix)]
    pub(crate) fn to_nix(self) -> nix::sys::signal::Signal {
        use nix::sys::signal::Signal;
        match self {
            SignalKind::Interrupt => Signal::SIGINT,
            SignalKind::Terminate => Signal::SIGTERM,
            SignalKind::Kill => Signal::SIGKILL,
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitored_set_is_fixed() {
        assert_eq!(
            SignalKind::MONITORED,
            [SignalKind::Interrupt, SignalKind::Terminate, SignalKind::Kill]
        );
    }

    #[test]
    fn only_kill_is_not_interceptable() {
        let skipped: Vec<_> = SignalKind::MONITORED
            .into_iter()
            .filter(|k| !k.is_interceptable())
            .collect();
        assert_eq!(skipped, vec![SignalKind::Kill]);
    }

    #[test]
    fn display_uses_conventional_names() {
        assert_eq!(SignalKind::Interrupt.to_string(), "SIGINT");
        assert_eq!(SignalKind::Terminate.to_string(), "SIGTERM");
        assert_eq!(SignalKind::Kill.to_string(), "SIGKILL");
    }
}
