//! # OS signal listeners.
//!
//! [`OsSignals`] holds one tokio listener per interceptable monitored signal.
//! Listeners are installed eagerly in [`OsSignals::install`]: once it returns, a
//! delivered signal is buffered even if nobody is awaiting yet.
//!
//! ## Unix
//! - **SIGINT** (Ctrl-C in terminal)
//! - **SIGTERM** (default kill signal, used by systemd/Kubernetes)
//! - **SIGKILL** is skipped: the kernel never delivers it to a handler.
//!
//! ## Windows
//! Only Ctrl-C is observed, reported as [`SignalKind::Interrupt`].
//!
//! Installing a listener replaces the default "terminate the process" action for
//! that signal, for the rest of the process lifetime. [`escalation_signal`] accounts
//! for that when the caller escalates.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::debug;

use super::{SignalKind, SignalSource};
use crate::error::CloserError;

/// Listeners for the monitored OS signals.
#[cfg(unix)]
#[derive(Debug)]
pub struct OsSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl OsSignals {
    /// Installs listeners for every interceptable monitored signal.
    ///
    /// Each call creates independent listeners. Must run inside a tokio runtime.
    pub fn install() -> Result<Self, CloserError> {
        tokio::runtime::Handle::try_current().map_err(|_| CloserError::NoRuntime)?;

        for kind in SignalKind::MONITORED {
            if !kind.is_interceptable() {
                debug!(signal = %kind, "signal cannot be intercepted; not installing a listener");
            }
        }

        use tokio::signal::unix::SignalKind as Tokio;
        let signals = Self {
            interrupt: listen(SignalKind::Interrupt, Tokio::interrupt())?,
            terminate: listen(SignalKind::Terminate, Tokio::terminate())?,
        };
        HANDLERS_INSTALLED.store(true, Ordering::Release);
        Ok(signals)
    }
}

#[cfg(unix)]
fn listen(
    kind: SignalKind,
    raw: tokio::signal::unix::SignalKind,
) -> Result<tokio::signal::unix::Signal, CloserError> {
    tokio::signal::unix::signal(raw)
        .map_err(|source| CloserError::SignalInstall { signal: kind, source })
}

#[cfg(unix)]
#[async_trait]
impl SignalSource for OsSignals {
    async fn recv(&mut self) -> Option<SignalKind> {
        tokio::select! {
            v = self.interrupt.recv() => v.map(|()| SignalKind::Interrupt),
            v = self.terminate.recv() => v.map(|()| SignalKind::Terminate),
        }
    }
}

/// Listeners for the monitored OS signals.
#[cfg(windows)]
#[derive(Debug)]
pub struct OsSignals {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(windows)]
impl OsSignals {
    /// Installs a Ctrl-C listener. Must run inside a tokio runtime.
    pub fn install() -> Result<Self, CloserError> {
        tokio::runtime::Handle::try_current().map_err(|_| CloserError::NoRuntime)?;
        debug!("only Ctrl-C is observable on this platform");

        let ctrl_c = tokio::signal::windows::ctrl_c().map_err(|source| {
            CloserError::SignalInstall {
                signal: SignalKind::Interrupt,
                source,
            }
        })?;
        HANDLERS_INSTALLED.store(true, Ordering::Release);
        Ok(Self { ctrl_c })
    }
}

#[cfg(windows)]
#[async_trait]
impl SignalSource for OsSignals {
    async fn recv(&mut self) -> Option<SignalKind> {
        self.ctrl_c.recv().await.map(|()| SignalKind::Interrupt)
    }
}

/// Set once any [`OsSignals`] has been installed in this process.
static HANDLERS_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Signal to actually deliver when the caller asks to escalate with `requested`.
///
/// Listeners stay registered with the OS after their [`OsSignals`] is dropped, so a
/// self-delivered interceptable signal would be consumed silently. Once listeners
/// exist, escalation uses [`SignalKind::Kill`].
pub(crate) fn escalation_signal(requested: SignalKind) -> SignalKind {
    if requested.is_interceptable() && HANDLERS_INSTALLED.load(Ordering::Acquire) {
        SignalKind::Kill
    } else {
        requested
    }
}

/// Delivers `kind` to the current process.
///
/// This is the escalation step of the caller-side waiting pattern: when cleanup
/// does not finish in time, self-deliver [`SignalKind::Kill`] to force the process
/// down. An interceptable signal raised here is consumed by any installed listener.
#[cfg(unix)]
pub fn raise(kind: SignalKind) -> Result<(), CloserError> {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    debug!(signal = %kind, "self-delivering signal");
    kill(Pid::this(), kind.to_nix()).map_err(|errno| CloserError::Raise {
        signal: kind,
        reason: errno.to_string(),
    })
}

/// Delivers `kind` to the current process.
#[cfg(not(unix))]
pub fn raise(kind: SignalKind) -> Result<(), CloserError> {
    Err(CloserError::Unsupported { signal: kind })
}
