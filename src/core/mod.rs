//! Signal coordinator: registration, lifecycle and completion.
//!
//! The public API from this module is [`Closer`] (and the [`closer`] shorthand),
//! the [`Registration`] handle and the completion rendezvous.
//!
//! Internal modules:
//! - [`closer`](self::closer): installs listeners, spawns the registration task, runs the chain;
//! - [`builder`]: assembles a closer with observers;
//! - [`registration`]: `Armed -> Fired -> Done` lifecycle;
//! - [`rendezvous`](self::rendezvous): single-use completion handoff and caller-side wait helpers.

mod builder;
mod closer;
mod registration;
mod rendezvous;

pub use builder::CloserBuilder;
pub use closer::{Closer, closer};
pub use registration::{Registration, RegistrationState};
pub use rendezvous::{Completion, Notifier, Report, rendezvous};
