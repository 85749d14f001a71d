//! # Observers: the optional instrumentation hook.
//!
//! ```text
//!   Chain::run ──► ActionStarting ─► action.invoke() ─► ActionCompleted / ActionFailed
//!        │                                                   │
//!        └──────────────────────► ObserverSet::emit ◄────────┘
//!                                   ├──► LogWriter
//!                                   └──► custom observers
//! ```

mod observer;
mod set;

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use observer::Observe;
pub use set::ObserverSet;
