//! Chain builder: actions and their ordered composition.
//!
//! - [`action`]: the [`Action`] trait, [`ActionFn`] closures, [`NoOp`];
//! - [`chain`](self::chain): [`Chain`] (right fold into a cons list), [`ChainBuilder`], [`ChainReport`].

mod action;
mod chain;

pub use action::{Action, ActionFn, ActionRef, IntoOutcome, NoOp};
pub use chain::{ActionFailure, Chain, ChainBuilder, ChainReport, Iter, chain};
