//! # Chain: ordered composition of actions.
//!
//! A [`Chain`] is built as an explicit right fold over the action list into a
//! cons list, so `chain([a1, a2, .., an])` is by construction
//! `Chain::cons(a1, chain([a2, .., an]))`:
//!
//! ```text
//!   [a1, a2, a3]  ──fold from the right──►  a1 ─► a2 ─► a3 ─► ∅
//! ```
//!
//! Invoking walks the list front to back: each action runs to completion before
//! the next begins. Walking and dropping are iterative, so chain length does not
//! bound stack depth.
//!
//! A failing or panicking action is recorded in the [`ChainReport`] and the walk
//! continues with the next action.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use super::action::{Action, ActionFn, ActionRef, IntoOutcome, NoOp};
use crate::error::{ActionError, panic_message};
use crate::events::{Event, EventKind};
use crate::observers::ObserverSet;

struct Node {
    head: ActionRef,
    tail: Option<Arc<Node>>,
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut tail = self.tail.take();
        while let Some(node) = tail {
            match Arc::try_unwrap(node) {
                Ok(mut inner) => tail = inner.tail.take(),
                Err(_) => break,
            }
        }
    }
}

/// Ordered, immutable sequence of actions. Cheap to clone.
#[derive(Clone, Default)]
pub struct Chain {
    first: Option<Arc<Node>>,
    len: usize,
}

/// Composes `actions` into one chain, preserving order.
///
/// ```rust
/// use closer::{ActionFn, ActionRef, chain};
///
/// let c = chain([
///     ActionFn::arc("one", || ()) as ActionRef,
///     ActionFn::arc("two", || ()) as ActionRef,
/// ]);
/// assert_eq!(c.len(), 2);
/// ```
pub fn chain<I>(actions: I) -> Chain
where
    I: IntoIterator<Item = ActionRef>,
{
    let actions: Vec<ActionRef> = actions.into_iter().collect();
    actions
        .into_iter()
        .rev()
        .fold(Chain::empty(), |tail, head| Chain::cons(head, tail))
}

impl Chain {
    /// The zero-element chain; invoking it does nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Alias of [`Chain::empty`], for registrations that only need the completion signal.
    pub fn noop() -> Self {
        Self::empty()
    }

    /// Prepends `head`: running the result runs `head`, then `tail`.
    pub fn cons(head: ActionRef, tail: Chain) -> Self {
        Self {
            len: tail.len + 1,
            first: Some(Arc::new(Node {
                head,
                tail: tail.first,
            })),
        }
    }

    /// Starts a [`ChainBuilder`].
    pub fn builder() -> ChainBuilder {
        ChainBuilder::default()
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for the no-op chain.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Actions in execution order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.first.as_deref(),
            remaining: self.len,
        }
    }

    /// Runs every action in order, reporting each one to `observers`.
    pub fn run(&self, observers: &ObserverSet) -> ChainReport {
        let started = Instant::now();
        let mut report = ChainReport::default();

        for (index, action) in self.iter().enumerate() {
            let name: Arc<str> = action.name().into();
            observers.emit(&Event::new(EventKind::ActionStarting).with_action(name.clone(), index));

            let t0 = Instant::now();
            let outcome = catch_unwind(AssertUnwindSafe(|| action.invoke())).unwrap_or_else(
                |payload| {
                    Err(ActionError::Panicked {
                        info: panic_message(payload.as_ref()),
                    })
                },
            );
            let elapsed = t0.elapsed();
            report.invoked += 1;

            match outcome {
                Ok(()) => observers.emit(
                    &Event::new(EventKind::ActionCompleted)
                        .with_action(name, index)
                        .with_elapsed(elapsed),
                ),
                Err(error) => {
                    debug!(action = %name, index, err = %error, "action failed; continuing");
                    observers.emit(
                        &Event::new(EventKind::ActionFailed)
                            .with_action(name.clone(), index)
                            .with_elapsed(elapsed)
                            .with_reason(error.to_string()),
                    );
                    report.failures.push(ActionFailure { index, name, error });
                }
            }
        }

        report.elapsed = started.elapsed();
        report
    }
}

impl Action for Chain {
    fn name(&self) -> &str {
        "chain"
    }

    /// Runs the chain without observers. Inner failures stay inside the chain.
    fn invoke(&self) -> Result<(), ActionError> {
        self.run(&ObserverSet::empty());
        Ok(())
    }
}

impl FromIterator<ActionRef> for Chain {
    fn from_iter<I: IntoIterator<Item = ActionRef>>(iter: I) -> Self {
        chain(iter)
    }
}

impl From<ActionRef> for Chain {
    fn from(action: ActionRef) -> Self {
        Chain::cons(action, Chain::empty())
    }
}

impl From<NoOp> for Chain {
    fn from(action: NoOp) -> Self {
        Chain::from(Arc::new(action) as ActionRef)
    }
}

impl<F, R> From<ActionFn<F>> for Chain
where
    F: Fn() -> R + Send + Sync + 'static,
    R: IntoOutcome + 'static,
{
    fn from(action: ActionFn<F>) -> Self {
        Chain::from(Arc::new(action) as ActionRef)
    }
}

impl From<Vec<ActionRef>> for Chain {
    fn from(actions: Vec<ActionRef>) -> Self {
        chain(actions)
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter().map(|a| a.name())).finish()
    }
}

/// Iterator over a chain's actions, front to back.
pub struct Iter<'a> {
    next: Option<&'a Node>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ActionRef;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.tail.as_deref();
        self.remaining -= 1;
        Some(&node.head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// A single action failure inside a chain run.
#[derive(Debug, Clone)]
pub struct ActionFailure {
    /// Position in the chain (0-based).
    pub index: usize,
    /// Action name.
    pub name: Arc<str>,
    /// What went wrong.
    pub error: ActionError,
}

/// Summary of one chain run.
#[derive(Debug, Clone, Default)]
pub struct ChainReport {
    /// Number of actions invoked (always the chain length).
    pub invoked: usize,
    /// Failures, in chain order.
    pub failures: Vec<ActionFailure>,
    /// Wall time of the whole run.
    pub elapsed: Duration,
}

impl ChainReport {
    /// True if every action succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Incremental [`Chain`] construction.
///
/// ```rust
/// use closer::Chain;
///
/// let c = Chain::builder()
///     .then(|| println!("stop accepting"))
///     .then_named("flush", || -> Result<(), std::io::Error> { Ok(()) })
///     .build();
/// assert_eq!(c.len(), 2);
/// ```
#[derive(Default)]
pub struct ChainBuilder {
    actions: Vec<ActionRef>,
}

impl ChainBuilder {
    /// Appends a closure, named `action-<index>`.
    pub fn then<F, R>(self, f: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        let name = format!("action-{}", self.actions.len());
        self.then_named(name, f)
    }

    /// Appends a named closure.
    pub fn then_named<F, R>(self, name: impl Into<std::borrow::Cow<'static, str>>, f: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.then_action(ActionFn::arc(name, f))
    }

    /// Appends an existing action (including another chain).
    pub fn then_action(mut self, action: ActionRef) -> Self {
        self.actions.push(action);
        self
    }

    /// Finishes the chain.
    pub fn build(self) -> Chain {
        chain(self.actions)
    }
}

/// Composes closures into a [`Chain`], in argument order.
///
/// ```rust
/// let c = closer::chain![|| print!("1"), || print!("2"), || print!("3")];
/// assert_eq!(c.len(), 3);
/// assert!(closer::chain![].is_empty());
/// ```
#[macro_export]
macro_rules! chain {
    () => {
        $crate::Chain::empty()
    };
    ($($f:expr),+ $(,)?) => {
        $crate::Chain::builder()$(.then($f))+.build()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::observers::Observe;
    use std::sync::Mutex;

    type Acc = Arc<Mutex<String>>;

    fn push(acc: &Acc, s: &'static str) -> ActionRef {
        let acc = acc.clone();
        ActionFn::arc(s, move || acc.lock().unwrap().push_str(s))
    }

    fn letters(acc: &Acc, n: usize) -> Vec<ActionRef> {
        const L: [&str; 6] = ["a", "b", "c", "d", "e", "f"];
        L[..n].iter().map(|s| push(acc, *s)).collect()
    }

    #[test]
    fn runs_in_list_order_for_every_length() {
        for n in 0..=6 {
            let acc = Acc::default();
            let c = chain(letters(&acc, n));
            assert_eq!(c.len(), n);
            let report = c.run(&ObserverSet::empty());
            assert_eq!(report.invoked, n);
            assert!(report.is_clean());
            assert_eq!(*acc.lock().unwrap(), &"abcdef"[..n]);
        }
    }

    #[test]
    fn single_actions_convert_into_one_step_chains() {
        let noop = Chain::from(NoOp);
        assert_eq!(noop.len(), 1);
        assert_eq!(noop.iter().next().map(|a| a.name()), Some("noop"));

        let acc = Acc::default();
        let a = acc.clone();
        let single = Chain::from(ActionFn::new("solo", move || a.lock().unwrap().push('x')));
        let report = single.run(&ObserverSet::empty());
        assert_eq!(report.invoked, 1);
        assert!(report.is_clean());
        assert_eq!(*acc.lock().unwrap(), "x");
    }

    #[test]
    fn empty_chain_is_a_no_op() {
        let c = Chain::empty();
        assert!(c.is_empty());
        assert_eq!(c.invoke(), Ok(()));
        assert_eq!(c.run(&ObserverSet::empty()).invoked, 0);
    }

    #[test]
    fn single_action_matches_direct_invocation() {
        let direct = Acc::default();
        push(&direct, "x").invoke().unwrap();

        let chained = Acc::default();
        chain([push(&chained, "x")]).invoke().unwrap();

        assert_eq!(*direct.lock().unwrap(), *chained.lock().unwrap());
    }

    #[test]
    fn fold_matches_manual_nesting_for_every_prefix() {
        for n in 1..=6 {
            let folded = Acc::default();
            chain(letters(&folded, n)).invoke().unwrap();

            let nested = Acc::default();
            let mut actions = letters(&nested, n);
            let head = actions.remove(0);
            Chain::cons(head, chain(actions)).invoke().unwrap();

            let as_action = Acc::default();
            let mut actions = letters(&as_action, n);
            let head = actions.remove(0);
            let rest: ActionRef = Arc::new(chain(actions));
            chain([head, rest]).invoke().unwrap();

            assert_eq!(*folded.lock().unwrap(), *nested.lock().unwrap());
            assert_eq!(*folded.lock().unwrap(), *as_action.lock().unwrap());
        }
    }

    #[test]
    fn duplicates_run_as_listed() {
        let acc = Acc::default();
        let a = push(&acc, "a");
        let b = push(&acc, "b");
        chain([a.clone(), b, a.clone(), a]).invoke().unwrap();
        assert_eq!(*acc.lock().unwrap(), "abaa");
    }

    #[test]
    fn failures_and_panics_do_not_stop_the_chain() {
        let acc = Acc::default();
        let c = Chain::builder()
            .then_action(push(&acc, "1"))
            .then_named("fails", || Err::<(), _>("nope"))
            .then_action(push(&acc, "2"))
            .then_named("panics", || -> () { panic!("boom") })
            .then_action(push(&acc, "3"))
            .build();

        let report = c.run(&ObserverSet::empty());

        assert_eq!(*acc.lock().unwrap(), "123");
        assert_eq!(report.invoked, 5);
        let failed: Vec<_> = report.failures.iter().map(|f| (f.index, f.error.as_label())).collect();
        assert_eq!(failed, vec![(1, "action_failed"), (3, "action_panicked")]);
        assert_eq!(report.failures[1].error.as_message(), "boom");
    }

    #[test]
    fn chain_can_be_invoked_more_than_once() {
        let acc = Acc::default();
        let c = chain(letters(&acc, 2));
        let copy = c.clone();
        c.invoke().unwrap();
        copy.invoke().unwrap();
        assert_eq!(*acc.lock().unwrap(), "abab");
    }

    #[test]
    fn builder_then_names_by_position() {
        let c = Chain::builder().then(|| ()).then_named("flush", || ()).then(|| ()).build();
        let names: Vec<_> = c.iter().map(|a| a.name().to_string()).collect();
        assert_eq!(names, ["action-0", "flush", "action-2"]);
        assert_eq!(format!("{c:?}"), r#"["action-0", "flush", "action-2"]"#);
    }

    #[test]
    fn macro_composes_closures_in_order() {
        let acc = Acc::default();
        let (a1, a2, a3) = (acc.clone(), acc.clone(), acc.clone());
        let c = crate::chain![
            move || a1.lock().unwrap().push('1'),
            move || a2.lock().unwrap().push('2'),
            move || a3.lock().unwrap().push('3'),
        ];
        c.invoke().unwrap();
        assert_eq!(*acc.lock().unwrap(), "123");
    }

    #[test]
    fn long_chains_do_not_recurse() {
        let count = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let c: Chain = (0..200_000)
            .map(|_| {
                let count = count.clone();
                ActionFn::arc("tick", move || {
                    count.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                }) as ActionRef
            })
            .collect();
        c.invoke().unwrap();
        assert_eq!(count.load(std::sync::atomic::Ordering::Relaxed), 200_000);
        drop(c);
    }

    #[derive(Default)]
    struct Trace(Mutex<Vec<(EventKind, Option<u32>)>>);

    impl Observe for Trace {
        fn on_event(&self, ev: &Event) {
            self.0.lock().unwrap().push((ev.kind, ev.index));
        }
    }

    #[test]
    fn observers_wrap_each_action() {
        let trace = Arc::new(Trace::default());
        let set = ObserverSet::new(vec![trace.clone()]);
        let c = Chain::builder()
            .then(|| ())
            .then(|| Err::<(), _>("bad"))
            .build();

        c.run(&set);

        assert_eq!(
            *trace.0.lock().unwrap(),
            vec![
                (EventKind::ActionStarting, Some(0)),
                (EventKind::ActionCompleted, Some(0)),
                (EventKind::ActionStarting, Some(1)),
                (EventKind::ActionFailed, Some(1)),
            ]
        );
    }
}
