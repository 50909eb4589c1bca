//! Recordable units of change.
//!
//! A [Reversible] is one atomic change described by a pair of [BoundAction]s.
//! A [Compound] groups several units so a single history slot can represent a
//! whole business transaction.
//!
//! ```txt
//! Compound "remove client 7"
//!   +-------------------------+-------------------------+----------------------+
//!   | Reversible              | Reversible              | Reversible           |
//!   |  undo: add rental r1    |  undo: add rental r2    |  undo: add client 7  |
//!   |  redo: remove rental r1 |  redo: remove rental r2 |  redo: remove client |
//!   +-------------------------+-------------------------+----------------------+
//!                      both undo and redo run left to right
//! ```
use crate::action::{bind, BoundAction};
use crate::interface::Undoable;

/// A pair of actions reverting and re-applying one change.
///
/// [Reversible] is stateless beyond its two actions.
/// Calling [undo](Undoable::undo) twice invokes the undo action twice;
/// [ActionHistory](crate::history::ActionHistory) never does that for a single cursor step.
///
/// Example
/// ```
/// # use lur::interface::Undoable;
/// # use lur::operation::Reversible;
/// fn push(v: &mut Vec<i32>, n: i32) -> Result<(), ()> {
///     v.push(n);
///     Ok(())
/// }
/// fn pop(v: &mut Vec<i32>, _: ()) -> Result<(), ()> {
///     v.pop().map(|_| ()).ok_or(())
/// }
///
/// let mut v = vec![1];
/// push(&mut v, 2).unwrap();
/// let op = Reversible::bind(pop, (), push, 2);
///
/// op.undo(&mut v).unwrap();
/// assert_eq!(vec![1], v);
/// op.redo(&mut v).unwrap();
/// assert_eq!(vec![1, 2], v);
/// ```
pub struct Reversible<'a, T, E> {
    undo: BoundAction<'a, T, E>,
    redo: BoundAction<'a, T, E>,
}

impl<'a, T, E> Reversible<'a, T, E> {
    pub fn new(undo: BoundAction<'a, T, E>, redo: BoundAction<'a, T, E>) -> Self {
        Self { undo, redo }
    }
}

impl<'a, T: 'a, E: 'a> Reversible<'a, T, E> {
    /// Builds a [Reversible] from two function pointers and their arguments.
    pub fn bind<U, R>(
        undo_op: fn(&mut T, U) -> Result<(), E>,
        undo_args: U,
        redo_op: fn(&mut T, R) -> Result<(), E>,
        redo_args: R,
    ) -> Self
    where
        U: Clone + 'a,
        R: Clone + 'a,
    {
        Self::new(bind(undo_op, undo_args), bind(redo_op, redo_args))
    }
}

impl<'a, T, E> Undoable<T, E> for Reversible<'a, T, E> {
    fn undo(&self, target: &mut T) -> Result<(), E> {
        self.undo.invoke(target)
    }
    fn redo(&self, target: &mut T) -> Result<(), E> {
        self.redo.invoke(target)
    }
}

impl<'a, T, E> std::fmt::Debug for Reversible<'a, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reversible").finish_non_exhaustive()
    }
}

/// An ordered group of units undone and redone together.
///
/// # Order
/// Both [undo](Undoable::undo) and [redo](Undoable::redo) run the members in the order they were added.
/// Undo is NOT reversed.
/// Members must be added in an order that is safe to undo forward,
/// typically dependents before the record they depend on.
///
/// # Failure
/// The first failing member stops the iteration and its error is returned unchanged.
/// Members before it have already been applied.
pub struct Compound<'a, T, E> {
    members: Vec<Box<dyn Undoable<T, E> + 'a>>,
}

impl<'a, T, E> Compound<'a, T, E> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Appends a unit.
    pub fn add<U: Undoable<T, E> + 'a>(&mut self, op: U) {
        self.members.push(Box::new(op));
    }

    /// Appends a unit, builder style.
    pub fn with<U: Undoable<T, E> + 'a>(mut self, op: U) -> Self {
        self.add(op);
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'a, T, E> Default for Compound<'a, T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, E> Undoable<T, E> for Compound<'a, T, E> {
    fn undo(&self, target: &mut T) -> Result<(), E> {
        self.members.iter().try_for_each(|op| op.undo(target))
    }
    fn redo(&self, target: &mut T) -> Result<(), E> {
        self.members.iter().try_for_each(|op| op.redo(target))
    }
}

impl<'a, T, E> std::fmt::Debug for Compound<'a, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compound")
            .field("len", &self.members.len())
            .finish()
    }
}
