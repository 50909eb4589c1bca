//! Interfaces shared by the history and the collections.
//!
//! # Undoable units
//! [ActionHistory](crate::history::ActionHistory) does not know what a recorded change means.
//! It only stores objects implementing [Undoable] and calls one of their two methods
//! for each cursor step.
//!
//! | Type                                          | Trait      |
//! | :-------------------------------------------- | :--------- |
//! | [Reversible](crate::operation::Reversible)    | [Undoable] |
//! | [Compound](crate::operation::Compound)        | [Undoable] |
//!
//! # Keyed items
//! [Collection](crate::collection::Collection) requires its items to expose an identity
//! key by [Keyed]. Two items with an equal key are the same record as far as the
//! collection is concerned.

/// A recorded change that can be reverted and re-applied on a target state.
///
/// The target is lent to each call instead of being captured by the unit,
/// so the history never holds live references to the state it changes.
///
/// # Remarks
/// [undo](Undoable::undo) and [redo](Undoable::redo) MUST be inverses of each other.
/// The history can not verify it; applying `redo` then `undo` is expected to restore
/// the state seen before `redo`.
pub trait Undoable<T, E> {
    /// Reverts the change on `target`.
    fn undo(&self, target: &mut T) -> Result<(), E>;

    /// Re-applies the change on `target`.
    fn redo(&self, target: &mut T) -> Result<(), E>;
}

impl<T, E, U: Undoable<T, E> + ?Sized> Undoable<T, E> for Box<U> {
    fn undo(&self, target: &mut T) -> Result<(), E> {
        (**self).undo(target)
    }
    fn redo(&self, target: &mut T) -> Result<(), E> {
        (**self).redo(target)
    }
}

/// An item carrying a unique identity key.
///
/// ```
/// # use lur::interface::Keyed;
/// struct Client {
///     id: String,
///     name: String,
/// }
///
/// impl Keyed for Client {
///     type Key = String;
///     fn key(&self) -> &Self::Key {
///         &self.id
///     }
/// }
/// ```
pub trait Keyed {
    type Key: PartialEq;
    fn key(&self) -> &Self::Key;
}
