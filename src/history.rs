use crate::error::HistoryError;
use crate::interface::Undoable;
use tracing::{debug, trace};

/// A linear undo-redo history of recorded units.
///
/// # Cursor
/// [ActionHistory] keeps a sequence of units and a cursor pointing at the most recently
/// applied one.
/// ```txt
///            index
///              v
/// +----+----+----+----+----+
/// | u0 | u1 | u2 | u3 | u4 |
/// +----+----+----+----+----+
///  <-- applied -->  <- undone, redoable ->
/// ```
/// - [undo](ActionHistory::undo) reverts the unit under the cursor and moves the cursor left.
/// - [redo](ActionHistory::redo) moves the cursor right and re-applies the unit under it.
/// - [record](ActionHistory::record) discards every unit right of the cursor before appending.
///   A new change invalidates the redo future permanently.
///
/// The cursor is [None] in the initial state and after everything has been undone.
///
/// # Target
/// The history does not own the state it changes.
/// The state is lent to each [undo](ActionHistory::undo) and [redo](ActionHistory::redo) call,
/// and recorded units receive it as `&mut T`.
///
/// # Thread-safety
/// [ActionHistory] does not implement [Send] and [Sync] since the recorded units are
/// arbitrary trait objects.
///
/// Example
/// ```
/// # use lur::history::ActionHistory;
/// # use lur::operation::Reversible;
/// # use lur::error::HistoryError;
/// fn add(n: &mut i32, by: i32) -> Result<(), ()> {
///     *n += by;
///     Ok(())
/// }
///
/// let mut n = 0;
/// let mut history = ActionHistory::new();
///
/// add(&mut n, 5).unwrap();
/// history.record(Reversible::bind(add, -5, add, 5));
///
/// history.undo(&mut n).unwrap();
/// assert_eq!(0, n);
/// assert_eq!(Err(HistoryError::NoMoreUndo), history.undo(&mut n));
///
/// history.redo(&mut n).unwrap();
/// assert_eq!(5, n);
/// ```
pub struct ActionHistory<'a, T, E> {
    units: Vec<Box<dyn Undoable<T, E> + 'a>>,
    // Number of applied units; the cursor index plus one.
    applied: usize,
}

impl<'a, T, E> ActionHistory<'a, T, E> {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            applied: 0,
        }
    }

    /// Returns the number of units stored in the history, including undone ones.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns the position of the most recently applied unit.
    ///
    /// [None] means nothing is applied, i.e. the history is empty or fully undone.
    pub fn index(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    /// Returns the number of units that can be undone.
    pub fn undoable_count(&self) -> usize {
        self.applied
    }

    /// Returns the number of units that can be redone.
    pub fn redoable_count(&self) -> usize {
        self.units.len() - self.applied
    }

    /// Drops every unit and resets the cursor.
    pub fn clear(&mut self) {
        self.units.clear();
        self.applied = 0;
    }

    /// Appends a unit after the cursor and moves the cursor onto it.
    ///
    /// All units right of the cursor are dropped first.
    /// The unit is NOT applied; the caller performs the change before recording it.
    pub fn record<U>(&mut self, unit: U)
    where
        U: Undoable<T, E> + 'a,
    {
        if self.applied < self.units.len() {
            trace!(
                discarded = self.units.len() - self.applied,
                "drop undone units"
            );
            self.units.truncate(self.applied);
        }

        self.units.push(Box::new(unit));
        self.applied = self.units.len();

        debug!(index = self.applied - 1, len = self.units.len(), "record");
    }

    /// Reverts the unit under the cursor.
    ///
    /// # Errors
    /// - [NoMoreUndo](HistoryError::NoMoreUndo) if nothing is applied.
    /// - [Action](HistoryError::Action) if the unit fails. The cursor is not moved.
    pub fn undo(&mut self, target: &mut T) -> Result<(), HistoryError<E>> {
        if self.applied == 0 {
            return Err(HistoryError::NoMoreUndo);
        }

        self.units[self.applied - 1]
            .undo(target)
            .map_err(HistoryError::Action)?;
        self.applied -= 1;

        debug!(index = ?self.index(), len = self.units.len(), "undo");
        Ok(())
    }

    /// Re-applies the unit right of the cursor.
    ///
    /// # Errors
    /// - [NoMoreRedo](HistoryError::NoMoreRedo) if the cursor is at the tail.
    /// - [Action](HistoryError::Action) if the unit fails.
    ///   The cursor has already moved onto the failed unit.
    pub fn redo(&mut self, target: &mut T) -> Result<(), HistoryError<E>> {
        if self.applied == self.units.len() {
            return Err(HistoryError::NoMoreRedo);
        }

        self.applied += 1;
        self.units[self.applied - 1]
            .redo(target)
            .map_err(HistoryError::Action)?;

        debug!(index = ?self.index(), len = self.units.len(), "redo");
        Ok(())
    }

    /// Undo multiple steps.
    ///
    /// Nothing is undone if fewer than `count` units are applied.
    /// If `count=0`, this method does nothing.
    pub fn undo_multi(&mut self, count: usize, target: &mut T) -> Result<(), HistoryError<E>> {
        if self.applied < count {
            return Err(HistoryError::NoMoreUndo);
        }
        for _ in 0..count {
            self.undo(target)?;
        }
        Ok(())
    }

    /// Redo multiple steps.
    ///
    /// Nothing is redone if fewer than `count` units are redoable.
    /// If `count=0`, this method does nothing.
    pub fn redo_multi(&mut self, count: usize, target: &mut T) -> Result<(), HistoryError<E>> {
        if self.redoable_count() < count {
            return Err(HistoryError::NoMoreRedo);
        }
        for _ in 0..count {
            self.redo(target)?;
        }
        Ok(())
    }

    /// Undo-redo bidirectionally.
    ///
    /// - `count < 0` => `self.undo_multi(-count)`.
    /// - `0 <= count` => `self.redo_multi(count)`.
    pub fn jump(&mut self, count: isize, target: &mut T) -> Result<(), HistoryError<E>> {
        if count < 0 {
            self.undo_multi(count.unsigned_abs(), target)
        } else {
            self.redo_multi(count as usize, target)
        }
    }
}

impl<'a, T, E> Default for ActionHistory<'a, T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, E> std::fmt::Debug for ActionHistory<'a, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionHistory")
            .field("len", &self.units.len())
            .field("index", &self.index())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::operation::{Compound, Reversible};

    fn add(n: &mut i32, by: i32) -> Result<(), String> {
        *n += by;
        Ok(())
    }

    fn fail(_: &mut i32, _: ()) -> Result<(), String> {
        Err("fail".to_string())
    }

    // Applies `+by` and records its inverse.
    fn edit(h: &mut ActionHistory<i32, String>, n: &mut i32, by: i32) {
        add(n, by).unwrap();
        h.record(Reversible::bind(add, -by, add, by));
    }

    #[test]
    fn empty() {
        let mut n = 0;
        let mut h: ActionHistory<i32, String> = ActionHistory::new();

        assert!(h.is_empty());
        assert_eq!(None, h.index());
        assert_eq!(Err(HistoryError::NoMoreUndo), h.undo(&mut n));
        assert_eq!(Err(HistoryError::NoMoreRedo), h.redo(&mut n));
    }

    #[test]
    fn record_undo_redo_cursor() {
        let mut n = 0;
        let mut h = ActionHistory::new();

        assert_eq!(Err(HistoryError::NoMoreUndo), h.undo(&mut n));
        edit(&mut h, &mut n, 1);
        assert_eq!(Some(0), h.index());
        h.undo(&mut n).unwrap();
        assert_eq!(None, h.index());
        assert_eq!(0, n);
        h.redo(&mut n).unwrap();
        assert_eq!(Some(0), h.index());
        assert_eq!(1, n);
        assert_eq!(Err(HistoryError::NoMoreRedo), h.redo(&mut n));
    }

    #[test]
    fn undo() {
        let mut n = 0;
        let mut h = ActionHistory::new();

        edit(&mut h, &mut n, 1);
        edit(&mut h, &mut n, 2);
        edit(&mut h, &mut n, 5);
        assert_eq!(8, n);

        h.undo(&mut n).unwrap();
        assert_eq!(3, n);
        h.undo(&mut n).unwrap();
        assert_eq!(1, n);
        h.undo(&mut n).unwrap();
        assert_eq!(0, n);
        assert!(h.undo(&mut n).is_err());
        assert_eq!(3, h.redoable_count());
    }

    #[test]
    fn redo() {
        let mut n = 0;
        let mut h = ActionHistory::new();

        edit(&mut h, &mut n, 1);
        edit(&mut h, &mut n, 2);
        edit(&mut h, &mut n, 5);
        h.undo(&mut n).unwrap();
        h.undo(&mut n).unwrap();
        h.undo(&mut n).unwrap();

        h.redo(&mut n).unwrap();
        assert_eq!(1, n);
        h.redo(&mut n).unwrap();
        assert_eq!(3, n);
        h.redo(&mut n).unwrap();
        assert_eq!(8, n);
        assert_eq!(Err(HistoryError::NoMoreRedo), h.redo(&mut n));
    }

    #[test]
    fn record_discards_redo_future() {
        let mut n = 0;
        let mut h = ActionHistory::new();

        edit(&mut h, &mut n, 1); // A
        edit(&mut h, &mut n, 10); // B
        h.undo(&mut n).unwrap();
        edit(&mut h, &mut n, 100); // C

        assert_eq!(2, h.len());
        assert_eq!(Some(1), h.index());
        assert_eq!(Err(HistoryError::NoMoreRedo), h.redo(&mut n));
        assert_eq!(101, n);

        h.undo(&mut n).unwrap();
        assert_eq!(1, n);
        h.undo(&mut n).unwrap();
        assert_eq!(0, n);
        assert_eq!(Err(HistoryError::NoMoreUndo), h.undo(&mut n));
    }

    #[test]
    fn record_after_full_undo_discards_all() {
        let mut n = 0;
        let mut h = ActionHistory::new();

        edit(&mut h, &mut n, 1); // A
        edit(&mut h, &mut n, 10); // B
        h.undo(&mut n).unwrap();
        h.undo(&mut n).unwrap();
        edit(&mut h, &mut n, 100); // C

        assert_eq!(1, h.len());
        assert_eq!(Some(0), h.index());
        assert_eq!(Err(HistoryError::NoMoreRedo), h.redo(&mut n));

        h.undo(&mut n).unwrap();
        assert_eq!(0, n);
        assert_eq!(Err(HistoryError::NoMoreUndo), h.undo(&mut n));
    }

    #[test]
    fn edit_undo_edit_undo_redo() {
        let mut n = 0;
        let mut h = ActionHistory::new();

        edit(&mut h, &mut n, 1);
        edit(&mut h, &mut n, 2);
        h.undo(&mut n).unwrap();
        assert_eq!(1, n);
        edit(&mut h, &mut n, 4);
        edit(&mut h, &mut n, 20);
        assert_eq!(25, n);

        h.undo(&mut n).unwrap();
        assert_eq!(5, n);
        h.redo(&mut n).unwrap();
        assert_eq!(25, n);
    }

    #[test]
    fn compound_is_one_slot() {
        let mut n = 0;
        let mut h = ActionHistory::new();

        let mut ops = Compound::new();
        for by in [1, 2, 3] {
            add(&mut n, by).unwrap();
            ops.add(Reversible::bind(add, -by, add, by));
        }
        h.record(ops);
        assert_eq!(1, h.len());
        assert_eq!(6, n);

        h.undo(&mut n).unwrap();
        assert_eq!(0, n);
        h.redo(&mut n).unwrap();
        assert_eq!(6, n);
    }

    #[test]
    fn undo_err_keeps_cursor() {
        let mut n = 0;
        let mut h = ActionHistory::new();

        h.record(Reversible::bind(fail, (), add, 1));

        let r = h.undo(&mut n);
        assert_eq!(Err(HistoryError::Action("fail".to_string())), r);
        assert_eq!(Some(0), h.index());
    }

    #[test]
    fn redo_err_moves_cursor() {
        let mut n = 0;
        let mut h = ActionHistory::new();

        h.record(Reversible::bind(add, -1, fail, ()));
        h.undo(&mut n).unwrap();
        assert_eq!(None, h.index());

        let r = h.redo(&mut n);
        assert_eq!(Err(HistoryError::Action("fail".to_string())), r);
        assert_eq!(Some(0), h.index());
    }

    #[test]
    fn jump() {
        let mut n = 0;
        let mut h = ActionHistory::new();

        edit(&mut h, &mut n, 1); // 1
        edit(&mut h, &mut n, 2); // 3
        edit(&mut h, &mut n, 5); // 8
        edit(&mut h, &mut n, 7); // 15

        h.jump(-2, &mut n).unwrap();
        assert_eq!(3, n);
        assert_eq!(Err(HistoryError::NoMoreUndo), h.jump(-3, &mut n));
        assert_eq!(3, n);
        h.jump(-2, &mut n).unwrap();
        assert_eq!(0, n);
        assert_eq!(None, h.index());

        h.jump(1, &mut n).unwrap();
        assert_eq!(1, n);
        assert_eq!(Err(HistoryError::NoMoreRedo), h.jump(4, &mut n));
        assert_eq!(1, n);
        h.jump(3, &mut n).unwrap();
        assert_eq!(15, n);
        h.jump(0, &mut n).unwrap();
        assert_eq!(15, n);
    }

    #[test]
    fn undo_multi_redo_multi() {
        let mut n = 0;
        let mut h = ActionHistory::new();

        for _ in 0..5 {
            edit(&mut h, &mut n, 1);
        }

        h.undo_multi(5, &mut n).unwrap();
        assert_eq!(0, n);
        assert_eq!(5, h.redoable_count());
        h.redo_multi(2, &mut n).unwrap();
        assert_eq!(2, n);
        assert_eq!(2, h.undoable_count());
        assert_eq!(3, h.redoable_count());
    }

    #[test]
    fn clear() {
        let mut n = 0;
        let mut h = ActionHistory::new();

        edit(&mut h, &mut n, 1);
        edit(&mut h, &mut n, 1);
        h.clear();

        assert!(h.is_empty());
        assert_eq!(None, h.index());
        assert_eq!(Err(HistoryError::NoMoreUndo), h.undo(&mut n));
        assert_eq!(2, n);
    }

    #[test]
    fn undo_redo_many() {
        let count = 10000;
        let mut n = 0;
        let mut h = ActionHistory::new();

        for i in 0..count {
            edit(&mut h, &mut n, 1);
            assert_eq!(i + 1, n);
        }
        for i in (0..count).rev() {
            h.undo(&mut n).unwrap();
            assert_eq!(i, n);
        }
        assert!(h.undo(&mut n).is_err());
        for i in 0..count {
            h.redo(&mut n).unwrap();
            assert_eq!(i + 1, n);
        }
        assert!(h.redo(&mut n).is_err());
    }
}
