use crate::error::CollectionError;
use crate::interface::Keyed;
use tracing::trace;

/// An insertion-ordered container of uniquely keyed items.
///
/// [Collection] is the backing store of every record type.
/// It never raises for lookups or removals; an absent key degrades to [None] or `false`.
/// Only [replace](Collection::replace) fails.
///
/// # Uniqueness
/// No two items share a key.
/// [add](Collection::add) of a duplicate key is silently ignored; it does not replace the
/// existing item. Callers wanting a domain error check [contains](Collection::contains) first.
///
/// # Order
/// Iteration follows insertion order, except after [sort_by](Collection::sort_by).
#[derive(Clone, PartialEq, Eq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    /// Returns the items for which `predicate` holds, in collection order.
    ///
    /// The collection itself is not changed.
    pub fn filter<P>(&self, mut predicate: P) -> Vec<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(*item)).collect()
    }

    /// Sorts the items in place by gnome sort.
    ///
    /// `in_order(a, b)` returns true if `a` may precede `b`,
    /// i.e. a non-strict "less or equal" under the chosen ordering.
    /// After sorting, `in_order` holds for every adjacent pair.
    ///
    /// The sort is stable for a consistent predicate and runs in O(n^2) time in the worst case.
    ///
    /// ```
    /// # use lur::collection::Collection;
    /// # use lur::interface::Keyed;
    /// struct Item(u32, &'static str);
    /// impl Keyed for Item {
    ///     type Key = u32;
    ///     fn key(&self) -> &u32 {
    ///         &self.0
    ///     }
    /// }
    ///
    /// let mut c: Collection<Item> = [Item(1, "b"), Item(2, "a"), Item(3, "c")].into_iter().collect();
    /// c.sort_by(|a, b| a.1 <= b.1);
    ///
    /// let keys: Vec<u32> = c.iter().map(|item| item.0).collect();
    /// assert_eq!(vec![2, 1, 3], keys);
    /// ```
    pub fn sort_by<P>(&mut self, mut in_order: P)
    where
        P: FnMut(&T, &T) -> bool,
    {
        let mut swaps = 0usize;
        let mut i = 1;
        while i < self.items.len() {
            if i > 0 && !in_order(&self.items[i - 1], &self.items[i]) {
                self.items.swap(i - 1, i);
                swaps += 1;
                i -= 1;
            } else {
                i += 1;
            }
        }
        trace!(len = self.items.len(), swaps, "sort");
    }
}

impl<T: Keyed> Collection<T> {
    fn position(&self, key: &T::Key) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    /// Returns the item with `key`, if any.
    pub fn find(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Returns the item with `key` mutably, if any.
    ///
    /// The key of the returned item must not be changed to one held by another item.
    pub fn find_mut(&mut self, key: &T::Key) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.key() == key)
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.position(key).is_some()
    }

    /// Appends `item` unless its key is already present.
    ///
    /// # Return
    /// true if the item was appended, false if the key already existed.
    pub fn add(&mut self, item: T) -> bool {
        if self.contains(item.key()) {
            trace!("add ignored for a duplicate key");
            return false;
        }
        self.items.push(item);
        true
    }

    /// Removes and returns the item with `key`.
    ///
    /// [None] is returned if no item holds the key.
    pub fn remove(&mut self, key: &T::Key) -> Option<T> {
        let i = self.position(key)?;
        Some(self.items.remove(i))
    }

    /// Replaces all items.
    ///
    /// Items with a key seen earlier in `items` are dropped.
    pub fn set_items<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.items.clear();
        self.extend(items);
    }
}

impl<T> Collection<T>
where
    T: Keyed,
    T::Key: std::fmt::Display,
{
    /// Puts `item` in place of the item holding `key` and returns the old item.
    ///
    /// The position in the collection is kept.
    /// `item` may carry a different key.
    ///
    /// # Errors
    /// - [KeyNotFound](CollectionError::KeyNotFound) if no item holds `key`.
    /// - [DuplicateKey](CollectionError::DuplicateKey) if the key of `item` is held by another item.
    ///
    /// The collection is unchanged on error.
    pub fn replace(&mut self, key: &T::Key, item: T) -> Result<T, CollectionError> {
        let i = self
            .position(key)
            .ok_or_else(|| CollectionError::KeyNotFound(key.to_string()))?;
        if item.key() != key && self.contains(item.key()) {
            return Err(CollectionError::DuplicateKey(item.key().to_string()));
        }
        Ok(std::mem::replace(&mut self.items[i], item))
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: Keyed> Extend<T> for Collection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T: Keyed> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut c = Self::new();
        c.extend(iter);
        c
    }
}

impl<'c, T> IntoIterator for &'c Collection<T> {
    type Item = &'c T;
    type IntoIter = std::slice::Iter<'c, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> std::ops::Deref for Collection<T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.items
    }
}
