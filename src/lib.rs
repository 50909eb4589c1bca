//! A linear undo-redo framework built on reversible actions.
//!
//! Every change is recorded as a pair of actions, one reverting it and one re-applying it.
//! [ActionHistory](crate::history::ActionHistory) keeps those pairs in a single linear
//! sequence with a cursor; recording a new change discards everything that was undone.
//! Several pairs can be grouped into a [Compound](crate::operation::Compound) so that a
//! whole transaction takes one history slot.
//!
//! [Collection](crate::collection::Collection) is the keyed, ordered container the
//! recorded actions usually change.
//!
//! Example
//!
//! ```rust
//! use lur::prelude::*;
//!
//! #[derive(Clone)]
//! struct Item(u32, String);
//!
//! impl Keyed for Item {
//!     type Key = u32;
//!     fn key(&self) -> &u32 {
//!         &self.0
//!     }
//! }
//!
//! fn add(c: &mut Collection<Item>, item: Item) -> Result<(), String> {
//!     c.add(item);
//!     Ok(())
//! }
//!
//! fn remove(c: &mut Collection<Item>, key: u32) -> Result<(), String> {
//!     c.remove(&key).map(drop).ok_or(format!("item {} not found", key))
//! }
//!
//! fn main() {
//!     let mut items = Collection::new();
//!     let mut history = ActionHistory::new();
//!
//!     let item = Item(1, "apple".to_string());
//!     items.add(item.clone());
//!     history.record(Reversible::bind(remove, 1, add, item));
//!     assert_eq!(1, items.len());
//!
//!     history.undo(&mut items).unwrap();
//!     assert!(items.is_empty());
//!
//!     history.redo(&mut items).unwrap();
//!     assert_eq!("apple", items.find(&1).unwrap().1);
//! }
//! ```
pub mod action;
pub mod collection;
pub mod error;
pub mod history;
pub mod interface;
pub mod operation;
pub mod prelude;
pub mod rental;
