pub use crate::action::{Action, Bound, BoundAction};
pub use crate::collection::Collection;
pub use crate::error::{CollectionError, HistoryError};
pub use crate::history::ActionHistory;
pub use crate::interface::{Keyed, Undoable};
pub use crate::operation::{Compound, Reversible};
