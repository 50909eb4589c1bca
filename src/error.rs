use thiserror::Error;

/// Errors returned by [ActionHistory](crate::history::ActionHistory).
///
/// `E` is the error type of the recorded actions.
/// It is carried unchanged in [Action](HistoryError::Action).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoryError<E> {
    #[error("No more operations to be undone")]
    NoMoreUndo,

    #[error("No more operations to be redone")]
    NoMoreRedo,

    #[error("Recorded action failed: {0}")]
    Action(#[source] E),
}

impl<E> HistoryError<E> {
    /// Returns true if the error comes from a history boundary rather than an action.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::NoMoreUndo | Self::NoMoreRedo)
    }
}

/// Errors returned by [Collection](crate::collection::Collection).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("Item '{0}' not found")]
    KeyNotFound(String),

    #[error("Item '{0}' already exists")]
    DuplicateKey(String),
}
