//! A movie rental shop built on [ActionHistory](crate::history::ActionHistory) and
//! [Collection](crate::collection::Collection).
//!
//! - [record]: the records stored by the shop.
//! - [store]: one collection per record type, and the primitive mutators used as bound actions.
//! - [shop]: business operations which validate, mutate, and record their inverses.
//!
//! ```
//! use lur::rental::record::{Client, Movie};
//! use lur::rental::shop::ShopBuilder;
//! use chrono::NaiveDate;
//!
//! let mut shop = ShopBuilder::new()
//!     .client(Client::new("213", "Mirel"))
//!     .movie(Movie::new("566", "Cars", "life", "animation"))
//!     .build();
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
//! let rental_id = shop.rent_movie("566", "213", day(1), day(10)).unwrap();
//! assert_eq!(1, shop.store().rentals().len());
//!
//! shop.undo().unwrap();
//! assert!(shop.store().rentals().find(&rental_id).is_none());
//!
//! shop.redo().unwrap();
//! assert!(shop.store().rentals().find(&rental_id).is_some());
//! ```
pub mod record;
pub mod shop;
pub mod store;

use crate::error::{CollectionError, HistoryError};
use record::DateError;
use thiserror::Error;

/// The kind of a record, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Client,
    Movie,
    Rental,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecordKind::Client => "Client",
            RecordKind::Movie => "Movie",
            RecordKind::Rental => "Rental",
        };
        f.write_str(s)
    }
}

/// Errors from the primitive store mutators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: RecordKind, id: String },

    #[error(transparent)]
    Collection(#[from] CollectionError),
}

impl StoreError {
    pub(crate) fn not_found(kind: RecordKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Errors from [Shop](shop::Shop) operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShopError {
    #[error("{kind} '{id}' already exists")]
    DuplicateId { kind: RecordKind, id: String },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: RecordKind, id: String },

    #[error("{kind} '{id}' can't be removed as it has a rental in process")]
    ActiveRental { kind: RecordKind, id: String },

    #[error("Client '{0}' is not worthy of any more rentals")]
    ClientNotWorthy(String),

    #[error("Movie '{0}' is not available yet")]
    MovieUnavailable(String),

    #[error("Rental '{0}' was already returned")]
    AlreadyReturned(String),

    #[error(transparent)]
    InvalidDates(#[from] DateError),

    #[error(transparent)]
    History(#[from] HistoryError<StoreError>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ShopError {
    pub(crate) fn not_found(kind: RecordKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Returns true if the error is an undo or redo at a history boundary.
    ///
    /// Such errors are informational; the shop state is unchanged.
    pub fn is_history_boundary(&self) -> bool {
        matches!(self, Self::History(e) if e.is_boundary())
    }
}
