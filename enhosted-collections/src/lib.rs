//! Collections for enhosted console entities.
//!
//! [`IndexedList`] keeps entities (API keys, destinations, domains) in the
//! order the user created them while refusing two entities with the same key.

mod indexed_list;

pub use indexed_list::{IndexedList, Keyed};

/// Result type alias using the crate's error type.
pub type CollectionResult<T> = std::result::Result<T, CollectionError>;

/// Errors raised by collection operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    #[error("duplicate key: {key}")]
    DuplicateKey { key: String },
}
