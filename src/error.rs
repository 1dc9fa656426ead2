//! Error types for the uncable library.

use thiserror::Error;

/// Result type alias for uncable operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for uncable operations.
///
/// Only the metadata table parser fails hard: a document whose metadata
/// region cannot be located or validated must be rejected as a whole,
/// because every exception-table lookup depends on a correctly identified
/// document. Field extractors never fail; they degrade to empty or absent
/// values instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No bounded metadata table region exists in the page.
    #[error("metadata table not found")]
    TableNotFound,

    /// The metadata table region holds an unexpected number of fields.
    #[error("malformed metadata table: expected {expected} fields, found {found}")]
    MalformedTable { expected: usize, found: usize },

    /// The identifier parsed from the metadata table differs from the
    /// identifier the caller supplied, even after canonical remapping.
    #[error("identifier mismatch: caller supplied \"{expected}\", table holds \"{found}\"")]
    IdentifierMismatch { expected: String, found: String },
}
