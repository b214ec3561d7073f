//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Every error in this crate is fatal to one record only: the caller is
//! expected to log it against the record id and move on.

use derive_more::{Display, Error};

/// A reconstruction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for reconstruction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No triple has a canonical `ebooks/{id}` subject.
    #[display("record has no canonical ebook subject")]
    MissingSubject,
    /// A required field could not be found in the record.
    #[display("missing required field: {_0}")]
    MissingField(#[error(not(source))] &'static str),
    /// A field was found but could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The offending value.
        value: String,
    },
    /// A field references another resource that the record never describes.
    #[display("unresolved {field} reference: {address}")]
    UnresolvedReference {
        /// The field holding the reference.
        field: &'static str,
        /// The address that could not be resolved.
        address: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The triples are either complete or they're not.
        false
    }
}
