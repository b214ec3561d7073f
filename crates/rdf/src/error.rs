//! RDF Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An RDF error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for RDF operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The record markup is not well-formed RDF/XML. Don't retry with the
    /// same input.
    #[display("malformed RDF/XML")]
    Syntax,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A record either parses or it doesn't.
        false
    }
}
