//! Synchronization Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Record-level failures ([`Parse`](ErrorKind::Parse),
//! [`Reconstruct`](ErrorKind::Reconstruct)) are reported per entry and never
//! end a pass; everything else is fatal to the pass that raised it.

use derive_more::{Display, Error};

/// A synchronization error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for synchronization operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The mirror answered with a non-success status.
    #[display("archive request failed with HTTP status {_0}")]
    Status(#[error(not(source))] u16),
    /// The archive could not be requested (connection, TLS, DNS, ...).
    #[display("failed to fetch archive")]
    Fetch,
    /// The mirror didn't answer within the configured timeout.
    #[display("timed out fetching archive")]
    Timeout,
    /// Decompression or unpacking failed. Don't retry with the same input.
    #[display("invalid or corrupted archive")]
    Archive,
    /// An I/O operation failed.
    #[display("I/O error")]
    Io,
    /// One record's markup could not be parsed into triples.
    #[display("record {_0} is not valid RDF/XML")]
    Parse(#[error(not(source))] u64),
    /// One record's triples don't describe a complete book.
    #[display("record {_0} could not be reconstructed")]
    Reconstruct(#[error(not(source))] u64),
    /// The blocking ingestion task panicked or lost its consumer.
    #[display("ingestion pipeline stopped unexpectedly")]
    Pipeline,
    /// The catalog rejected a write.
    #[display("catalog error")]
    Catalog,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status(status) => *status == 429 || *status >= 500,
            Self::Fetch | Self::Timeout | Self::Io => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::Status(503), true)]
    #[case(ErrorKind::Status(429), true)]
    #[case(ErrorKind::Status(404), false)]
    #[case(ErrorKind::Fetch, true)]
    #[case(ErrorKind::Timeout, true)]
    #[case(ErrorKind::Archive, false)]
    #[case(ErrorKind::Parse(15), false)]
    #[case(ErrorKind::Pipeline, false)]
    fn error_kind_retryable(#[case] kind: ErrorKind, #[case] expected: bool) {
        assert_eq!(kind.is_retryable(), expected);
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::Status(404).to_string(), "archive request failed with HTTP status 404");
        assert_eq!(ErrorKind::Reconstruct(15).to_string(), "record 15 could not be reconstructed");
    }
}
