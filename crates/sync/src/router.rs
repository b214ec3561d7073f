//! Entry Routing
//!
//! Decides, per archive entry, whether it is a catalog record worth parsing.
//! Whatever the decision, the entry's bytes are always consumed before the
//! router returns so the surrounding tar stream stays aligned.

use crate::archive::{EntryHeader, EntryKind};
use crate::error::{Error, ErrorKind, Result};
use exn::ResultExt;
use pgmirror_catalog::models::Book;
use pgmirror_rdf::TripleSet;
use regex::Regex;
use std::collections::HashSet;
use std::io::Read;
use std::sync::LazyLock;

/// `…/pg15.rdf` (or the older flat `15.rdf`); the digits are the record ID.
static RECORD_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|/)(?:pg)?(\d+)\.rdf$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Directories, links, and other non-regular entries.
    NotAFile,
    /// A regular file that isn't named like a catalog record.
    UnmatchedName,
    /// Record-shaped name whose digits don't fit an ID.
    UnparseableId,
    /// Placeholder records the feed is known to carry.
    IgnoreListed(u64),
}

#[derive(Debug)]
pub enum Routed {
    Ignored(IgnoreReason),
    /// A record that failed to parse or reconstruct; the pass carries on.
    Skipped { record_id: u64, error: Error },
    Built(Box<Book>),
}

#[derive(Debug, Clone, Default)]
pub struct EntryRouter {
    ignore: HashSet<u64>,
}

impl EntryRouter {
    pub fn new(ignore: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ignore: ignore.into_iter().collect(),
        }
    }

    pub fn is_ignored(&self, record_id: u64) -> bool {
        self.ignore.contains(&record_id)
    }

    /// Work out the record ID for an entry, or why it isn't a record.
    pub fn classify(&self, header: &EntryHeader) -> std::result::Result<u64, IgnoreReason> {
        if header.kind != EntryKind::File {
            return Err(IgnoreReason::NotAFile);
        }
        let digits = RECORD_NAME_REGEX
            .captures(&header.path)
            .and_then(|captures| captures.get(1))
            .ok_or(IgnoreReason::UnmatchedName)?;
        let record_id = digits.as_str().parse::<u64>().map_err(|_| IgnoreReason::UnparseableId)?;
        if self.is_ignored(record_id) {
            return Err(IgnoreReason::IgnoreListed(record_id));
        }
        Ok(record_id)
    }

    /// Route one entry, consuming `stream` to its end.
    ///
    /// Only failures to drain the stream are returned as errors: they leave
    /// the archive unreadable and must end the pass.
    pub fn route<R: Read>(&self, header: &EntryHeader, stream: &mut R) -> Result<Routed> {
        let routed = match self.classify(header) {
            Ok(record_id) => self.build(record_id, &mut *stream),
            Err(reason) => Routed::Ignored(reason),
        };
        std::io::copy(stream, &mut std::io::sink()).or_raise(|| ErrorKind::Io)?;
        Ok(routed)
    }

    fn build<R: Read>(&self, record_id: u64, stream: R) -> Routed {
        let book = TripleSet::read_rdfxml(stream)
            .or_raise(|| ErrorKind::Parse(record_id))
            .and_then(|record| pgmirror_catalog::build(&record).or_raise(|| ErrorKind::Reconstruct(record_id)));
        match book {
            Ok(book) => Routed::Built(Box::new(book)),
            Err(error) => Routed::Skipped { record_id, error },
        }
    }
}
