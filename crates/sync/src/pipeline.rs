//! Blocking half of a pass: archive body in, books out.

use crate::archive::{self, EntryHeader};
use crate::error::{ErrorKind, Result};
use crate::router::{EntryRouter, Routed};
use crate::synchronizer::PassReport;
use exn::ResultExt;
use pgmirror_catalog::models::Book;
use std::io::Read;

/// Decode `body` and route every entry, handing built books to `deliver`.
///
/// Entries are processed strictly in archive order. Returns early with
/// [`Pipeline`](ErrorKind::Pipeline) if `deliver` reports that nobody is
/// listening anymore.
pub(crate) fn run<R: Read>(body: R, router: &EntryRouter, mut deliver: impl FnMut(Book) -> bool) -> Result<PassReport> {
    let mut archive = archive::open(body)?;
    let mut report = PassReport::default();

    for entry in archive.entries().or_raise(|| ErrorKind::Archive)? {
        let mut entry = entry.or_raise(|| ErrorKind::Archive)?;
        let header = EntryHeader::from_entry(&entry)?;
        report.entries += 1;

        match router.route(&header, &mut entry)? {
            Routed::Ignored(reason) => {
                report.ignored += 1;
                tracing::trace!(entry = %header.path, ?reason, "Ignoring archive entry");
            }
            Routed::Skipped { record_id, error } => {
                report.skipped += 1;
                tracing::warn!(record_id, entry = %header.path, error = ?error, "Skipping unusable record");
            }
            Routed::Built(book) => {
                report.built += 1;
                if !deliver(*book) {
                    exn::bail!(ErrorKind::Pipeline);
                }
            }
        }
    }

    Ok(report)
}
