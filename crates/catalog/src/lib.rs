//! Reconstruction of Gutenberg catalog entities from record triples.
//!
//! A record's [`TripleSet`] is turned into a [`Book`](models::Book) by
//! [`BookBuilder`], which delegates to the creator and format builders.
//! Title, type and bookshelf references are mandatory; every other field
//! degrades to a documented default, so one sloppy record costs that record
//! and nothing else.

mod builder;
mod consts;
pub mod error;
pub mod models;

use pgmirror_rdf::TripleSet;
use tracing::instrument;

pub use crate::builder::{BookBuilder, creators};
pub use crate::consts::DEFAULT_LANGUAGE;
use crate::error::Result;
use crate::models::Book;

/// Easy, top-level entrypoint for reconstructing a [`Book`] from one
/// record's triples, resolving creators from the same record.
#[instrument(skip(record), fields(triples = record.len()))]
pub fn build(record: &TripleSet) -> Result<Book> {
    BookBuilder::new(record)?.build()
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use pgmirror_rdf::vocab::{dc, pg};

    #[test]
    fn serializes_with_catalog_field_names() {
        let book = "http://www.gutenberg.org/ebooks/15";
        let record: TripleSet = [
            (book, dc("title"), "Moby-Dick"),
            (book, pg("type"), "http://www.gutenberg.org/ebooks/type/Text"),
            (book, dc("issued"), "2001-07-01"),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_value(build(&record).unwrap()).unwrap();
        assert_eq!(json["type"], "Text");
        assert_eq!(json["downloadCount"], 0);
        assert_eq!(json["issued"], "2001-07-01");
    }
}
