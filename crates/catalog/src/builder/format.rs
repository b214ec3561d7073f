use crate::models::Format;
use pgmirror_rdf::{TripleSet, vocab};

/// Every downloadable file of the book at `book_uri`, in record order.
///
/// Files are described indirectly: `book hasFormat file`, `file format m`,
/// `m value "mime/type"`. A file whose MIME type can't be resolved is left
/// out rather than failing the book.
pub(crate) fn formats(record: &TripleSet, book_uri: &str) -> Vec<Format> {
    record
        .objects(book_uri, |p| vocab::is_term(p, "hasFormat"))
        .filter_map(|file| match mime_type(record, file) {
            Some(mime_type) => Some(Format::new(file, mime_type)),
            None => {
                tracing::debug!(file, "Dropping format without a resolvable MIME type");
                None
            },
        })
        .collect()
}

fn mime_type<'a>(record: &'a TripleSet, file: &str) -> Option<&'a str> {
    let address = &record.first(file, |p| vocab::is_term(p, "format"))?.object;
    record.first(address, vocab::is_value).map(|t| t.object.as_str())
}
