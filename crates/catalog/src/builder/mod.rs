//! Reconstruction of a [`Book`] from one record's triples.

mod creator;
mod format;
mod parse;

pub use self::creator::creators;
use crate::consts::{self, DEFAULT_LANGUAGE};
use crate::error::{Error, ErrorKind, Result};
use crate::models::{Book, Format, epoch};
use exn::{OptionExt, ResultExt};
use pgmirror_rdf::{TripleSet, vocab};
use time::Date;
use tracing::instrument;

/// Runs the ordered selection queries that turn a record into a [`Book`].
///
/// Title, type and every bookshelf reference are mandatory; everything else
/// falls back to a default. Construction is all-or-nothing: [`build`](Self::build)
/// either returns a complete book or an error.
///
/// # Examples
///
/// ```
/// use pgmirror_catalog::BookBuilder;
/// use pgmirror_rdf::{TripleSet, vocab};
///
/// let book = "http://www.gutenberg.org/ebooks/15";
/// let record: TripleSet = [
///     (book, vocab::dc("title"), "Moby-Dick"),
///     (book, vocab::pg("type"), "http://www.gutenberg.org/ebooks/type/Text"),
/// ]
/// .into_iter()
/// .collect();
///
/// let book = BookBuilder::new(&record).unwrap().build().unwrap();
/// assert_eq!((book.id, book.title.as_str(), book.kind.as_str()), (15, "Moby-Dick", "Text"));
/// ```
#[derive(Debug)]
pub struct BookBuilder<'a> {
    record: &'a TripleSet,
    creator_scope: &'a TripleSet,
    uri: &'a str,
    id: u64,
}

impl<'a> BookBuilder<'a> {
    /// Locate the record's canonical `ebooks/{id}` subject.
    ///
    /// # Errors
    ///
    /// [`MissingSubject`](ErrorKind::MissingSubject) if no triple is about a
    /// canonical ebook address.
    pub fn new(record: &'a TripleSet) -> Result<Self> {
        let uri = record
            .find_subject(|subject| consts::BOOK_URI_REGEX.is_match(subject))
            .ok_or_raise(|| ErrorKind::MissingSubject)?;
        let digits = consts::BOOK_URI_REGEX
            .captures(uri)
            .and_then(|captures| captures.get(1))
            .map(|digits| digits.as_str())
            .ok_or_raise(|| ErrorKind::MissingSubject)?;
        let id = digits.parse::<u64>().or_raise(|| ErrorKind::ParseError {
            field: "id",
            value: digits.to_string(),
        })?;
        Ok(Self {
            record,
            creator_scope: record,
            uri,
            id,
        })
    }

    /// Resolve creators from `scope` instead of the record itself.
    ///
    /// Creator references are collected regardless of subject, so a scope
    /// holding several records yields every one of their creators.
    pub fn with_creator_scope(mut self, scope: &'a TripleSet) -> Self {
        self.creator_scope = scope;
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn uri(&self) -> &str {
        self.uri
    }

    /// # Errors
    ///
    /// Returns an error if:
    /// - the title or type is missing,
    /// - a bookshelf reference has no value,
    /// - a creator can't be resolved (see [`creators`]).
    #[instrument(name = "build_book", skip(self), fields(record_id = self.id))]
    pub fn build(self) -> Result<Book> {
        Ok(Book {
            id: self.id,
            title: self.title()?,
            kind: self.kind()?,
            formats: self.formats(),
            bookshelves: self.bookshelves()?,
            download_count: self.download_count(),
            issued: self.issued(),
            creators: creators(self.creator_scope)?,
            language: self.language(),
            description: self.description(),
            rights: self.rights(),
        })
    }

    fn property(&self, local: &'static str) -> Option<&'a str> {
        self.record.first(self.uri, |p| vocab::is_term(p, local)).map(|t| t.object.as_str())
    }

    fn title(&self) -> Result<String> {
        self.property("title").map(str::to_string).ok_or_raise(|| ErrorKind::MissingField("title"))
    }

    fn kind(&self) -> Result<String> {
        let mut objects = self.record.objects(self.uri, vocab::is_type).peekable();
        let first = *objects.peek().ok_or_raise(|| ErrorKind::MissingField("type"))?;
        objects.find_map(vocab::local_name).map(str::to_string).ok_or_raise(|| ErrorKind::ParseError {
            field: "type",
            value: first.to_string(),
        })
    }

    fn formats(&self) -> Vec<Format> {
        format::formats(self.record, self.uri)
    }

    fn bookshelves(&self) -> Result<Vec<String>> {
        self.record
            .objects(self.uri, |p| vocab::is_term(p, "bookshelf"))
            .map(|address| {
                self.value_of(address).map(str::to_string).ok_or_raise(|| ErrorKind::UnresolvedReference {
                    field: "bookshelf",
                    address: address.to_string(),
                })
            })
            .collect()
    }

    fn download_count(&self) -> u64 {
        self.property("downloads")
            .and_then(parse::leading_integer)
            .and_then(|count| u64::try_from(count).ok())
            .unwrap_or(0)
    }

    fn issued(&self) -> Date {
        match self.property("issued") {
            Some(value) => parse::date(value).unwrap_or_else(|| {
                tracing::debug!(value, "Unparseable issued date; defaulting to epoch");
                epoch()
            }),
            None => epoch(),
        }
    }

    fn language(&self) -> String {
        self.property("language")
            .and_then(|address| self.value_of(address))
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string()
    }

    fn description(&self) -> String {
        self.property("description").unwrap_or_default().to_string()
    }

    fn rights(&self) -> String {
        self.property("rights").unwrap_or(self.uri).to_string()
    }

    /// Follow `address` to its `rdf:value`.
    fn value_of(&self, address: &str) -> Option<&'a str> {
        self.record.first(address, vocab::is_value).map(|t| t.object.as_str())
    }
}

impl TryFrom<&TripleSet> for Book {
    type Error = Error;
    fn try_from(record: &TripleSet) -> Result<Self> {
        BookBuilder::new(record)?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Creator;
    use pgmirror_rdf::vocab::{RDF, dc, pg};
    use time::Month;

    const BOOK: &str = "http://www.gutenberg.org/ebooks/15";

    fn value() -> String {
        format!("{RDF}value")
    }

    fn minimal() -> TripleSet {
        [
            (BOOK, dc("title"), "Moby-Dick"),
            (BOOK, pg("type"), "http://www.gutenberg.org/ebooks/type/Text"),
            (BOOK, pg("downloads"), "42"),
        ]
        .into_iter()
        .collect()
    }

    fn without(record: &TripleSet, predicate: &str) -> TripleSet {
        record.iter().filter(|t| t.predicate != predicate).cloned().collect()
    }

    #[test]
    fn minimal_record_uses_defaults() {
        let book = Book::try_from(&minimal()).unwrap();
        assert_eq!(
            book,
            Book {
                id: 15,
                title: "Moby-Dick".to_string(),
                kind: "Text".to_string(),
                formats: vec![],
                bookshelves: vec![],
                download_count: 42,
                issued: epoch(),
                creators: vec![],
                language: "en".to_string(),
                description: String::new(),
                rights: BOOK.to_string(),
            }
        );
    }

    #[test]
    fn missing_subject_fails() {
        let record: TripleSet = [("http://example.org/thing", dc("title"), "Nope")].into_iter().collect();
        let err = BookBuilder::new(&record).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingSubject);
    }

    #[test]
    fn missing_title_fails() {
        let record = without(&minimal(), &dc("title"));
        let err = Book::try_from(&record).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingField("title"));
    }

    #[test]
    fn missing_type_fails() {
        let record = without(&minimal(), &pg("type"));
        let err = Book::try_from(&record).unwrap_err();
        assert_eq!(*err, ErrorKind::MissingField("type"));
    }

    #[test]
    fn type_from_rdf_type_node() {
        let mut record = without(&minimal(), &pg("type"));
        record.push((BOOK, format!("{RDF}type"), "http://www.gutenberg.org/2009/pgterms/ebook"));
        assert_eq!(Book::try_from(&record).unwrap().kind, "ebook");
    }

    #[test]
    fn type_skips_objects_without_a_segment() {
        let mut record = without(&minimal(), &pg("type"));
        record.push((BOOK, dc("type"), "_:b0"));
        record.push((BOOK, format!("{RDF}type"), "http://www.gutenberg.org/2009/pgterms/ebook"));
        assert_eq!(Book::try_from(&record).unwrap().kind, "ebook");

        let mut record = without(&minimal(), &pg("type"));
        record.push((BOOK, dc("type"), "_:b0"));
        let err = Book::try_from(&record).unwrap_err();
        assert!(matches!(&*err, ErrorKind::ParseError { field: "type", .. }));
    }

    #[test]
    fn first_title_wins() {
        let mut record = minimal();
        record.push((BOOK, dc("title"), "Moby Dick; Or, The Whale"));
        assert_eq!(Book::try_from(&record).unwrap().title, "Moby-Dick");
    }

    #[test]
    fn bookshelves_resolve_in_order() {
        let mut record = minimal();
        record.extend([
            (BOOK, pg("bookshelf"), "_:shelf1".to_string()),
            (BOOK, pg("bookshelf"), "_:shelf2".to_string()),
            ("_:shelf2", value(), "Adventure".to_string()),
            ("_:shelf1", value(), "Best Books Ever Listings".to_string()),
        ]);
        let book = Book::try_from(&record).unwrap();
        assert_eq!(book.bookshelves, ["Best Books Ever Listings", "Adventure"]);
    }

    #[test]
    fn unresolved_bookshelf_fails() {
        let mut record = minimal();
        record.push((BOOK, pg("bookshelf"), "_:shelf1"));
        let err = Book::try_from(&record).unwrap_err();
        assert_eq!(
            *err,
            ErrorKind::UnresolvedReference {
                field: "bookshelf",
                address: "_:shelf1".to_string()
            }
        );
    }

    #[test]
    fn optional_fields_are_read() {
        let mut record = minimal();
        record.extend([
            (BOOK, dc("issued"), "2001-07-01".to_string()),
            (BOOK, dc("language"), "_:lang".to_string()),
            ("_:lang", value(), "fr".to_string()),
            (BOOK, dc("description"), "A whale of a tale".to_string()),
            (BOOK, dc("rights"), "Public domain in the USA.".to_string()),
        ]);
        let book = Book::try_from(&record).unwrap();
        assert_eq!(book.issued, Date::from_calendar_date(2001, Month::July, 1).unwrap());
        assert_eq!(book.language, "fr");
        assert_eq!(book.description, "A whale of a tale");
        assert_eq!(book.rights, "Public domain in the USA.");
    }

    #[test]
    fn malformed_optional_fields_default() {
        let mut record = without(&minimal(), &pg("downloads"));
        record.extend([
            (BOOK, pg("downloads"), "many".to_string()),
            (BOOK, dc("issued"), "sometime".to_string()),
            (BOOK, dc("language"), "_:lang".to_string()),
        ]);
        let book = Book::try_from(&record).unwrap();
        assert_eq!(book.download_count, 0);
        assert_eq!(book.issued, epoch());
        assert_eq!(book.language, "en");
    }

    #[test]
    fn creators_default_to_record_scope() {
        let agent = "http://www.gutenberg.org/2009/agents/9";
        let mut record = minimal();
        record.extend([(BOOK, dc("creator"), agent), (agent, pg("name"), "Melville, Herman")]);
        let book = Book::try_from(&record).unwrap();
        assert_eq!(book.creators.iter().map(Creator::address).collect::<Vec<_>>(), [agent]);
    }

    #[test]
    fn explicit_creator_scope() {
        let other = "http://www.gutenberg.org/2009/agents/42";
        let scope: TripleSet = [
            ("http://www.gutenberg.org/ebooks/16", dc("creator"), other),
            (other, pg("name"), "Barrie, J. M. (James Matthew)"),
        ]
        .into_iter()
        .collect();
        let record = minimal();
        let builder = BookBuilder::new(&record).unwrap().with_creator_scope(&scope);
        assert_eq!(builder.id(), 15);
        assert_eq!(builder.uri(), BOOK);
        let book = builder.build().unwrap();
        assert_eq!(book.creators[0].id, 42);
    }

    #[test]
    fn unresolvable_creator_fails_the_book() {
        let mut record = minimal();
        record.push((BOOK, dc("creator"), "http://www.gutenberg.org/2009/agents/9"));
        assert!(Book::try_from(&record).is_err());
    }

    #[test]
    fn https_subject_is_canonical() {
        let uri = "https://www.gutenberg.org/ebooks/1342";
        let record: TripleSet = [
            (uri, dc("title"), "Pride and Prejudice"),
            (uri, format!("{RDF}type"), "http://www.gutenberg.org/2009/pgterms/ebook"),
        ]
        .into_iter()
        .collect();
        let builder = BookBuilder::new(&record).unwrap();
        assert_eq!(builder.uri(), uri);
        let book = builder.build().unwrap();
        assert_eq!(book.id, 1342);
        assert_eq!(book.rights, uri);
    }
}
