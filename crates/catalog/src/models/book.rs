use super::{Creator, Format};
use time::{Date, OffsetDateTime};

/// A catalog entry, reconstructed from one record.
///
/// Only ever constructed whole: see [`BookBuilder`](crate::BookBuilder).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Book {
    /// Ebook number (extracted from the canonical `ebooks/{id}` address)
    pub id: u64,
    pub title: String,
    /// Last path segment of the record's type, e.g. `Text` or `ebook`
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// Downloadable files, in record order
    pub formats: Vec<Format>,
    /// Bookshelf names, in record order
    pub bookshelves: Vec<String>,
    /// Recent download count; 0 when the record doesn't say
    pub download_count: u64,
    /// Release date; the Unix epoch when the record doesn't say
    pub issued: Date,
    pub creators: Vec<Creator>,
    /// Language code; `en` when the record doesn't say
    pub language: String,
    pub description: String,
    /// Rights statement; the book's own address when the record doesn't say,
    /// which never grants more than the catalog itself does.
    pub rights: String,
}

/// Release date used when a record has none.
pub(crate) fn epoch() -> Date {
    OffsetDateTime::UNIX_EPOCH.date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn epoch_is_1970() {
        assert_eq!(epoch(), Date::from_calendar_date(1970, Month::January, 1).unwrap());
    }
}
