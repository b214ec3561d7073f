use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Language assumed when a record doesn't declare one.
pub const DEFAULT_LANGUAGE: &str = "en";

regex!(BOOK_URI_REGEX, r"gutenberg\.org/ebooks/(\d+)$");
regex!(TRAILING_DIGITS_REGEX, r"(\d+)$");
regex!(LEADING_INTEGER_REGEX, r"^\s*([+-]?\d+)");
regex!(DATE_REGEX, r"^\s*(-?\d{4})-(\d{1,2})-(\d{1,2})");
