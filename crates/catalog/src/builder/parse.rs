//! Lenient scalar parsing for record literals.

use crate::consts;
use time::{Date, Month};

/// Parse the leading integer of `value`, ignoring anything after it.
///
/// `"1819"` and `"1819?"` both yield 1819, `"-50"` yields -50, while
/// `"c. 1800"` or an empty string yield `None`.
pub(crate) fn leading_integer(value: &str) -> Option<i64> {
    consts::LEADING_INTEGER_REGEX.captures(value)?.get(1)?.as_str().parse().ok()
}

/// Parse a `YYYY-MM-DD` prefix of `value` into a calendar date.
pub(crate) fn date(value: &str) -> Option<Date> {
    let captures = consts::DATE_REGEX.captures(value)?;
    let year: i32 = captures.get(1)?.as_str().parse().ok()?;
    let month: u8 = captures.get(2)?.as_str().parse().ok()?;
    let day: u8 = captures.get(3)?.as_str().parse().ok()?;
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1819", Some(1819))]
    #[case("  42 ", Some(42))]
    #[case("1819?", Some(1819))]
    #[case("-50", Some(-50))]
    #[case("+7", Some(7))]
    #[case("c. 1800", None)]
    #[case("", None)]
    #[case("99999999999999999999999", None)]
    fn test_leading_integer(#[case] value: &str, #[case] expected: Option<i64>) {
        assert_eq!(leading_integer(value), expected);
    }

    #[rstest]
    #[case("2008-06-27", Some((2008, Month::June, 27)))]
    #[case("2008-6-2T00:00:00", Some((2008, Month::June, 2)))]
    #[case("2008-02-30", None)]
    #[case("2008-13-01", None)]
    #[case("June 2008", None)]
    fn test_date(#[case] value: &str, #[case] expected: Option<(i32, Month, u8)>) {
        let expected = expected.map(|(y, m, d)| Date::from_calendar_date(y, m, d).unwrap());
        assert_eq!(date(value), expected);
    }
}
