//! Parser for trade date strings of the form `<day> <Mon> <year>`.
//!
//! The parser is lenient in the same places the trade feeds are: numeric
//! tokens fall back to 0 instead of failing, and an unknown month token is
//! read as December. Only a missing separator or a day that does not exist
//! on the calendar is reported as an error.

use crate::domain::calendar_date::CalendarDate;
use crate::domain::error::DateFormatError;

/// Three-letter month tokens accepted on input (case-sensitive).
pub const INPUT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month number for an input token; anything unrecognised maps to 12.
pub fn month_from_abbrev(token: &str) -> u32 {
    INPUT_MONTHS
        .iter()
        .position(|m| *m == token)
        .map(|i| i as u32 + 1)
        .unwrap_or(12)
}

/// Leading-integer parse: skips leading whitespace, accepts one sign, then
/// consumes digits. Returns 0 when no digits follow.
pub fn lenient_int(token: &str) -> i64 {
    let trimmed = token.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative { -value } else { value }
}

/// Parse `"3 Mar 2017"` into a [`CalendarDate`].
///
/// The day is the text before the first space, the month the text between
/// the first and second spaces, and the year everything after the second.
pub fn parse_trade_date(input: &str) -> Result<CalendarDate, DateFormatError> {
    let missing = || DateFormatError::MissingSeparator {
        input: input.to_string(),
    };

    let (day_str, rest) = input.split_once(' ').ok_or_else(missing)?;
    let (month_str, year_str) = rest.split_once(' ').ok_or_else(missing)?;

    let day = u32::try_from(lenient_int(day_str)).unwrap_or(0);
    let month = month_from_abbrev(month_str);
    let year = i32::try_from(lenient_int(year_str)).unwrap_or(0);

    CalendarDate::from_ymd(year, month, day).ok_or_else(|| DateFormatError::InvalidDate {
        input: input.to_string(),
        year,
        month,
        day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_date() {
        let d = parse_trade_date("3 Mar 2017").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2017, 3, 3));
    }

    #[test]
    fn parses_two_digit_day_and_leading_zero() {
        let d = parse_trade_date("27 Feb 2017").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2017, 2, 27));
        let d = parse_trade_date("01 Jan 1999").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (1999, 1, 1));
    }

    #[test]
    fn every_input_month_is_recognised() {
        for (i, token) in INPUT_MONTHS.iter().enumerate() {
            assert_eq!(month_from_abbrev(token), i as u32 + 1);
        }
    }

    #[test]
    fn unknown_month_defaults_to_december() {
        assert_eq!(month_from_abbrev("mar"), 12);
        assert_eq!(month_from_abbrev("Sept"), 12);
        assert_eq!(month_from_abbrev("July"), 12);
        let d = parse_trade_date("5 Foo 2017").unwrap();
        assert_eq!(d.month(), 12);
    }

    #[test]
    fn lenient_int_mirrors_atoi() {
        assert_eq!(lenient_int("42"), 42);
        assert_eq!(lenient_int("  2017"), 2017);
        assert_eq!(lenient_int("12abc"), 12);
        assert_eq!(lenient_int("-3"), -3);
        assert_eq!(lenient_int("+7"), 7);
        assert_eq!(lenient_int("abc"), 0);
        assert_eq!(lenient_int(""), 0);
    }

    #[test]
    fn year_keeps_leading_digits_of_trailing_text() {
        let d = parse_trade_date("3 Mar 2017 settlement").unwrap();
        assert_eq!(d.year(), 2017);
    }

    #[test]
    fn missing_separator_is_error() {
        assert!(matches!(
            parse_trade_date("3Mar2017"),
            Err(DateFormatError::MissingSeparator { .. })
        ));
        assert!(matches!(
            parse_trade_date("3 Mar"),
            Err(DateFormatError::MissingSeparator { .. })
        ));
        assert!(matches!(
            parse_trade_date(""),
            Err(DateFormatError::MissingSeparator { .. })
        ));
    }

    #[test]
    fn non_numeric_day_surfaces_as_invalid_date() {
        let err = parse_trade_date("x Mar 2017").unwrap_err();
        assert_eq!(
            err,
            DateFormatError::InvalidDate {
                input: "x Mar 2017".into(),
                year: 2017,
                month: 3,
                day: 0,
            }
        );
    }

    #[test]
    fn impossible_day_is_error() {
        assert!(matches!(
            parse_trade_date("31 Apr 2017"),
            Err(DateFormatError::InvalidDate { .. })
        ));
    }
}
