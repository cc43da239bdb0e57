//! Calendar date value type and its display format.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::fmt;

/// Month names used when rendering dates in reports. July and September are
/// deliberately longer than their three-letter input forms.
pub const DISPLAY_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "July", "Aug", "Sept", "Oct", "Nov", "Dec",
];

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A proleptic Gregorian calendar day. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Returns `None` unless the triple names a real day in years 1..=9999.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day).map(CalendarDate)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Shift forward by `days`. Callers only ever jump a handful of days,
    /// which cannot leave chrono's range from a year <= 9999.
    pub fn add_days(&self, days: u64) -> Self {
        CalendarDate(self.0 + Days::new(days))
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    fn month0(&self) -> usize {
        self.0.month0() as usize
    }
}

/// `<day> <month> <yyyy>`, day without leading zero, e.g. `4 Sept 2017`.
impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = DISPLAY_MONTHS[self.month0()];
        write!(f, "{} {} {:04}", self.day(), month, self.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn from_ymd_rejects_impossible_days() {
        assert!(CalendarDate::from_ymd(2017, 2, 30).is_none());
        assert!(CalendarDate::from_ymd(2017, 3, 0).is_none());
        assert!(CalendarDate::from_ymd(2017, 13, 1).is_none());
        assert!(CalendarDate::from_ymd(0, 1, 1).is_none());
        assert!(CalendarDate::from_ymd(10_000, 1, 1).is_none());
    }

    #[test]
    fn weekday_of_known_dates() {
        assert_eq!(date(2017, 3, 3).weekday(), Weekday::Fri);
        assert_eq!(date(2017, 3, 4).weekday(), Weekday::Sat);
        assert_eq!(date(2000, 2, 29).weekday(), Weekday::Tue);
    }

    #[test]
    fn add_days_crosses_month_and_year() {
        assert_eq!(date(2017, 2, 28).add_days(1), date(2017, 3, 1));
        assert_eq!(date(2016, 12, 31).add_days(2), date(2017, 1, 2));
    }

    #[test]
    fn display_uses_long_july_and_sept() {
        assert_eq!(date(2017, 3, 3).to_string(), "3 Mar 2017");
        assert_eq!(date(2017, 7, 14).to_string(), "14 July 2017");
        assert_eq!(date(2017, 9, 4).to_string(), "4 Sept 2017");
        assert_eq!(date(987, 12, 1).to_string(), "1 Dec 0987");
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(date(2017, 3, 10) > date(2017, 3, 3));
        assert!(date(2017, 1, 31) < date(2017, 2, 1));
    }
}
