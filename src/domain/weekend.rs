//! Currency-specific weekend calendars and settlement date adjustment.

use std::collections::HashMap;

use chrono::Weekday;

use crate::domain::calendar_date::CalendarDate;

/// The set of non-business weekdays for one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekendRule {
    days: [bool; 7],
}

impl WeekendRule {
    pub fn new(weekdays: &[Weekday]) -> Self {
        let mut days = [false; 7];
        for wd in weekdays {
            days[wd.num_days_from_monday() as usize] = true;
        }
        Self { days }
    }

    pub fn saturday_sunday() -> Self {
        Self::new(&[Weekday::Sat, Weekday::Sun])
    }

    pub fn friday_saturday() -> Self {
        Self::new(&[Weekday::Fri, Weekday::Sat])
    }

    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        self.days[weekday.num_days_from_monday() as usize]
    }

    /// True when every day of the week is a weekend day; such a rule has no
    /// business day to roll to.
    pub fn covers_whole_week(&self) -> bool {
        self.days.iter().all(|d| *d)
    }

    /// Days from `weekday` to the first business day: 0 on a business day,
    /// otherwise the remaining length of the weekend block.
    pub fn days_to_business_day(&self, weekday: Weekday) -> u64 {
        let mut offset = 0;
        let mut wd = weekday;
        while offset < 7 && self.is_weekend(wd) {
            offset += 1;
            wd = wd.succ();
        }
        offset
    }

    pub fn weekdays(&self) -> Vec<Weekday> {
        let mut out = Vec::new();
        let mut wd = Weekday::Mon;
        for &is_weekend in &self.days {
            if is_weekend {
                out.push(wd);
            }
            wd = wd.succ();
        }
        out
    }
}

/// Lookup table from currency code to weekend rule.
///
/// Currencies without an entry use the default Saturday/Sunday weekend.
/// AED and SAR settle on a Friday/Saturday weekend out of the box.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekendCalendar {
    rules: HashMap<String, WeekendRule>,
    default_rule: WeekendRule,
}

impl Default for WeekendCalendar {
    fn default() -> Self {
        Self::empty()
            .with_rule("AED", WeekendRule::friday_saturday())
            .with_rule("SAR", WeekendRule::friday_saturday())
    }
}

impl WeekendCalendar {
    /// A calendar where every currency uses the Saturday/Sunday weekend.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
            default_rule: WeekendRule::saturday_sunday(),
        }
    }

    /// Add or replace the rule for `currency`.
    pub fn with_rule(mut self, currency: &str, rule: WeekendRule) -> Self {
        self.rules.insert(currency.to_string(), rule);
        self
    }

    pub fn rule_for(&self, currency: &str) -> &WeekendRule {
        self.rules.get(currency).unwrap_or(&self.default_rule)
    }

    pub fn is_business_day(&self, date: CalendarDate, currency: &str) -> bool {
        !self.rule_for(currency).is_weekend(date.weekday())
    }

    /// Roll `date` forward past the currency's weekend in a single jump.
    pub fn adjust(&self, date: CalendarDate, currency: &str) -> CalendarDate {
        let offset = self.rule_for(currency).days_to_business_day(date.weekday());
        if offset == 0 {
            date
        } else {
            date.add_days(offset)
        }
    }
}
