//! Report settings read from configuration.
//!
//! ```ini
//! [report]
//! ordering = chronological   ; or literal
//! precision = 6              ; significant digits in amounts
//! format = text              ; or csv
//! empty_side = placeholder   ; or omit
//!
//! [weekends]
//! AED = fri,sat
//! ILS = fri,sat
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

use crate::domain::aggregator::OrderingStrategy;
use crate::domain::error::SettlementError;
use crate::domain::report::{EmptySide, DEFAULT_PRECISION};
use crate::domain::weekend::{WeekendCalendar, WeekendRule};
use crate::ports::config_port::ConfigPort;

pub const MAX_PRECISION: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown format '{other}' (expected text or csv)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub ordering: OrderingStrategy,
    pub precision: usize,
    pub format: OutputFormat,
    pub empty_side: EmptySide,
    pub calendar: WeekendCalendar,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            ordering: OrderingStrategy::default(),
            precision: DEFAULT_PRECISION,
            format: OutputFormat::default(),
            empty_side: EmptySide::default(),
            calendar: WeekendCalendar::default(),
        }
    }
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> SettlementError {
    SettlementError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Check every recognised key before anything is built from the config.
pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), SettlementError> {
    parse_ordering(config)?;
    parse_precision(config)?;
    parse_format(config)?;
    parse_empty_side(config)?;
    parse_weekend_rules(config)?;
    Ok(())
}

pub fn build_report_settings(config: &dyn ConfigPort) -> Result<ReportSettings, SettlementError> {
    let mut calendar = WeekendCalendar::default();
    for (currency, rule) in parse_weekend_rules(config)? {
        calendar = calendar.with_rule(&currency, rule);
    }

    Ok(ReportSettings {
        ordering: parse_ordering(config)?,
        precision: parse_precision(config)?,
        format: parse_format(config)?,
        empty_side: parse_empty_side(config)?,
        calendar,
    })
}

fn parse_ordering(config: &dyn ConfigPort) -> Result<OrderingStrategy, SettlementError> {
    match config.get_string("report", "ordering") {
        None => Ok(OrderingStrategy::default()),
        Some(s) => s
            .parse()
            .map_err(|reason: String| invalid("report", "ordering", reason)),
    }
}

fn parse_precision(config: &dyn ConfigPort) -> Result<usize, SettlementError> {
    match config.get_int("report", "precision") {
        Ok(None) => Ok(DEFAULT_PRECISION),
        Ok(Some(p)) if (1..=MAX_PRECISION as i64).contains(&p) => Ok(p as usize),
        Ok(Some(p)) => Err(invalid(
            "report",
            "precision",
            format!("precision must be between 1 and {MAX_PRECISION}, got {p}"),
        )),
        Err(reason) => Err(invalid("report", "precision", reason)),
    }
}

fn parse_format(config: &dyn ConfigPort) -> Result<OutputFormat, SettlementError> {
    match config.get_string("report", "format") {
        None => Ok(OutputFormat::default()),
        Some(s) => s
            .parse()
            .map_err(|reason: String| invalid("report", "format", reason)),
    }
}

fn parse_empty_side(config: &dyn ConfigPort) -> Result<EmptySide, SettlementError> {
    match config.get_string("report", "empty_side") {
        None => Ok(EmptySide::default()),
        Some(s) => s
            .parse()
            .map_err(|reason: String| invalid("report", "empty_side", reason)),
    }
}

/// `(CURRENCY, rule)` pairs from the `[weekends]` section, sorted by currency.
pub fn parse_weekend_rules(
    config: &dyn ConfigPort,
) -> Result<Vec<(String, WeekendRule)>, SettlementError> {
    let mut keys = config.keys("weekends");
    keys.sort();

    let mut rules = Vec::with_capacity(keys.len());
    for key in keys {
        let currency = key.trim().to_uppercase();
        if currency.chars().count() != 3 {
            return Err(invalid(
                "weekends",
                &key,
                "currency code must have 3 characters",
            ));
        }

        let value = config.get_string("weekends", &key).unwrap_or_default();
        let rule = parse_weekdays(&value).map_err(|reason| invalid("weekends", &key, reason))?;
        if rule.covers_whole_week() {
            return Err(invalid(
                "weekends",
                &key,
                "weekend cannot cover the whole week",
            ));
        }
        tracing::debug!(currency = %currency, weekend = ?rule.weekdays(), "weekend rule");
        rules.push((currency, rule));
    }
    Ok(rules)
}

/// Parse `"fri,sat"` (or full day names) into a rule. An empty list means
/// the currency has no weekend at all.
pub fn parse_weekdays(value: &str) -> Result<WeekendRule, String> {
    let mut days = Vec::new();
    for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let day = token
            .parse::<Weekday>()
            .map_err(|_| format!("unknown weekday '{token}'"))?;
        days.push(day);
    }
    Ok(WeekendRule::new(&days))
}
