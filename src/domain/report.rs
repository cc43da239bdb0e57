//! Per-settlement-date subtotals and their text rendering.

use std::fmt;
use std::str::FromStr;

use crate::domain::aggregator::SettledTrade;
use crate::domain::trade::Side;

pub const DEFAULT_PRECISION: usize = 6;

/// What a direction with no trades contributes to the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySide {
    /// A single zero line with a blank date, `"<label> total for  = 0"`.
    #[default]
    Placeholder,
    /// No lines at all.
    Omit,
}

impl FromStr for EmptySide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "placeholder" => Ok(EmptySide::Placeholder),
            "omit" => Ok(EmptySide::Omit),
            other => Err(format!(
                "unknown empty_side '{other}' (expected placeholder or omit)"
            )),
        }
    }
}

impl fmt::Display for EmptySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptySide::Placeholder => write!(f, "placeholder"),
            EmptySide::Omit => write!(f, "omit"),
        }
    }
}

/// Cash total for one run of consecutive trades sharing a settlement date.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTotal {
    pub date_label: String,
    pub total: f64,
}

/// Grouped subtotals for both cash flow directions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CashFlowReport {
    pub outgoing: Vec<DateTotal>,
    pub incoming: Vec<DateTotal>,
}

impl CashFlowReport {
    /// Outgoing lines, a blank separator, then incoming lines.
    pub fn lines(&self, precision: usize) -> Vec<String> {
        let mut lines = render_lines(Side::Buy.cash_flow_label(), &self.outgoing, precision);
        lines.push(String::new());
        lines.extend(render_lines(
            Side::Sell.cash_flow_label(),
            &self.incoming,
            precision,
        ));
        lines
    }
}

/// Walk `entries` in order, merging consecutive trades whose display dates
/// match. A group whose running total is exactly zero is dropped unless it
/// is the last one. The last group is always pushed, so an empty input
/// yields one blank-dated zero group under `EmptySide::Placeholder`.
pub fn group_totals(entries: &[SettledTrade], empty: EmptySide) -> Vec<DateTotal> {
    let mut totals = Vec::new();
    if entries.is_empty() && empty == EmptySide::Omit {
        return totals;
    }

    let mut current = String::new();
    let mut running = 0.0;

    for entry in entries {
        let label = entry.date_label();
        let value = entry.trade().notional_value();
        if label == current {
            running += value;
        } else {
            if running != 0.0 {
                totals.push(DateTotal {
                    date_label: current,
                    total: running,
                });
            }
            current = label;
            running = value;
        }
    }

    totals.push(DateTotal {
        date_label: current,
        total: running,
    });
    totals
}

/// `"<label> total for <date> = <amount>"` for each group.
pub fn render_lines(label: &str, totals: &[DateTotal], precision: usize) -> Vec<String> {
    totals
        .iter()
        .map(|t| {
            format!(
                "{} total for {} = {}",
                label,
                t.date_label,
                format_amount(t.total, precision)
            )
        })
        .collect()
}

/// Shortest rendering of `value` to `significant` digits: fixed notation with
/// trailing zeros removed, switching to an exponent for very large or very
/// small magnitudes (the same shape as C's `%g`).
pub fn format_amount(value: f64, significant: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sig = significant.max(1);
    let sci = format!("{:.*e}", sig - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= sig as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (sig as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
