//! Buy/sell cash flow buckets ordered by adjusted settlement date.

use std::fmt;
use std::str::FromStr;

use crate::domain::calendar_date::CalendarDate;
use crate::domain::error::DateFormatError;
use crate::domain::report::{self, CashFlowReport, EmptySide};
use crate::domain::trade::{Side, TradeRecord};
use crate::domain::weekend::WeekendCalendar;

/// How a new trade is placed within its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingStrategy {
    /// Append when the bucket's last display date compares `<=` the new
    /// trade's display date as a string, otherwise prepend. Only sorted for
    /// feeds that arrive in a compatible order.
    Literal,
    /// Stable insertion by calendar date.
    #[default]
    Chronological,
}

impl FromStr for OrderingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "literal" => Ok(OrderingStrategy::Literal),
            "chronological" => Ok(OrderingStrategy::Chronological),
            other => Err(format!(
                "unknown ordering '{other}' (expected literal or chronological)"
            )),
        }
    }
}

impl fmt::Display for OrderingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingStrategy::Literal => write!(f, "literal"),
            OrderingStrategy::Chronological => write!(f, "chronological"),
        }
    }
}

/// A trade paired with its adjusted settlement date.
#[derive(Debug, Clone, PartialEq)]
pub struct SettledTrade {
    trade: TradeRecord,
    settlement_date: CalendarDate,
}

impl SettledTrade {
    pub fn new(trade: TradeRecord, settlement_date: CalendarDate) -> Self {
        Self {
            trade,
            settlement_date,
        }
    }

    pub fn trade(&self) -> &TradeRecord {
        &self.trade
    }

    pub fn settlement_date(&self) -> CalendarDate {
        self.settlement_date
    }

    /// Display form of the settlement date, e.g. `6 Mar 2017`.
    pub fn date_label(&self) -> String {
        self.settlement_date.to_string()
    }
}

pub struct CashFlowAggregator {
    calendar: WeekendCalendar,
    ordering: OrderingStrategy,
    empty_side: EmptySide,
    outgoing: Vec<SettledTrade>,
    incoming: Vec<SettledTrade>,
}

impl Default for CashFlowAggregator {
    fn default() -> Self {
        Self::new(WeekendCalendar::default(), OrderingStrategy::default())
    }
}

impl CashFlowAggregator {
    pub fn new(calendar: WeekendCalendar, ordering: OrderingStrategy) -> Self {
        Self {
            calendar,
            ordering,
            empty_side: EmptySide::default(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    pub fn with_empty_side(mut self, empty_side: EmptySide) -> Self {
        self.empty_side = empty_side;
        self
    }

    /// Settle `trade` and file it under outgoing (buy) or incoming (sell).
    pub fn add(&mut self, trade: TradeRecord) -> Result<(), DateFormatError> {
        let settlement_date = trade.adjusted_settlement_date(&self.calendar)?;
        tracing::debug!(
            counterparty = trade.counterparty(),
            side = %trade.side(),
            currency = trade.currency(),
            raw = trade.raw_settlement_date(),
            settles = %settlement_date,
            "trade settled"
        );

        let ordering = self.ordering;
        let bucket = match trade.side() {
            Side::Buy => &mut self.outgoing,
            Side::Sell => &mut self.incoming,
        };
        insert(bucket, SettledTrade::new(trade, settlement_date), ordering);
        Ok(())
    }

    pub fn outgoing(&self) -> &[SettledTrade] {
        &self.outgoing
    }

    pub fn incoming(&self) -> &[SettledTrade] {
        &self.incoming
    }

    pub fn len(&self) -> usize {
        self.outgoing.len() + self.incoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }

    pub fn report(&self) -> CashFlowReport {
        CashFlowReport {
            outgoing: report::group_totals(&self.outgoing, self.empty_side),
            incoming: report::group_totals(&self.incoming, self.empty_side),
        }
    }

    /// Outgoing subtotal lines, a blank line, then incoming subtotal lines.
    pub fn render(&self, precision: usize) -> Vec<String> {
        self.report().lines(precision)
    }
}

fn insert(bucket: &mut Vec<SettledTrade>, entry: SettledTrade, ordering: OrderingStrategy) {
    match ordering {
        OrderingStrategy::Literal => {
            let append = match bucket.last() {
                None => true,
                Some(last) => last.date_label() <= entry.date_label(),
            };
            if append {
                bucket.push(entry);
            } else {
                bucket.insert(0, entry);
            }
        }
        OrderingStrategy::Chronological => {
            let date = entry.settlement_date;
            let pos = bucket.partition_point(|e| e.settlement_date <= date);
            bucket.insert(pos, entry);
        }
    }
}
