//! Trade instructions and validated trade records.

use std::fmt;

use crate::domain::calendar_date::CalendarDate;
use crate::domain::date_parser::parse_trade_date;
use crate::domain::error::{DateFormatError, ValidationError};
use crate::domain::weekend::WeekendCalendar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Accepts `B`, `S`, `Buy` or `Sell`, ignoring case and surrounding space.
    pub fn from_code(code: &str) -> Option<Side> {
        match code.trim().to_ascii_uppercase().as_str() {
            "B" | "BUY" => Some(Side::Buy),
            "S" | "SELL" => Some(Side::Sell),
            _ => None,
        }
    }

    /// Buys pay cash out, sells bring cash in.
    pub fn cash_flow_label(&self) -> &'static str {
        match self {
            Side::Buy => "Outgoing",
            Side::Sell => "Incoming",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "B"),
            Side::Sell => write!(f, "S"),
        }
    }
}

/// Unvalidated trade fields as supplied by a trade source.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeInstruction {
    pub counterparty: String,
    pub side: String,
    pub agreed_rate: f64,
    pub currency: String,
    pub instruction_date: String,
    pub settlement_date: String,
    pub units: i64,
    pub price_per_unit: f64,
}

/// A validated, immutable buy or sell instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    counterparty: String,
    side: Side,
    agreed_rate: f64,
    currency: String,
    instruction_date: String,
    raw_settlement_date: String,
    units: i64,
    price_per_unit: f64,
}

impl TradeRecord {
    /// Validate `instruction`, failing on the first violated field in the
    /// order: counterparty, side, agreed rate, currency, instruction date,
    /// settlement date, units, price per unit.
    pub fn new(instruction: TradeInstruction) -> Result<Self, ValidationError> {
        let TradeInstruction {
            counterparty,
            side,
            agreed_rate,
            currency,
            instruction_date,
            settlement_date,
            units,
            price_per_unit,
        } = instruction;

        if counterparty.is_empty() {
            return Err(ValidationError::new(
                "counterparty",
                "counterparty cannot be empty",
            ));
        }

        let side = Side::from_code(&side).ok_or_else(|| {
            ValidationError::new("side", format!("side must be 'B' or 'S', got '{side}'"))
        })?;

        if agreed_rate.is_nan() || agreed_rate <= 0.0 {
            return Err(ValidationError::new(
                "agreed_rate",
                format!("agreed rate must be positive, got {agreed_rate}"),
            ));
        }

        if currency.chars().count() != 3 {
            return Err(ValidationError::new(
                "currency",
                format!("currency must have 3 characters, got '{currency}'"),
            ));
        }

        if instruction_date.is_empty() {
            return Err(ValidationError::new(
                "instruction_date",
                "instruction date cannot be empty",
            ));
        }

        if settlement_date.is_empty() {
            return Err(ValidationError::new(
                "settlement_date",
                "settlement date cannot be empty",
            ));
        }

        if units <= 0 {
            return Err(ValidationError::new(
                "units",
                format!("units must be positive, got {units}"),
            ));
        }

        if price_per_unit.is_nan() || price_per_unit <= 0.0 {
            return Err(ValidationError::new(
                "price_per_unit",
                format!("price per unit must be positive, got {price_per_unit}"),
            ));
        }

        Ok(Self {
            counterparty,
            side,
            agreed_rate,
            currency,
            instruction_date,
            raw_settlement_date: settlement_date,
            units,
            price_per_unit,
        })
    }

    pub fn counterparty(&self) -> &str {
        &self.counterparty
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn agreed_rate(&self) -> f64 {
        self.agreed_rate
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn instruction_date(&self) -> &str {
        &self.instruction_date
    }

    pub fn raw_settlement_date(&self) -> &str {
        &self.raw_settlement_date
    }

    pub fn units(&self) -> i64 {
        self.units
    }

    pub fn price_per_unit(&self) -> f64 {
        self.price_per_unit
    }

    /// agreed rate * price per unit * units
    pub fn notional_value(&self) -> f64 {
        self.agreed_rate * self.price_per_unit * self.units as f64
    }

    /// Settlement date rolled past the currency's weekend.
    pub fn adjusted_settlement_date(
        &self,
        calendar: &WeekendCalendar,
    ) -> Result<CalendarDate, DateFormatError> {
        let raw = parse_trade_date(&self.raw_settlement_date)?;
        Ok(calendar.adjust(raw, &self.currency))
    }
}

impl TryFrom<TradeInstruction> for TradeRecord {
    type Error = ValidationError;

    fn try_from(instruction: TradeInstruction) -> Result<Self, Self::Error> {
        TradeRecord::new(instruction)
    }
}
