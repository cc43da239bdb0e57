//! Trade input port trait.

use crate::domain::error::SettlementError;
use crate::domain::trade::TradeInstruction;

/// A source of raw trade instructions, in feed order.
pub trait TradePort {
    fn load_trades(&self) -> Result<Vec<TradeInstruction>, SettlementError>;
}
