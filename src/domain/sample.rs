//! Built-in demonstration trade set used by `settlr demo`.

use crate::domain::trade::TradeInstruction;

#[allow(clippy::too_many_arguments)]
fn instruction(
    counterparty: &str,
    side: &str,
    agreed_rate: f64,
    currency: &str,
    instruction_date: &str,
    settlement_date: &str,
    units: i64,
    price_per_unit: f64,
) -> TradeInstruction {
    TradeInstruction {
        counterparty: counterparty.to_string(),
        side: side.to_string(),
        agreed_rate,
        currency: currency.to_string(),
        instruction_date: instruction_date.to_string(),
        settlement_date: settlement_date.to_string(),
        units,
        price_per_unit,
    }
}

/// Three buys and two sells around the first week of March 2017.
pub fn demo_instructions() -> Vec<TradeInstruction> {
    vec![
        instruction("XYZ", "B", 1.2, "GBP", "1 Mar 2017", "3 Mar 2017", 200, 18.1),
        instruction("DEF", "B", 0.5, "SGP", "27 Feb 2017", "1 Mar 2017", 120, 4.5),
        instruction("GHI", "B", 0.81, "EUR", "27 Feb 2017", "1 Mar 2017", 220, 7.0),
        instruction("ABC", "S", 0.81, "EUR", "28 Feb 2017", "1 Mar 2017", 80, 11.25),
        instruction("FFO", "S", 0.2, "AED", "2 Mar 2017", "3 Mar 2017", 225, 19.0),
    ]
}
