//! CSV file trade adapter.
//!
//! Expects a header row followed by
//! `entity,side,agreed_fx,currency,instruction_date,settlement_date,units,price_per_unit`.

use crate::domain::error::SettlementError;
use crate::domain::trade::TradeInstruction;
use crate::ports::trade_port::TradePort;
use std::fs;
use std::path::PathBuf;

pub const COLUMNS: [&str; 8] = [
    "entity",
    "side",
    "agreed_fx",
    "currency",
    "instruction_date",
    "settlement_date",
    "units",
    "price_per_unit",
];

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TradePort for CsvAdapter {
    fn load_trades(&self) -> Result<Vec<TradeInstruction>, SettlementError> {
        let content = fs::read_to_string(&self.path).map_err(|e| SettlementError::TradeSource {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        tracing::info!(path = %self.path.display(), "reading trades");
        parse_trades(&content)
    }
}

/// Parse CSV text into instructions without validating them.
pub fn parse_trades(content: &str) -> Result<Vec<TradeInstruction>, SettlementError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let mut trades = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let record = result.map_err(|e| SettlementError::TradeSource {
            reason: format!("CSV parse error on line {}: {}", line, e),
        })?;

        let agreed_rate: f64 = parse_number(&record, 2, line)?;
        let units: i64 = parse_number(&record, 6, line)?;
        let price_per_unit: f64 = parse_number(&record, 7, line)?;

        trades.push(TradeInstruction {
            counterparty: field(&record, 0, line)?.to_string(),
            side: field(&record, 1, line)?.to_string(),
            agreed_rate,
            currency: field(&record, 3, line)?.to_string(),
            instruction_date: field(&record, 4, line)?.to_string(),
            settlement_date: field(&record, 5, line)?.to_string(),
            units,
            price_per_unit,
        });
    }

    tracing::debug!(count = trades.len(), "parsed trade rows");
    Ok(trades)
}

fn field(record: &csv::StringRecord, col: usize, line: usize) -> Result<&str, SettlementError> {
    record.get(col).ok_or_else(|| SettlementError::TradeSource {
        reason: format!("line {}: missing {} column", line, COLUMNS[col]),
    })
}

fn parse_number<T>(record: &csv::StringRecord, col: usize, line: usize) -> Result<T, SettlementError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    field(record, col, line)?
        .parse()
        .map_err(|e| SettlementError::TradeSource {
            reason: format!("line {}: invalid {} value: {}", line, COLUMNS[col], e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str =
        "entity,side,agreed_fx,currency,instruction_date,settlement_date,units,price_per_unit\n";

    #[test]
    fn parses_rows_in_order() {
        let content = format!(
            "{HEADER}XYZ,B,1.2,GBP,1 Mar 2017,3 Mar 2017,200,18.1\n\
             FFO, S ,0.2,AED,2 Mar 2017,3 Mar 2017,225,19\n"
        );
        let trades = parse_trades(&content).unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].counterparty, "XYZ");
        assert_eq!(trades[0].agreed_rate, 1.2);
        assert_eq!(trades[0].settlement_date, "3 Mar 2017");
        assert_eq!(trades[1].side, "S");
        assert_eq!(trades[1].units, 225);
        assert_eq!(trades[1].price_per_unit, 19.0);
    }

    #[test]
    fn empty_file_has_no_trades() {
        assert!(parse_trades(HEADER).unwrap().is_empty());
        assert!(parse_trades("").unwrap().is_empty());
    }

    #[test]
    fn invalid_number_names_line_and_column() {
        let content = format!("{HEADER}XYZ,B,1.2,GBP,1 Mar 2017,3 Mar 2017,lots,18.1\n");
        let err = parse_trades(&content).unwrap_err();
        match err {
            SettlementError::TradeSource { reason } => {
                assert!(reason.contains("line 2"), "{reason}");
                assert!(reason.contains("units"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_row_is_error() {
        let content = format!("{HEADER}XYZ,B,1.2\n");
        assert!(parse_trades(&content).is_err());
    }

    #[test]
    fn negative_values_pass_through_for_validation() {
        let content = format!("{HEADER}XYZ,B,-1.2,GBP,1 Mar 2017,3 Mar 2017,-5,18.1\n");
        let trades = parse_trades(&content).unwrap();
        assert_eq!(trades[0].agreed_rate, -1.2);
        assert_eq!(trades[0].units, -5);
    }

    #[test]
    fn load_trades_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades.csv");
        fs::write(
            &path,
            format!("{HEADER}ABC,S,0.81,EUR,28 Feb 2017,1 Mar 2017,80,11.25\n"),
        )
        .unwrap();

        let trades = CsvAdapter::new(path).load_trades().unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].currency, "EUR");
    }

    #[test]
    fn load_trades_missing_file_is_error() {
        let adapter = CsvAdapter::new(PathBuf::from("/nonexistent/trades.csv"));
        assert!(matches!(
            adapter.load_trades(),
            Err(SettlementError::TradeSource { .. })
        ));
    }
}
