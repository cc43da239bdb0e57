#![allow(dead_code)]

use settlr::domain::calendar_date::CalendarDate;
use settlr::domain::error::SettlementError;
use settlr::domain::report::CashFlowReport;
use settlr::domain::trade::TradeInstruction;
use settlr::ports::report_port::ReportPort;
use settlr::ports::trade_port::TradePort;
use std::cell::RefCell;

pub struct MockTradePort {
    pub trades: Vec<TradeInstruction>,
    pub error: Option<String>,
}

impl MockTradePort {
    pub fn new() -> Self {
        Self {
            trades: Vec::new(),
            error: None,
        }
    }

    pub fn with_trade(mut self, trade: TradeInstruction) -> Self {
        self.trades.push(trade);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl TradePort for MockTradePort {
    fn load_trades(&self) -> Result<Vec<TradeInstruction>, SettlementError> {
        if let Some(reason) = &self.error {
            return Err(SettlementError::TradeSource {
                reason: reason.clone(),
            });
        }
        Ok(self.trades.clone())
    }
}

/// Captures every report written through it.
pub struct RecordingReportPort {
    pub reports: RefCell<Vec<CashFlowReport>>,
}

impl RecordingReportPort {
    pub fn new() -> Self {
        Self {
            reports: RefCell::new(Vec::new()),
        }
    }

    pub fn last(&self) -> CashFlowReport {
        self.reports.borrow().last().cloned().unwrap()
    }
}

impl ReportPort for RecordingReportPort {
    fn write(&self, report: &CashFlowReport) -> Result<(), SettlementError> {
        self.reports.borrow_mut().push(report.clone());
        Ok(())
    }
}

pub fn make_trade(
    counterparty: &str,
    side: &str,
    currency: &str,
    settlement_date: &str,
    units: i64,
    price_per_unit: f64,
) -> TradeInstruction {
    TradeInstruction {
        counterparty: counterparty.to_string(),
        side: side.to_string(),
        agreed_rate: 1.0,
        currency: currency.to_string(),
        instruction_date: "1 Mar 2017".to_string(),
        settlement_date: settlement_date.to_string(),
        units,
        price_per_unit,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> CalendarDate {
    CalendarDate::from_ymd(y, m, d).unwrap()
}

pub const TRADES_HEADER: &str =
    "entity,side,agreed_fx,currency,instruction_date,settlement_date,units,price_per_unit\n";

pub fn write_temp(content: &str) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// `ExitCode` has no `PartialEq`, so compare through its debug form.
pub fn assert_exit(actual: std::process::ExitCode, expected: u8) {
    assert_eq!(
        format!("{actual:?}"),
        format!("{:?}", std::process::ExitCode::from(expected))
    );
}
