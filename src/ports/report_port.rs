//! Report output port trait.

use crate::domain::error::SettlementError;
use crate::domain::report::CashFlowReport;

/// Port for writing settlement cash flow reports.
pub trait ReportPort {
    fn write(&self, report: &CashFlowReport) -> Result<(), SettlementError>;
}
