//! CSV report adapter implementing ReportPort.
//!
//! One row per settlement date group: `direction,settlement_date,total`.

use crate::adapters::report_target::ReportTarget;
use crate::domain::error::SettlementError;
use crate::domain::report::{format_amount, CashFlowReport, DateTotal};
use crate::ports::report_port::ReportPort;

pub struct CsvReportAdapter {
    target: ReportTarget,
    precision: usize,
}

impl CsvReportAdapter {
    pub fn new(target: ReportTarget, precision: usize) -> Self {
        Self { target, precision }
    }

    fn write_rows<W: std::io::Write>(
        &self,
        wtr: &mut csv::Writer<W>,
        direction: &str,
        totals: &[DateTotal],
    ) -> Result<(), csv::Error> {
        for t in totals {
            wtr.write_record([
                direction,
                t.date_label.as_str(),
                format_amount(t.total, self.precision).as_str(),
            ])?;
        }
        Ok(())
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, report: &CashFlowReport) -> Result<(), SettlementError> {
        let to_err = |e: csv::Error| SettlementError::Io(std::io::Error::other(e));

        let mut wtr = csv::Writer::from_writer(self.target.open()?);
        wtr.write_record(["direction", "settlement_date", "total"])
            .map_err(to_err)?;
        self.write_rows(&mut wtr, "outgoing", &report.outgoing)
            .map_err(to_err)?;
        self.write_rows(&mut wtr, "incoming", &report.incoming)
            .map_err(to_err)?;
        wtr.flush()?;
        Ok(())
    }
}
