//! Plain-text report adapter implementing ReportPort.

use crate::adapters::report_target::ReportTarget;
use crate::domain::error::SettlementError;
use crate::domain::report::CashFlowReport;
use crate::ports::report_port::ReportPort;
use std::io::Write;

pub struct TextReportAdapter {
    target: ReportTarget,
    precision: usize,
}

impl TextReportAdapter {
    pub fn new(target: ReportTarget, precision: usize) -> Self {
        Self { target, precision }
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, report: &CashFlowReport) -> Result<(), SettlementError> {
        let mut out = self.target.open()?;
        for line in report.lines(self.precision) {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::DateTotal;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn writes_report_lines_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        let report = CashFlowReport {
            outgoing: vec![DateTotal {
                date_label: "1 Mar 2017".into(),
                total: 1517.4,
            }],
            incoming: vec![DateTotal {
                date_label: "5 Mar 2017".into(),
                total: 855.0,
            }],
        };

        TextReportAdapter::new(ReportTarget::File(path.clone()), 6)
            .write(&report)
            .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "Outgoing total for 1 Mar 2017 = 1517.4\n\nIncoming total for 5 Mar 2017 = 855\n"
        );
    }
}
