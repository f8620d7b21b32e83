//! JSON report adapter.

use crate::domain::error::JournalError;
use crate::domain::report::Report;
use crate::ports::report_port::ReportPort;

pub struct JsonReportAdapter;

impl ReportPort for JsonReportAdapter {
    fn render(&self, report: &Report) -> Result<String, JournalError> {
        let mut out = serde_json::to_string_pretty(report)?;
        out.push('\n');
        Ok(out)
    }
}
