//! Report generation port trait.

use crate::domain::error::JournalError;
use crate::domain::report::Report;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Port for rendering analysis reports.
pub trait ReportPort {
    fn render(&self, report: &Report) -> Result<String, JournalError>;

    /// Default implementation: renders, then writes to `output` or stdout.
    fn write(&self, report: &Report, output: Option<&Path>) -> Result<(), JournalError> {
        let content = self.render(report)?;
        match output {
            Some(path) => fs::write(path, content)?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!(
                "unknown report format '{}' (expected text or json)",
                other
            )),
        }
    }
}
