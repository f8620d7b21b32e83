//! Trade source port trait.

use crate::domain::error::JournalError;
use serde_json::Value;
use std::path::Path;
use std::str::FromStr;

/// Anything that can hand over journal records in their raw, un-normalized shape.
pub trait TradeSource {
    /// Human-readable origin, used in logs and reports.
    fn describe(&self) -> String;

    fn load_records(&self) -> Result<Vec<Value>, JournalError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    /// `.csv` files are CSV; everything else is read as JSON.
    pub fn from_path(path: &Path) -> SourceFormat {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => SourceFormat::Csv,
            _ => SourceFormat::Json,
        }
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(SourceFormat::Json),
            "csv" => Ok(SourceFormat::Csv),
            other => Err(format!("unknown format '{}' (expected json or csv)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a/trades.CSV")), SourceFormat::Csv);
        assert_eq!(SourceFormat::from_path(Path::new("trades.json")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("trades")), SourceFormat::Json);
    }

    #[test]
    fn format_from_str() {
        assert_eq!("CSV".parse(), Ok(SourceFormat::Csv));
        assert!("xml".parse::<SourceFormat>().is_err());
    }
}
