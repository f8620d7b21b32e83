//! CSV journal export adapter.
//!
//! The header row names the fields; any spelling the normalizer knows is
//! accepted. Cells are handed over as strings and empty cells are dropped,
//! so a blank column reads the same as a missing one.

use crate::domain::error::JournalError;
use crate::ports::trade_port::TradeSource;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parse CSV text into raw records.
    pub fn records_from_str(content: &str) -> Result<Vec<Value>, JournalError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = rdr.headers()?.clone();
        let mut records = Vec::new();

        for result in rdr.records() {
            let row = result?;
            let mut map = Map::new();
            for (name, cell) in headers.iter().zip(row.iter()) {
                if !cell.is_empty() {
                    map.insert(name.to_string(), Value::String(cell.to_string()));
                }
            }
            records.push(Value::Object(map));
        }

        Ok(records)
    }
}

impl TradeSource for CsvAdapter {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_records(&self) -> Result<Vec<Value>, JournalError> {
        let content = fs::read_to_string(&self.path).map_err(|e| JournalError::TradeSource {
            source_path: self.describe(),
            reason: e.to_string(),
        })?;

        let records = Self::records_from_str(&content)?;
        debug!(path = %self.path.display(), records = records.len(), "read CSV journal");
        Ok(records)
    }
}
