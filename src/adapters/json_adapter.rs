//! JSON journal dump adapter.
//!
//! Accepts either a bare array of trade objects or an object wrapping the
//! array under `trades` (the shape the dashboard keeps in local storage).

use crate::domain::error::JournalError;
use crate::ports::trade_port::TradeSource;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub struct JsonAdapter {
    path: PathBuf,
}

impl JsonAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Extract the record array from already-parsed JSON.
    pub fn records_from_value(value: Value) -> Result<Vec<Value>, String> {
        match value {
            Value::Array(items) => Ok(items),
            Value::Object(mut map) => match map.remove("trades") {
                Some(Value::Array(items)) => Ok(items),
                Some(_) => Err("'trades' is not an array".to_string()),
                None => Err("expected an array of trades or an object with 'trades'".to_string()),
            },
            _ => Err("expected an array of trades or an object with 'trades'".to_string()),
        }
    }
}

impl TradeSource for JsonAdapter {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_records(&self) -> Result<Vec<Value>, JournalError> {
        let content = fs::read_to_string(&self.path).map_err(|e| JournalError::TradeSource {
            source_path: self.describe(),
            reason: e.to_string(),
        })?;

        let value: Value = serde_json::from_str(&content)?;
        let records = Self::records_from_value(value).map_err(|reason| JournalError::TradeSource {
            source_path: self.describe(),
            reason,
        })?;

        debug!(path = %self.path.display(), records = records.len(), "read JSON journal");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_bare_array() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "trades.json",
            r#"[{"date":"2024-01-02","mfeNone":1.2},{"date":"2024-01-03"}]"#,
        );
        let records = JsonAdapter::new(path).load_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["mfeNone"], json!(1.2));
    }

    #[test]
    fn reads_wrapped_array() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "export.json",
            r#"{"version":2,"trades":[{"date":"2024-01-02"}]}"#,
        );
        let records = JsonAdapter::new(path).load_records().unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(JsonAdapter::records_from_value(json!({"trades": 3})).is_err());
        assert!(JsonAdapter::records_from_value(json!({"items": []})).is_err());
        assert!(JsonAdapter::records_from_value(json!("trades")).is_err());
    }

    #[test]
    fn missing_file_is_trade_source_error() {
        let err = JsonAdapter::new(PathBuf::from("/nonexistent/trades.json"))
            .load_records()
            .unwrap_err();
        assert!(matches!(err, JournalError::TradeSource { .. }));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.json", "[{\"date\": ");
        let err = JsonAdapter::new(path).load_records().unwrap_err();
        assert!(matches!(err, JournalError::Json(_)));
    }
}
