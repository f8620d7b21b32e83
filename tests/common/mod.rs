#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::Value;
use std::cell::Cell;
use std::io::Write;
use tradejournal::domain::error::JournalError;
use tradejournal::domain::trade::{Session, TradeRecord};
use tradejournal::ports::trade_port::TradeSource;

/// In-memory trade source that counts how often it was read.
pub struct MockTradeSource {
    pub records: Vec<Value>,
    pub error: Option<String>,
    pub loads: Cell<usize>,
}

impl MockTradeSource {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records,
            error: None,
            loads: Cell::new(0),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            records: Vec::new(),
            error: Some(reason.to_string()),
            loads: Cell::new(0),
        }
    }
}

impl TradeSource for MockTradeSource {
    fn describe(&self) -> String {
        "mock".to_string()
    }

    fn load_records(&self) -> Result<Vec<Value>, JournalError> {
        self.loads.set(self.loads.get() + 1);
        if let Some(ref reason) = self.error {
            return Err(JournalError::TradeSource {
                source_path: self.describe(),
                reason: reason.clone(),
            });
        }
        Ok(self.records.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A completed trade scored only through `mfe_none`.
pub fn make_trade(day: u32, session: Session, mfe_none: f64) -> TradeRecord {
    let mut t = TradeRecord::new(date(2024, 3, day));
    t.session = session;
    t.mfe_none = Some(mfe_none);
    t
}

/// A journal in the dashboard's local-storage shape, mixing field spellings.
///
/// Under NO_BE at 1R: LONDON [1, -1, 1], NEW_YORK_AM [1, 1, 1, -1], ASIA [-1];
/// one open trade and one record without a date.
pub fn sample_journal_json() -> String {
    r#"{
  "trades": [
    {"id": "1", "date": "2024-03-04", "session": "LONDON", "bias": "LONG",
     "rTarget": 1, "mfeNone": 1.8, "mfe1": 1.8, "mfe2": 1.8, "be1Hit": true, "be2Hit": false, "profit": 100},
    {"id": "2", "date": "2024-03-05", "session": "NY_AM", "direction": "short",
     "r_target": "1", "mfe_none": 2.4, "mfe_be1": 2.4, "be1_hit": "yes", "pnl": 120},
    {"id": "3", "date": "2024-03-05", "session": "London", "bias": "SHORT",
     "mfe": -0.3, "mfe1": -0.3, "be1Hit": false, "profit": -50},
    {"id": "4", "date": "2024-03-06", "session": "ASIA", "bias": "LONG",
     "rScore": 0.6, "mfe1": 0.6, "be1Hit": false, "profit": -50},
    {"id": "5", "date": "2024-03-07", "session": "NEW_YORK_AM", "bias": "LONG",
     "mfeNone": 1.1, "mfe1": 0.9, "be1Hit": true, "profit": 60},
    {"id": "6", "date": "2024-03-08", "session": "NEW_YORK_AM", "bias": "LONG",
     "mfeNone": 3.0, "mfe1": 3.0, "be1Hit": true, "profit": 150},
    {"id": "7", "date": "2024-03-11", "session": "NEW_YORK_AM", "bias": "SHORT",
     "mfeNone": 0.2, "mfe1": 0.2, "be1Hit": false, "profit": -50},
    {"id": "8", "date": "2024-03-12", "session": "LONDON", "bias": "LONG",
     "mfeNone": 1.0, "mfe1": 1.0, "be1Hit": true, "profit": 50},
    {"id": "9", "date": "2024-03-13", "session": "LONDON", "bias": "LONG"},
    {"id": "10", "session": "LONDON", "mfeNone": 5.0}
  ]
}"#
    .to_string()
}

pub fn sample_records() -> Vec<Value> {
    let value: Value = serde_json::from_str(&sample_journal_json()).unwrap();
    value["trades"].as_array().unwrap().clone()
}

pub fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
