//! An explicit snapshot of normalized trades, passed to every analysis.

use super::error::NormalizeError;
use super::normalize::normalize_value;
use super::trade::{Bias, Session, TradeRecord};
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Journal {
    trades: Vec<TradeRecord>,
}

/// Outcome of normalizing a batch of raw records.
#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: Journal,
    pub rejected: Vec<NormalizeError>,
}

impl Journal {
    /// Normalize raw records, keeping valid ones in input order.
    pub fn from_raw(records: &[Value]) -> LoadedJournal {
        let mut trades = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for (index, value) in records.iter().enumerate() {
            match normalize_value(index, value) {
                Ok(trade) => trades.push(trade),
                Err(e) => {
                    warn!(error = %e, "skipping journal record");
                    rejected.push(e);
                }
            }
        }

        debug!(
            accepted = trades.len(),
            rejected = rejected.len(),
            "normalized journal records"
        );

        LoadedJournal {
            journal: Journal { trades },
            rejected,
        }
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.trades.iter().filter(|t| t.is_active()).count()
    }

    /// A new snapshot holding only the trades `filter` accepts.
    pub fn filter(&self, filter: &TradeFilter) -> Journal {
        Journal {
            trades: self
                .trades
                .iter()
                .filter(|t| filter.matches(t))
                .cloned()
                .collect(),
        }
    }
}

/// Date range, session and bias restriction. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub session: Option<Session>,
    pub bias: Option<Bias>,
}

impl TradeFilter {
    pub fn is_empty(&self) -> bool {
        *self == TradeFilter::default()
    }

    pub fn matches(&self, trade: &TradeRecord) -> bool {
        if self.from.is_some_and(|from| trade.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| trade.date > to) {
            return false;
        }
        if let Some(ref session) = self.session {
            if trade.session != *session {
                return false;
            }
        }
        if let Some(bias) = self.bias {
            if trade.bias != Some(bias) {
                return false;
            }
        }
        true
    }
}
