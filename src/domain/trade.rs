//! Canonical trade record and its enumerated fields.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// Market session a trade was taken in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Session {
    Asia,
    London,
    NewYorkAm,
    NewYorkPm,
    Other(String),
    Unspecified,
}

impl Session {
    /// Parse a free-form session label. Case and separators are ignored;
    /// unknown non-empty labels are kept upper-cased as [`Session::Other`].
    pub fn parse(label: &str) -> Session {
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "" | "unspecified" => Session::Unspecified,
            "asia" | "asian" | "tokyo" => Session::Asia,
            "london" | "ldn" => Session::London,
            "newyorkam" | "nyam" | "ny" => Session::NewYorkAm,
            "newyorkpm" | "nypm" => Session::NewYorkPm,
            _ => Session::Other(label.trim().to_uppercase()),
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::Asia => write!(f, "ASIA"),
            Session::London => write!(f, "LONDON"),
            Session::NewYorkAm => write!(f, "NEW_YORK_AM"),
            Session::NewYorkPm => write!(f, "NEW_YORK_PM"),
            Session::Other(label) => write!(f, "{}", label),
            Session::Unspecified => write!(f, "UNSPECIFIED"),
        }
    }
}

impl Serialize for Session {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Bias {
    Long,
    Short,
}

impl Bias {
    pub fn parse(label: &str) -> Option<Bias> {
        match label.trim().to_lowercase().as_str() {
            "long" | "buy" | "bullish" | "bull" => Some(Bias::Long),
            "short" | "sell" | "bearish" | "bear" => Some(Bias::Short),
            _ => None,
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bias::Long => write!(f, "LONG"),
            Bias::Short => write!(f, "SHORT"),
        }
    }
}

/// Outcome as recorded in the journal, when the trader filled it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Breakeven,
}

impl Outcome {
    pub fn parse(label: &str) -> Option<Outcome> {
        match label.trim().to_lowercase().as_str() {
            "win" | "won" | "tp" => Some(Outcome::Win),
            "loss" | "lost" | "sl" => Some(Outcome::Loss),
            "breakeven" | "be" | "scratch" => Some(Outcome::Breakeven),
            _ => None,
        }
    }
}

/// One journal entry after normalization.
///
/// MFE values are expressed in R multiples, one per breakeven policy.
/// A record with none of them is still open and takes no part in
/// completed-trade statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub id: Option<String>,
    pub symbol: Option<String>,
    pub date: NaiveDate,
    pub session: Session,
    pub bias: Option<Bias>,
    pub outcome: Option<Outcome>,
    pub r_target: f64,
    pub mfe_none: Option<f64>,
    pub mfe_1r: Option<f64>,
    pub mfe_2r: Option<f64>,
    pub be1_hit: bool,
    pub be2_hit: bool,
    pub profit: Option<f64>,
}

impl TradeRecord {
    /// A bare record for `date` with every optional field empty and an R target of 1.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: None,
            symbol: None,
            date,
            session: Session::Unspecified,
            bias: None,
            outcome: None,
            r_target: 1.0,
            mfe_none: None,
            mfe_1r: None,
            mfe_2r: None,
            be1_hit: false,
            be2_hit: false,
            profit: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.mfe_none.is_none() && self.mfe_1r.is_none() && self.mfe_2r.is_none()
    }
}
