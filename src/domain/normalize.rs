//! Mapping of loosely-shaped journal records onto [`TradeRecord`].
//!
//! Journal exports have accumulated several spellings for the same field
//! over time. Each canonical field has an ordered list of accepted names;
//! the first name whose value is present and parses wins. `null`, empty
//! strings and unparseable values fall through to the next name. Unlike a
//! truthiness chain, a literal `0` is a value.

use super::error::NormalizeError;
use super::strategy::DEFAULT_R_TARGET;
use super::trade::{Bias, Outcome, Session, TradeRecord};
use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

/// A record as read from a journal file: field name to JSON value.
pub type RawTrade = Map<String, Value>;

pub const ID_FIELDS: &[&str] = &["id", "trade_id", "tradeId"];
pub const SYMBOL_FIELDS: &[&str] = &["symbol", "pair", "instrument", "ticker"];
pub const DATE_FIELDS: &[&str] = &[
    "date",
    "trade_date",
    "tradeDate",
    "entry_date",
    "entryDate",
    "timestamp",
];
pub const SESSION_FIELDS: &[&str] = &["session", "trading_session", "killzone"];
pub const BIAS_FIELDS: &[&str] = &["bias", "direction", "side"];
pub const OUTCOME_FIELDS: &[&str] = &["outcome", "result"];
pub const R_TARGET_FIELDS: &[&str] = &["rTarget", "r_target", "targetR", "target_r", "rr"];
pub const MFE_NONE_FIELDS: &[&str] = &["mfeNone", "mfe_none", "mfe", "rScore", "r_score"];
pub const MFE_1R_FIELDS: &[&str] = &["mfe1", "mfe_1r", "mfe_be1", "mfeBe1"];
pub const MFE_2R_FIELDS: &[&str] = &["mfe2", "mfe_2r", "mfe_be2", "mfeBe2"];
pub const BE1_HIT_FIELDS: &[&str] = &["be1Hit", "be1_hit", "be_1r_hit"];
pub const BE2_HIT_FIELDS: &[&str] = &["be2Hit", "be2_hit", "be_2r_hit"];
pub const PROFIT_FIELDS: &[&str] = &["profit", "pnl", "netProfit", "net_pnl"];

/// Normalize one raw record. `index` is its position in the source, used in errors.
pub fn normalize(index: usize, raw: &RawTrade) -> Result<TradeRecord, NormalizeError> {
    let date = first_of(raw, DATE_FIELDS, as_date).ok_or(NormalizeError::MissingDate { index })?;

    let r_target = first_of(raw, R_TARGET_FIELDS, as_f64)
        .filter(|v| *v > 0.0)
        .unwrap_or(DEFAULT_R_TARGET);

    Ok(TradeRecord {
        id: first_of(raw, ID_FIELDS, as_string),
        symbol: first_of(raw, SYMBOL_FIELDS, as_string),
        date,
        session: first_of(raw, SESSION_FIELDS, as_string)
            .map(|s| Session::parse(&s))
            .unwrap_or(Session::Unspecified),
        bias: first_of(raw, BIAS_FIELDS, |v| as_string(v).and_then(|s| Bias::parse(&s))),
        outcome: first_of(raw, OUTCOME_FIELDS, |v| {
            as_string(v).and_then(|s| Outcome::parse(&s))
        }),
        r_target,
        mfe_none: first_of(raw, MFE_NONE_FIELDS, as_f64),
        mfe_1r: first_of(raw, MFE_1R_FIELDS, as_f64),
        mfe_2r: first_of(raw, MFE_2R_FIELDS, as_f64),
        be1_hit: first_of(raw, BE1_HIT_FIELDS, as_bool).unwrap_or(false),
        be2_hit: first_of(raw, BE2_HIT_FIELDS, as_bool).unwrap_or(false),
        profit: first_of(raw, PROFIT_FIELDS, as_f64),
    })
}

/// Normalize a JSON value that should be an object.
pub fn normalize_value(index: usize, value: &Value) -> Result<TradeRecord, NormalizeError> {
    match value {
        Value::Object(raw) => normalize(index, raw),
        other => Err(NormalizeError::NotAnObject {
            index,
            found: type_name(other).to_string(),
        }),
    }
}

fn first_of<T>(raw: &RawTrade, names: &[&str], parse: impl Fn(&Value) -> Option<T>) -> Option<T> {
    names
        .iter()
        .filter_map(|name| raw.get(*name))
        .find_map(parse)
}

fn as_f64(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    v.is_finite().then_some(v)
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Accepts `YYYY-MM-DD`, an ISO datetime starting with one (time after `T`
/// or a space), or epoch milliseconds.
fn as_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            let (head, rest) = (s.get(..10)?, s.get(10..)?);
            if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
                return None;
            }
            NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
        }
        Value::Number(n) => {
            let millis = n.as_i64()?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
