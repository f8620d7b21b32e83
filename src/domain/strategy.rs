//! Breakeven strategies and analysis options.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_R_TARGET: f64 = 1.0;
pub const DEFAULT_MIN_SAMPLE: usize = 3;

/// Stop-management rule applied when scoring a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum BreakevenStrategy {
    /// Stop stays at its original level.
    #[default]
    #[serde(rename = "NO_BE")]
    NoBe,
    /// Stop moves to entry once price reaches 1R.
    #[serde(rename = "BE_1R")]
    Be1R,
    /// Stop moves to entry once price reaches 2R.
    #[serde(rename = "BE_2R")]
    Be2R,
}

impl BreakevenStrategy {
    pub const ALL: [BreakevenStrategy; 3] = [
        BreakevenStrategy::NoBe,
        BreakevenStrategy::Be1R,
        BreakevenStrategy::Be2R,
    ];
}

impl fmt::Display for BreakevenStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakevenStrategy::NoBe => write!(f, "NO_BE"),
            BreakevenStrategy::Be1R => write!(f, "BE_1R"),
            BreakevenStrategy::Be2R => write!(f, "BE_2R"),
        }
    }
}

impl FromStr for BreakevenStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "NO_BE" | "NONE" | "NOBE" => Ok(BreakevenStrategy::NoBe),
            "BE_1R" | "BE1R" | "BE1" => Ok(BreakevenStrategy::Be1R),
            "BE_2R" | "BE2R" | "BE2" => Ok(BreakevenStrategy::Be2R),
            other => Err(format!(
                "unknown breakeven strategy '{}' (expected NO_BE, BE_1R or BE_2R)",
                other
            )),
        }
    }
}

/// Where the R target for each trade comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RTargetMode {
    /// One target for every trade.
    Fixed(f64),
    /// Each trade's own `r_target`.
    PerTrade,
}

impl Default for RTargetMode {
    fn default() -> Self {
        RTargetMode::Fixed(DEFAULT_R_TARGET)
    }
}

impl FromStr for RTargetMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("per_trade") || s.eq_ignore_ascii_case("trade") {
            return Ok(RTargetMode::PerTrade);
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Ok(RTargetMode::Fixed(v)),
            _ => Err(format!(
                "r_target must be a positive number or 'per_trade', got '{}'",
                s
            )),
        }
    }
}

impl fmt::Display for RTargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RTargetMode::Fixed(v) => write!(f, "{}R", v),
            RTargetMode::PerTrade => write!(f, "per-trade"),
        }
    }
}

/// Inputs that shape one metrics computation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MetricsOptions {
    pub r_target: RTargetMode,
    pub breakeven_strategy: BreakevenStrategy,
}

impl MetricsOptions {
    pub fn new(r_target: f64, breakeven_strategy: BreakevenStrategy) -> Self {
        Self {
            r_target: RTargetMode::Fixed(r_target),
            breakeven_strategy,
        }
    }
}
