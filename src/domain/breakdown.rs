//! Partitioned metrics: per session, bias or weekday, and per breakeven strategy.

use super::metrics::MetricsSummary;
use super::r_value::{RealizedR, resolve_with_mode};
use super::strategy::{BreakevenStrategy, MetricsOptions, RTargetMode};
use super::trade::TradeRecord;
use chrono::Datelike;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Field used to partition trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownKey {
    Session,
    Bias,
    Weekday,
}

impl BreakdownKey {
    fn label_for(self, trade: &TradeRecord) -> String {
        match self {
            BreakdownKey::Session => trade.session.to_string(),
            BreakdownKey::Bias => trade
                .bias
                .map(|b| b.to_string())
                .unwrap_or_else(|| "UNSPECIFIED".to_string()),
            BreakdownKey::Weekday => trade.date.weekday().to_string(),
        }
    }
}

impl fmt::Display for BreakdownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakdownKey::Session => write!(f, "session"),
            BreakdownKey::Bias => write!(f, "bias"),
            BreakdownKey::Weekday => write!(f, "weekday"),
        }
    }
}

impl FromStr for BreakdownKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "session" => Ok(BreakdownKey::Session),
            "bias" | "direction" => Ok(BreakdownKey::Bias),
            "weekday" | "day" => Ok(BreakdownKey::Weekday),
            other => Err(format!(
                "unknown breakdown '{}' (expected session, bias or weekday)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition {
    pub label: String,
    pub summary: MetricsSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub by: String,
    pub min_sample: usize,
    pub partitions: Vec<Partition>,
    /// Index into `partitions` of the recommended entry.
    pub recommended: Option<usize>,
}

impl Breakdown {
    pub fn recommended_partition(&self) -> Option<&Partition> {
        self.recommended.and_then(|i| self.partitions.get(i))
    }
}

/// Partition resolvable trades by `key` in first-seen order and summarize each.
pub fn breakdown(
    trades: &[TradeRecord],
    options: &MetricsOptions,
    key: BreakdownKey,
    min_sample: usize,
) -> Breakdown {
    let mut groups: Vec<(String, Vec<RealizedR>)> = Vec::new();

    for trade in trades {
        let Some(r) = resolve_with_mode(trade, options.breakeven_strategy, options.r_target) else {
            continue;
        };
        let label = key.label_for(trade);
        match groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, values)) => values.push(r),
            None => groups.push((label, vec![r])),
        }
    }

    let partitions: Vec<Partition> = groups
        .into_iter()
        .map(|(label, values)| Partition {
            label,
            summary: MetricsSummary::summarize(&values),
        })
        .collect();

    Breakdown {
        by: key.to_string(),
        min_sample,
        recommended: recommend(&partitions, min_sample),
        partitions,
    }
}

/// Summarize the same trades under every breakeven strategy, in
/// NO_BE, BE_1R, BE_2R order.
pub fn compare_strategies(
    trades: &[TradeRecord],
    r_target: RTargetMode,
    min_sample: usize,
) -> Breakdown {
    let partitions: Vec<Partition> = BreakevenStrategy::ALL
        .iter()
        .map(|&strategy| {
            let options = MetricsOptions {
                r_target,
                breakeven_strategy: strategy,
            };
            Partition {
                label: strategy.to_string(),
                summary: super::metrics::compute_metrics(trades, &options),
            }
        })
        .collect();

    Breakdown {
        by: "strategy".to_string(),
        min_sample,
        recommended: recommend(&partitions, min_sample),
        partitions,
    }
}

/// Highest expectancy among partitions with at least `min_sample` trades.
/// Earlier partitions win ties.
pub fn recommend(partitions: &[Partition], min_sample: usize) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in partitions.iter().enumerate() {
        if p.summary.total_trades < min_sample {
            continue;
        }
        let e = p.summary.expectancy;
        match best {
            Some((_, best_e)) if e <= best_e => {}
            _ => best = Some((i, e)),
        }
    }
    best.map(|(i, _)| i)
}
