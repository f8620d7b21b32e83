//! Histogram of maximum favorable excursion in R.

use super::r_value::mfe_for;
use super::strategy::BreakevenStrategy;
use super::trade::TradeRecord;
use serde::Serialize;

/// Bucket boundaries in R. Each bucket is `[lower, upper)`.
const EDGES: [f64; 4] = [0.0, 1.0, 2.0, 3.0];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RDistribution {
    pub strategy: BreakevenStrategy,
    pub total: usize,
    pub buckets: Vec<Bucket>,
}

/// Bucket the MFE value `strategy` scores against. Trades without it are skipped.
pub fn r_distribution(trades: &[TradeRecord], strategy: BreakevenStrategy) -> RDistribution {
    let mut buckets = empty_buckets();

    let values: Vec<f64> = trades.iter().filter_map(|t| mfe_for(t, strategy)).collect();
    for v in &values {
        let idx = EDGES.iter().take_while(|edge| *v >= **edge).count();
        buckets[idx].count += 1;
    }

    let total = values.len();
    if total > 0 {
        for b in &mut buckets {
            b.percent = (b.count as f64 / total as f64 * 1000.0).round() / 10.0;
        }
    }

    RDistribution {
        strategy,
        total,
        buckets,
    }
}

fn empty_buckets() -> Vec<Bucket> {
    let mut buckets = Vec::with_capacity(EDGES.len() + 1);
    buckets.push(Bucket {
        label: format!("< {}R", EDGES[0]),
        lower: None,
        upper: Some(EDGES[0]),
        count: 0,
        percent: 0.0,
    });
    for pair in EDGES.windows(2) {
        buckets.push(Bucket {
            label: format!("{}R to {}R", pair[0], pair[1]),
            lower: Some(pair[0]),
            upper: Some(pair[1]),
            count: 0,
            percent: 0.0,
        });
    }
    let last = EDGES[EDGES.len() - 1];
    buckets.push(Bucket {
        label: format!(">= {}R", last),
        lower: Some(last),
        upper: None,
        count: 0,
        percent: 0.0,
    });
    buckets
}
