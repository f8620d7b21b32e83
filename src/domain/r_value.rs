//! Realized R value of a trade under a breakeven strategy.

use super::strategy::{BreakevenStrategy, DEFAULT_R_TARGET, RTargetMode};
use super::trade::TradeRecord;
use serde::Serialize;

/// Score of one completed trade. `breakeven` is set when the stop was moved
/// to entry and the trade was scratched at 0R.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RealizedR {
    pub r: f64,
    pub breakeven: bool,
}

impl RealizedR {
    pub fn new(r: f64) -> Self {
        Self {
            r,
            breakeven: false,
        }
    }

    fn scratched() -> Self {
        Self {
            r: 0.0,
            breakeven: true,
        }
    }
}

/// Resolve a trade to its realized R under `strategy` with the given target.
///
/// Returns `None` for open trades and when the MFE value the strategy needs
/// was never recorded. A non-finite or non-positive target is treated as 1R.
pub fn resolve_r(
    trade: &TradeRecord,
    strategy: BreakevenStrategy,
    r_target: f64,
) -> Option<RealizedR> {
    if trade.is_active() {
        return None;
    }
    let target = sanitize_target(r_target);

    match strategy {
        BreakevenStrategy::NoBe => {
            let mfe = trade.mfe_none?;
            Some(RealizedR::new(if mfe >= target { target } else { -1.0 }))
        }
        BreakevenStrategy::Be1R => resolve_with_trigger(trade.be1_hit, trade.mfe_1r, target),
        BreakevenStrategy::Be2R => resolve_with_trigger(trade.be2_hit, trade.mfe_2r, target),
    }
}

/// Resolve using the analysis-wide target mode.
pub fn resolve_with_mode(
    trade: &TradeRecord,
    strategy: BreakevenStrategy,
    mode: RTargetMode,
) -> Option<RealizedR> {
    let target = match mode {
        RTargetMode::Fixed(v) => v,
        RTargetMode::PerTrade => trade.r_target,
    };
    resolve_r(trade, strategy, target)
}

/// The MFE value a strategy scores against.
pub fn mfe_for(trade: &TradeRecord, strategy: BreakevenStrategy) -> Option<f64> {
    match strategy {
        BreakevenStrategy::NoBe => trade.mfe_none,
        BreakevenStrategy::Be1R => trade.mfe_1r,
        BreakevenStrategy::Be2R => trade.mfe_2r,
    }
}

fn resolve_with_trigger(hit: bool, mfe: Option<f64>, target: f64) -> Option<RealizedR> {
    if !hit {
        return Some(RealizedR::new(-1.0));
    }
    let mfe = mfe?;
    if mfe >= target {
        Some(RealizedR::new(target))
    } else {
        Some(RealizedR::scratched())
    }
}

fn sanitize_target(r_target: f64) -> f64 {
    if r_target.is_finite() && r_target > 0.0 {
        r_target
    } else {
        DEFAULT_R_TARGET
    }
}
