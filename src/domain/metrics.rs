//! Performance metrics over realized R values and currency profit.

use super::r_value::{RealizedR, resolve_with_mode};
use super::strategy::MetricsOptions;
use super::trade::TradeRecord;
use serde::Serialize;

/// Profit factor reported when there are wins but no losses.
pub const PROFIT_FACTOR_NO_LOSSES: f64 = f64::INFINITY;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MetricsSummary {
    pub total_trades: usize,
    /// Open trades: no MFE recorded under any strategy.
    pub active_trades: usize,
    /// Closed trades the strategy cannot score because its MFE is missing.
    pub unresolved_trades: usize,
    /// Percent of trades that won or were scratched at breakeven, one decimal.
    pub win_rate: f64,
    /// Mean R per trade, two decimals.
    pub expectancy: f64,
    pub total_r: f64,
    /// Largest peak-to-trough fall of cumulative R, as a non-negative R amount.
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    /// Gross winning R divided by the number of losing trades.
    #[serde(serialize_with = "serialize_ratio")]
    pub profit_factor: f64,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    pub max_consecutive_wins: usize,
    pub max_consecutive_losses: usize,
}

impl MetricsSummary {
    /// Reduce a sequence of realized R values.
    pub fn summarize(values: &[RealizedR]) -> Self {
        let total_trades = values.len();

        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut trades_breakeven = 0usize;
        let mut winners_or_scratched = 0usize;
        let mut gross_win = 0.0_f64;
        let mut gross_loss = 0.0_f64;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;
        let mut win_streak = 0usize;
        let mut loss_streak = 0usize;
        let mut max_consecutive_wins = 0usize;
        let mut max_consecutive_losses = 0usize;

        for v in values {
            let r = v.r;
            if r > 0.0 || v.breakeven {
                winners_or_scratched += 1;
            }
            if r > 0.0 {
                trades_won += 1;
                gross_win += r;
                largest_win = largest_win.max(r);
                win_streak += 1;
                loss_streak = 0;
            } else if r < 0.0 {
                trades_lost += 1;
                gross_loss += r.abs();
                largest_loss = largest_loss.max(r.abs());
                loss_streak += 1;
                win_streak = 0;
            } else {
                trades_breakeven += 1;
                win_streak = 0;
                loss_streak = 0;
            }
            max_consecutive_wins = max_consecutive_wins.max(win_streak);
            max_consecutive_losses = max_consecutive_losses.max(loss_streak);
        }

        let rs: Vec<f64> = values.iter().map(|v| v.r).collect();
        let total_r: f64 = rs.iter().sum();

        let (win_rate, expectancy) = if total_trades > 0 {
            (
                round_to(winners_or_scratched as f64 / total_trades as f64 * 100.0, 1),
                round_to(total_r / total_trades as f64, 2),
            )
        } else {
            (0.0, 0.0)
        };

        let profit_factor = if trades_lost > 0 {
            gross_win / trades_lost as f64
        } else if trades_won > 0 {
            PROFIT_FACTOR_NO_LOSSES
        } else {
            0.0
        };

        let avg_win = if trades_won > 0 {
            gross_win / trades_won as f64
        } else {
            0.0
        };

        let avg_loss = if trades_lost > 0 {
            gross_loss / trades_lost as f64
        } else {
            0.0
        };

        MetricsSummary {
            total_trades,
            active_trades: 0,
            unresolved_trades: 0,
            win_rate,
            expectancy,
            total_r,
            max_drawdown: compute_drawdown(&rs),
            sharpe_ratio: compute_sharpe(&rs),
            profit_factor,
            trades_won,
            trades_lost,
            trades_breakeven,
            avg_win,
            avg_loss,
            largest_win,
            largest_loss,
            max_consecutive_wins,
            max_consecutive_losses,
        }
    }

    /// Reduce plain R values; none of them carries the breakeven flag.
    pub fn summarize_values(values: &[f64]) -> Self {
        let realized: Vec<RealizedR> = values.iter().copied().map(RealizedR::new).collect();
        Self::summarize(&realized)
    }
}

/// Score every trade under `options` and summarize the completed ones.
///
/// Trades the resolver cannot score are counted in `active_trades` (open)
/// or `unresolved_trades` (closed) and otherwise ignored. Input order is
/// the order used for drawdown and streaks.
pub fn compute_metrics(trades: &[TradeRecord], options: &MetricsOptions) -> MetricsSummary {
    let realized = resolve_all(trades, options);
    let mut summary = MetricsSummary::summarize(&realized);
    summary.active_trades = trades.iter().filter(|t| t.is_active()).count();
    summary.unresolved_trades = trades.len() - realized.len() - summary.active_trades;
    summary
}

/// Realized R of every resolvable trade, in input order.
pub fn resolve_all(trades: &[TradeRecord], options: &MetricsOptions) -> Vec<RealizedR> {
    trades
        .iter()
        .filter_map(|t| resolve_with_mode(t, options.breakeven_strategy, options.r_target))
        .collect()
}

/// Statistics over the currency `profit` of trades that record one.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProfitSummary {
    pub total_trades: usize,
    pub net_profit: f64,
    pub win_rate: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    /// Gross profit over gross loss.
    #[serde(serialize_with = "serialize_ratio")]
    pub profit_factor: f64,
    /// Largest peak-to-trough fall of cumulative profit, non-negative.
    pub max_drawdown: f64,
}

impl ProfitSummary {
    pub fn compute(trades: &[TradeRecord]) -> Self {
        let profits: Vec<f64> = trades.iter().filter_map(|t| t.profit).collect();

        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut total_wins = 0.0_f64;
        let mut total_losses = 0.0_f64;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;

        for &pnl in &profits {
            if pnl > 0.0 {
                trades_won += 1;
                total_wins += pnl;
                if pnl > largest_win {
                    largest_win = pnl;
                }
            } else if pnl < 0.0 {
                trades_lost += 1;
                total_losses += pnl.abs();
                if pnl.abs() > largest_loss {
                    largest_loss = pnl.abs();
                }
            }
        }

        let total_trades = profits.len();
        let win_rate = if total_trades > 0 {
            round_to(trades_won as f64 / total_trades as f64 * 100.0, 1)
        } else {
            0.0
        };

        let profit_factor = if total_losses > 0.0 {
            total_wins / total_losses
        } else if total_wins > 0.0 {
            PROFIT_FACTOR_NO_LOSSES
        } else {
            0.0
        };

        ProfitSummary {
            total_trades,
            net_profit: total_wins - total_losses,
            win_rate,
            avg_win: if trades_won > 0 {
                total_wins / trades_won as f64
            } else {
                0.0
            },
            avg_loss: if trades_lost > 0 {
                total_losses / trades_lost as f64
            } else {
                0.0
            },
            largest_win,
            largest_loss,
            profit_factor,
            max_drawdown: compute_drawdown(&profits),
        }
    }
}

/// Maximum drawdown of the running sum of `values`, starting from zero.
pub fn compute_drawdown(values: &[f64]) -> f64 {
    let mut cumulative = 0.0_f64;
    let mut peak = 0.0_f64;
    let mut max_dd = 0.0_f64;

    for v in values {
        cumulative += v;
        if cumulative > peak {
            peak = cumulative;
        }
        let dd = peak - cumulative;
        if dd > max_dd {
            max_dd = dd;
        }
    }

    max_dd
}

/// Mean over population standard deviation, unannualized.
pub fn compute_sharpe(values: &[f64]) -> f64 {
    if values.len() < 2 || values.iter().all(|v| *v == values[0]) {
        return 0.0;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    if stddev > 0.0 { mean / stddev } else { 0.0 }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// JSON has no infinity; unbounded ratios are written as the string "inf".
fn serialize_ratio<S: serde::Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_infinite() {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_f64(*value)
    }
}
