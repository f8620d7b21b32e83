//! Plain-text console report adapter.

use crate::domain::breakdown::Breakdown;
use crate::domain::distribution::RDistribution;
use crate::domain::error::JournalError;
use crate::domain::metrics::{MetricsSummary, ProfitSummary};
use crate::domain::report::{Report, ReportContext};
use crate::ports::report_port::ReportPort;
use std::fmt::Write;

pub struct TextReportAdapter;

impl ReportPort for TextReportAdapter {
    fn render(&self, report: &Report) -> Result<String, JournalError> {
        let mut out = String::new();
        write_context(&mut out, report.context());
        match report {
            Report::Stats(r) => {
                write_metrics(&mut out, &r.metrics);
                if r.profit.total_trades > 0 {
                    write_profit(&mut out, &r.profit);
                }
            }
            Report::Compare(r) => write_breakdown(&mut out, "Strategy Comparison", &r.breakdown),
            Report::Breakdown(r) => {
                let title = format!("Breakdown by {}", r.breakdown.by);
                write_breakdown(&mut out, &title, &r.breakdown)
            }
            Report::Distribution(r) => write_distribution(&mut out, &r.distribution),
        }
        Ok(out)
    }
}

fn ratio(value: f64) -> String {
    if value.is_infinite() {
        "inf".to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn write_context(out: &mut String, ctx: &ReportContext) {
    let _ = writeln!(out, "Source:           {}", ctx.source);
    let _ = writeln!(
        out,
        "Trades:           {} loaded, {} rejected, {} analysed",
        ctx.loaded, ctx.rejected, ctx.analysed
    );
    let _ = writeln!(
        out,
        "Strategy:         {} @ {}",
        ctx.options.breakeven_strategy, ctx.options.r_target
    );
}

fn write_metrics(out: &mut String, m: &MetricsSummary) {
    let _ = writeln!(out, "\n=== Performance (R) ===");
    let _ = writeln!(out, "Completed Trades: {}", m.total_trades);
    let _ = writeln!(out, "Active Trades:    {}", m.active_trades);
    if m.unresolved_trades > 0 {
        let _ = writeln!(out, "Unresolved:       {}", m.unresolved_trades);
    }
    let _ = writeln!(out, "Win Rate:         {:.1}%", m.win_rate);
    let _ = writeln!(out, "Expectancy:       {:.2}R", m.expectancy);
    let _ = writeln!(out, "Total:            {:.2}R", m.total_r);
    let _ = writeln!(out, "Max Drawdown:     {:.2}R", m.max_drawdown);
    let _ = writeln!(out, "Sharpe Ratio:     {:.2}", m.sharpe_ratio);
    let _ = writeln!(out, "Profit Factor:    {}", ratio(m.profit_factor));
    let _ = writeln!(
        out,
        "Won/Lost/BE:      {}/{}/{}",
        m.trades_won, m.trades_lost, m.trades_breakeven
    );
    let _ = writeln!(out, "Avg Win:          {:.2}R", m.avg_win);
    let _ = writeln!(out, "Avg Loss:         {:.2}R", m.avg_loss);
    let _ = writeln!(
        out,
        "Streaks:          {} wins, {} losses",
        m.max_consecutive_wins, m.max_consecutive_losses
    );
}

fn write_profit(out: &mut String, p: &ProfitSummary) {
    let sign = if p.net_profit >= 0.0 { "+" } else { "-" };
    let _ = writeln!(out, "\n=== Profit ===");
    let _ = writeln!(out, "Trades:           {}", p.total_trades);
    let _ = writeln!(out, "Net Profit:       {}{:.2}", sign, p.net_profit.abs());
    let _ = writeln!(out, "Win Rate:         {:.1}%", p.win_rate);
    let _ = writeln!(out, "Profit Factor:    {}", ratio(p.profit_factor));
    let _ = writeln!(out, "Largest Win:      {:.2}", p.largest_win);
    let _ = writeln!(out, "Largest Loss:     {:.2}", p.largest_loss);
    let _ = writeln!(out, "Max Drawdown:     {:.2}", p.max_drawdown);
}

fn write_breakdown(out: &mut String, title: &str, b: &Breakdown) {
    let _ = writeln!(out, "\n=== {} ===", title);
    let _ = writeln!(
        out,
        "  {:<14} {:>6} {:>8} {:>10} {:>8} {:>8}",
        "", "trades", "win %", "expectancy", "max dd", "pf"
    );
    for (i, p) in b.partitions.iter().enumerate() {
        let marker = if b.recommended == Some(i) { "*" } else { " " };
        let s = &p.summary;
        let _ = writeln!(
            out,
            "{} {:<14} {:>6} {:>8.1} {:>9.2}R {:>7.2}R {:>8}",
            marker,
            p.label,
            s.total_trades,
            s.win_rate,
            s.expectancy,
            s.max_drawdown,
            ratio(s.profit_factor)
        );
    }
    match b.recommended_partition() {
        Some(p) => {
            let _ = writeln!(
                out,
                "\nRecommended: {} ({:.2}R expectancy over {} trades)",
                p.label, p.summary.expectancy, p.summary.total_trades
            );
        }
        None => {
            let _ = writeln!(
                out,
                "\nRecommended: none (no {} with at least {} trades)",
                b.by, b.min_sample
            );
        }
    }
}

fn write_distribution(out: &mut String, d: &RDistribution) {
    let _ = writeln!(out, "\n=== MFE Distribution ({}) ===", d.strategy);
    for b in &d.buckets {
        let bar = "#".repeat((b.percent / 2.0).round() as usize);
        let _ = writeln!(
            out,
            "  {:<10} {:>5} {:>6.1}% {}",
            b.label, b.count, b.percent, bar
        );
    }
    let _ = writeln!(out, "  {:<10} {:>5}", "total", d.total);
}
