//! Report payloads handed to [`ReportPort`](crate::ports::report_port::ReportPort) adapters.

use super::breakdown::Breakdown;
use super::distribution::RDistribution;
use super::metrics::{MetricsSummary, ProfitSummary};
use super::strategy::MetricsOptions;
use serde::Serialize;

/// Where the analysed trades came from and how many survived each step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportContext {
    pub source: String,
    pub loaded: usize,
    pub rejected: usize,
    /// Trades left after filtering.
    pub analysed: usize,
    pub options: MetricsOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub context: ReportContext,
    pub metrics: MetricsSummary,
    pub profit: ProfitSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownReport {
    pub context: ReportContext,
    pub breakdown: Breakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionReport {
    pub context: ReportContext,
    pub distribution: RDistribution,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    Stats(StatsReport),
    Compare(BreakdownReport),
    Breakdown(BreakdownReport),
    Distribution(DistributionReport),
}

impl Report {
    pub fn context(&self) -> &ReportContext {
        match self {
            Report::Stats(r) => &r.context,
            Report::Compare(r) | Report::Breakdown(r) => &r.context,
            Report::Distribution(r) => &r.context,
        }
    }
}
