//! tradejournal: trading journal performance analysis.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;

pub use domain::journal::{Journal, TradeFilter};
pub use domain::metrics::{MetricsSummary, compute_metrics};
pub use domain::strategy::{BreakevenStrategy, MetricsOptions, RTargetMode};
pub use domain::trade::TradeRecord;
