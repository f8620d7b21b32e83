//! Core domain types and logic.

pub mod trade;
pub mod normalize;
pub mod journal;
pub mod strategy;
pub mod r_value;
pub mod metrics;
pub mod breakdown;
pub mod distribution;
pub mod report;
pub mod config_validation;
pub mod error;
