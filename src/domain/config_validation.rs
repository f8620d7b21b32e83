//! Configuration validation.
//!
//! Checks every analysis setting before trades are loaded, so a bad value
//! is reported against its section and key instead of silently defaulting.

use crate::domain::error::JournalError;
use crate::domain::strategy::{BreakevenStrategy, RTargetMode};
use crate::domain::trade::Bias;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportFormat;
use crate::ports::trade_port::SourceFormat;
use chrono::NaiveDate;

pub fn validate_journal_config(config: &dyn ConfigPort) -> Result<(), JournalError> {
    validate_source_format(config)?;
    validate_analysis_config(config)?;
    validate_filter_config(config)?;
    validate_report_config(config)?;
    Ok(())
}

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), JournalError> {
    validate_r_target(config)?;
    validate_strategy(config)?;
    validate_min_sample(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> JournalError {
    JournalError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_source_format(config: &dyn ConfigPort) -> Result<(), JournalError> {
    match config.get_string("journal", "format") {
        None => Ok(()),
        Some(f) => f
            .parse::<SourceFormat>()
            .map(|_| ())
            .map_err(|reason| invalid("journal", "format", reason)),
    }
}

fn validate_r_target(config: &dyn ConfigPort) -> Result<(), JournalError> {
    match config.get_string("analysis", "r_target") {
        None => Ok(()),
        Some(s) => s
            .parse::<RTargetMode>()
            .map(|_| ())
            .map_err(|reason| invalid("analysis", "r_target", reason)),
    }
}

fn validate_strategy(config: &dyn ConfigPort) -> Result<(), JournalError> {
    match config.get_string("analysis", "breakeven_strategy") {
        None => Ok(()),
        Some(s) => s
            .parse::<BreakevenStrategy>()
            .map(|_| ())
            .map_err(|reason| invalid("analysis", "breakeven_strategy", reason)),
    }
}

fn validate_min_sample(config: &dyn ConfigPort) -> Result<(), JournalError> {
    let Some(raw) = config.get_string("analysis", "min_sample") else {
        return Ok(());
    };
    match raw.trim().parse::<i64>() {
        Ok(v) if v >= 1 => Ok(()),
        _ => Err(invalid(
            "analysis",
            "min_sample",
            "min_sample must be a whole number of at least 1",
        )),
    }
}

fn validate_filter_config(config: &dyn ConfigPort) -> Result<(), JournalError> {
    let from = parse_optional_date(config, "from")?;
    let to = parse_optional_date(config, "to")?;
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(invalid("filter", "from", "from must not be after to"));
        }
    }

    if let Some(bias) = config.get_string("filter", "bias") {
        if Bias::parse(&bias).is_none() {
            return Err(invalid(
                "filter",
                "bias",
                format!("unknown bias '{}' (expected LONG or SHORT)", bias),
            ));
        }
    }
    Ok(())
}

fn parse_optional_date(config: &dyn ConfigPort, key: &str) -> Result<Option<NaiveDate>, JournalError> {
    match config.get_string("filter", key) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                invalid(
                    "filter",
                    key,
                    format!("invalid {} format, expected YYYY-MM-DD", key),
                )
            }),
    }
}

fn validate_report_config(config: &dyn ConfigPort) -> Result<(), JournalError> {
    match config.get_string("report", "format") {
        None => Ok(()),
        Some(f) => f
            .parse::<ReportFormat>()
            .map(|_| ())
            .map_err(|reason| invalid("report", "format", reason)),
    }
}
