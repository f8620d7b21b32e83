//! Domain error types.

/// Why a raw record could not be turned into a [`TradeRecord`](super::trade::TradeRecord).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("record {index}: missing or unparseable date")]
    MissingDate { index: usize },

    #[error("record {index}: expected an object, found {found}")]
    NotAnObject { index: usize, found: String },
}

/// Top-level error type for tradejournal.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("cannot read trades from {source_path}: {reason}")]
    TradeSource { source_path: String, reason: String },

    #[error("no trades to analyse ({loaded} loaded, {rejected} rejected)")]
    NoTrades { loaded: usize, rejected: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl JournalError {
    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            JournalError::Io(_) => 1,
            JournalError::ConfigParse { .. }
            | JournalError::ConfigMissing { .. }
            | JournalError::ConfigInvalid { .. } => 2,
            JournalError::TradeSource { .. } | JournalError::Json(_) | JournalError::Csv(_) => 3,
            JournalError::NoTrades { .. } => 4,
        }
    }
}

impl From<&JournalError> for std::process::ExitCode {
    fn from(err: &JournalError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
