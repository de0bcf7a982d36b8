use thiserror::Error;
use tickerlens_analytics::{AnalyticsError, ConfigError};
use tickerlens_core::{SessionError, ValidationError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error("strict mode failed: warnings={warning_count}, errors={error_count}")]
    StrictModeViolation {
        warning_count: usize,
        error_count: usize,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Exit code for a response that carries envelope errors.
pub const PARTIAL_FAILURE_EXIT: u8 = 4;

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Command(_) => 2,
            Self::Analytics(AnalyticsError::Validation(_)) => 2,
            Self::Analytics(AnalyticsError::InsufficientData { .. }) => 3,
            Self::Analytics(AnalyticsError::DataUnavailable { .. }) => 4,
            Self::StrictModeViolation { .. } => 5,
            Self::Config(_) | Self::Session(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
