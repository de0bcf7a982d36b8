use thiserror::Error;
use tickerlens_core::{ProviderId, SourceError, ValidationError};

/// Errors returned by the analytics engine.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("insufficient data: need at least {required} prices, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("{provider} could not supply data: {source}")]
    DataUnavailable {
        provider: ProviderId,
        source: SourceError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AnalyticsError {
    pub fn data_unavailable(provider: ProviderId, source: SourceError) -> Self {
        Self::DataUnavailable { provider, source }
    }
}
