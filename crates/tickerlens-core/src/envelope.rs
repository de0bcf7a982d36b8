use serde::{Deserialize, Serialize};

use crate::data_source::SourceError;
use crate::{ProviderId, UtcDateTime, ValidationError};

/// Standard response envelope for all `tickerlens` machine-readable outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn success(meta: EnvelopeMeta, data: T) -> Self {
        Self {
            meta,
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(
        meta: EnvelopeMeta,
        data: T,
        errors: Vec<EnvelopeError>,
    ) -> Result<Self, ValidationError> {
        meta.validate()?;
        for error in &errors {
            error.validate()?;
        }

        Ok(Self { meta, data, errors })
    }

    /// True when the response carries warnings or partial-failure errors.
    pub fn is_degraded(&self) -> bool {
        !self.errors.is_empty() || !self.meta.warnings.is_empty()
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub schema_version: String,
    pub generated_at: UtcDateTime,
    pub source_chain: Vec<ProviderId>,
    pub latency_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(
        request_id: impl Into<String>,
        schema_version: impl Into<String>,
        source_chain: Vec<ProviderId>,
        latency_ms: u64,
    ) -> Result<Self, ValidationError> {
        let meta = Self {
            request_id: request_id.into(),
            schema_version: schema_version.into(),
            generated_at: UtcDateTime::now(),
            source_chain,
            latency_ms,
            warnings: Vec::new(),
        };
        meta.validate()?;
        Ok(meta)
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_id.trim().len() < 8 {
            return Err(ValidationError::InvalidRequestId);
        }

        if !is_valid_schema_version(&self.schema_version) {
            return Err(ValidationError::InvalidSchemaVersion {
                value: self.schema_version.clone(),
            });
        }

        if self.source_chain.is_empty() {
            return Err(ValidationError::EmptySourceChain);
        }

        Ok(())
    }
}

/// Structured error payload for partial or failed responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ProviderId>,
}

impl EnvelopeError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let error = Self {
            code: code.into(),
            message: message.into(),
            retryable: None,
            source: None,
        };
        error.validate()?;
        Ok(error)
    }

    /// Carries a provider failure into the envelope without losing its code.
    pub fn from_source_error(source: ProviderId, error: &SourceError) -> Self {
        Self {
            code: error.code().to_owned(),
            message: error.message().to_owned(),
            retryable: Some(error.retryable()),
            source: Some(source),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::EmptyErrorCode);
        }

        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyErrorMessage);
        }

        Ok(())
    }
}

fn is_valid_schema_version(value: &str) -> bool {
    let Some(version) = value.strip_prefix('v') else {
        return false;
    };

    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|segment| !segment.is_empty() && segment.chars().all(|ch| ch.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_meta() {
        let meta = EnvelopeMeta::new("request-12345", "v1.0.0", vec![ProviderId::Yahoo], 11)
            .expect("meta should be valid");

        assert_eq!(meta.schema_version, "v1.0.0");
        assert!(meta.warnings.is_empty());
    }

    #[test]
    fn rejects_bad_schema_version() {
        for version in ["1.0.0", "v1.0", "v1.0.x", "v1..0"] {
            let err = EnvelopeMeta::new("request-12345", version, vec![ProviderId::Yahoo], 1)
                .expect_err("must fail");
            assert!(matches!(err, ValidationError::InvalidSchemaVersion { .. }));
        }
    }

    #[test]
    fn rejects_short_request_id_and_empty_chain() {
        let err = EnvelopeMeta::new("abc", "v1.0.0", vec![ProviderId::Yahoo], 1)
            .expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidRequestId);

        let err = EnvelopeMeta::new("request-12345", "v1.0.0", Vec::new(), 1)
            .expect_err("must fail");
        assert_eq!(err, ValidationError::EmptySourceChain);
    }

    #[test]
    fn rejects_empty_error_code() {
        let err = EnvelopeError::new("", "message").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyErrorCode));
    }

    #[test]
    fn source_errors_keep_their_code() {
        let error = EnvelopeError::from_source_error(
            ProviderId::Polygon,
            &SourceError::rate_limited("retry in 12s"),
        );
        assert_eq!(error.code, "source.rate_limited");
        assert_eq!(error.retryable, Some(true));
        assert_eq!(error.source, Some(ProviderId::Polygon));
    }

    #[test]
    fn local_errors_leave_out_provider_fields() {
        let error = EnvelopeError::new("cli.watchlist_empty", "watchlist is empty").expect("error");
        let json = serde_json::to_value(&error).expect("json");
        assert!(json.get("retryable").is_none());
        assert!(json.get("source").is_none());
    }

    #[test]
    fn warnings_mark_the_envelope_degraded() {
        let mut meta = EnvelopeMeta::new("request-12345", "v1.0.0", vec![ProviderId::Yahoo], 3)
            .expect("meta");
        let clean = Envelope::success(meta.clone(), 1_u8);
        assert!(!clean.is_degraded());

        meta.push_warning("news unavailable");
        assert!(Envelope::success(meta, 1_u8).is_degraded());
    }
}
