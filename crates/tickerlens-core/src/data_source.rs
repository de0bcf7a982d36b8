//! Data source trait and request/response types.
//!
//! Every market or news provider implements [`DataSource`]. Adapters that do
//! not serve an endpoint report it through [`CapabilitySet`] and answer with
//! [`SourceError::unsupported_endpoint`].
//!
//! | Endpoint | Request | Response |
//! |----------|---------|----------|
//! | Prices | [`PriceRequest`] | [`PriceSeries`] |
//! | Headlines | [`HeadlineRequest`] | [`HeadlineBatch`] |
//! | Quote | [`QuoteRequest`] | [`QuoteBatch`] |

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{DateRange, Headline, PriceSeries, ProviderId, Quote, Symbol};

/// Data endpoint type used for capability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Prices,
    Headlines,
    Quote,
}

impl Endpoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prices => "prices",
            Self::Headlines => "headlines",
            Self::Quote => "quote",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported endpoint matrix for a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    pub prices: bool,
    pub headlines: bool,
    pub quote: bool,
}

impl CapabilitySet {
    pub const fn new(prices: bool, headlines: bool, quote: bool) -> Self {
        Self {
            prices,
            headlines,
            quote,
        }
    }

    pub const fn full() -> Self {
        Self::new(true, true, true)
    }

    pub const fn supports(self, endpoint: Endpoint) -> bool {
        match endpoint {
            Endpoint::Prices => self.prices,
            Endpoint::Headlines => self.headlines,
            Endpoint::Quote => self.quote,
        }
    }

    pub fn supported_endpoints(self) -> Vec<&'static str> {
        [Endpoint::Prices, Endpoint::Headlines, Endpoint::Quote]
            .into_iter()
            .filter(|endpoint| self.supports(*endpoint))
            .map(Endpoint::as_str)
            .collect()
    }
}

/// Health state reported by adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Runtime source health snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub state: HealthState,
    pub rate_available: bool,
}

impl HealthStatus {
    pub const fn new(state: HealthState, rate_available: bool) -> Self {
        Self {
            state,
            rate_available,
        }
    }

    pub const fn healthy() -> Self {
        Self::new(HealthState::Healthy, true)
    }

    pub fn status_label(self) -> &'static str {
        if !self.rate_available {
            return "rate_limited";
        }

        match self.state {
            HealthState::Healthy => "healthy",
            HealthState::Degraded => "degraded",
            HealthState::Unhealthy => "unhealthy",
        }
    }
}

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceErrorKind {
    UnsupportedEndpoint,
    Unavailable,
    RateLimited,
    InvalidRequest,
    NoTradingDays,
    Internal,
}

/// Structured provider error; every variant maps to a data-unavailable outcome upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unsupported_endpoint(endpoint: Endpoint) -> Self {
        Self {
            kind: SourceErrorKind::UnsupportedEndpoint,
            message: format!("endpoint '{endpoint}' is not supported by this source"),
            retryable: false,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    /// The range is valid but holds no session for `symbol`, e.g. a weekend for a stock.
    pub fn no_trading_days(symbol: &Symbol, range: DateRange) -> Self {
        Self {
            kind: SourceErrorKind::NoTradingDays,
            message: format!(
                "no trading days for '{symbol}' between {} and {}",
                range.start, range.end
            ),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::UnsupportedEndpoint => "source.unsupported_endpoint",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::NoTradingDays => "source.no_trading_days",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for daily close history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRequest {
    pub symbol: Symbol,
    pub range: DateRange,
}

impl PriceRequest {
    pub fn new(symbol: Symbol, range: DateRange) -> Self {
        Self { symbol, range }
    }
}

/// Request payload for news headlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineRequest {
    pub symbol: Symbol,
    pub range: DateRange,
    pub limit: usize,
}

impl HeadlineRequest {
    pub fn new(symbol: Symbol, range: DateRange, limit: usize) -> Result<Self, SourceError> {
        if limit == 0 {
            return Err(SourceError::invalid_request(
                "headline request limit must be greater than zero",
            ));
        }
        Ok(Self {
            symbol,
            range,
            limit,
        })
    }
}

/// Request payload for latest quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub symbols: Vec<Symbol>,
}

impl QuoteRequest {
    pub fn new(symbols: Vec<Symbol>) -> Result<Self, SourceError> {
        if symbols.is_empty() {
            return Err(SourceError::invalid_request(
                "quote request must include at least one symbol",
            ));
        }
        Ok(Self { symbols })
    }
}

/// Headlines returned for one symbol, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineBatch {
    pub symbol: Symbol,
    pub headlines: Vec<Headline>,
}

/// Normalized quote batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBatch {
    pub quotes: Vec<Quote>,
}

/// Source adapter contract.
pub trait DataSource: Send + Sync {
    fn id(&self) -> ProviderId;
    fn capabilities(&self) -> CapabilitySet;
    fn prices(&self, req: &PriceRequest) -> Result<PriceSeries, SourceError>;
    fn headlines(&self, req: &HeadlineRequest) -> Result<HeadlineBatch, SourceError>;
    fn quote(&self, req: &QuoteRequest) -> Result<QuoteBatch, SourceError>;
    fn health(&self) -> HealthStatus;
}
