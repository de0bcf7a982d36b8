//! Core contracts for tickerlens.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - Provider identifiers, policies, and request throttling
//! - The [`DataSource`] trait and its deterministic adapters
//! - Response envelope and structured errors
//! - Session, watchlist, and portfolio bookkeeping

pub mod adapters;
pub mod data_source;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod provider_policy;
pub mod session;
pub mod source;
pub mod throttling;

pub use adapters::{PolygonAdapter, YahooAdapter};
pub use data_source::{
    CapabilitySet, DataSource, Endpoint, HeadlineBatch, HeadlineRequest, HealthState,
    HealthStatus, PriceRequest, QuoteBatch, QuoteRequest, SourceError, SourceErrorKind,
};
pub use domain::{
    validate_currency_code, DateRange, Headline, MarketKind, PricePoint, PriceSeries, Quote,
    Symbol, TradingDate, UtcDateTime,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::ValidationError;
pub use provider_policy::{BackoffPolicy, ProviderPolicy};
pub use session::{
    resolve_home, PortfolioValuation, Position, Session, SessionError, SessionStore,
    DEFAULT_SHARES,
};
pub use source::ProviderId;
pub use throttling::Throttle;
