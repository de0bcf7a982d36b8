//! # Domain Models
//!
//! Canonical domain types for tickerlens market data.
//!
//! All models validate their invariants at construction time, so the
//! analytics engine can treat a [`PriceSeries`] as non-empty, strictly
//! ordered, and free of zero or non-finite closes.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PricePoint`] | One daily close |
//! | [`PriceSeries`] | Ordered closes for a symbol |
//! | [`Headline`] | News headline with publication instant |
//! | [`Quote`] | Latest price used for portfolio valuation |
//! | [`Symbol`] | Validated stock or crypto ticker |
//! | [`TradingDate`] | Calendar date keying prices and sentiment |
//! | [`DateRange`] | Inclusive calendar range |
//! | [`UtcDateTime`] | UTC timestamp |

mod date;
mod models;
mod symbol;
mod timestamp;

pub use date::{DateRange, TradingDate};
pub use models::{validate_currency_code, Headline, PricePoint, PriceSeries, Quote};
pub use symbol::{MarketKind, Symbol};
pub use timestamp::UtcDateTime;
