//! # tickerlens analytics
//!
//! Pure, synchronous analytics over validated market data.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`sentiment`] | Headline polarity scoring |
//! | [`forecast`] | OLS trend fit and short-horizon projection |
//! | [`signal`] | Per-day sentiment aggregation |
//! | [`backtest`] | Sentiment, buy-and-hold, and DCA strategies |
//! | [`metrics`] | CAGR, Sharpe ratio, max drawdown |
//! | [`summary`] | Bullish/Bearish and trade-signal labels |
//! | [`engine`] | Provider-backed entry points |
//! | [`config`] | Engine tuning |
//!
//! ```no_run
//! use tickerlens_analytics::{AnalyticsEngine, EngineConfig};
//! use tickerlens_core::{Symbol, TradingDate, YahooAdapter};
//!
//! let engine = AnalyticsEngine::new(Box::new(YahooAdapter::default()), EngineConfig::default());
//! let symbol = Symbol::parse("NVDA").unwrap();
//! let analysis = engine
//!     .analyze_symbol(&symbol, TradingDate::parse("2024-06-28").unwrap())
//!     .unwrap();
//! println!("{} {:+.2}%", analysis.sentiment.headline_summary(), analysis.forecast.pct_change);
//! ```

pub mod backtest;
pub mod config;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod metrics;
pub mod sentiment;
pub mod signal;
pub mod summary;

pub use backtest::{BacktestResult, StrategyKind};
pub use config::{ConfigError, EngineConfig, StdDevKind};
pub use engine::{Analysis, AnalyticsEngine, BacktestRun, HeadlineFetch};
pub use error::AnalyticsError;
pub use forecast::{fit_and_forecast, ForecastPoint, ForecastResult, LinearTrend};
pub use metrics::PerformanceMetrics;
pub use sentiment::{score_or_neutral, LexiconScorer, ScorerError, SentimentScorer};
pub use signal::{aggregate, DailySentiment, ScoredHeadline};
pub use summary::{classify, SentimentLabel, SentimentReport, Summary, TradeSignal};
