mod analyze;
mod backtest;
mod portfolio;
mod sentiment;
mod session;
mod sources;
mod watchlist;

use std::time::Instant;

use serde_json::Value;
use tickerlens_analytics::{AnalyticsEngine, EngineConfig};
use tickerlens_core::{
    DataSource, Envelope, EnvelopeError, EnvelopeMeta, PolygonAdapter, ProviderId, SessionStore,
    SourceError, TradingDate, UtcDateTime, YahooAdapter,
};
use tracing::info;
use uuid::Uuid;

use crate::cli::{Cli, Command, SourceSelector};
use crate::error::CliError;

pub const SCHEMA_VERSION: &str = "v1.0.0";

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub source_chain: Vec<ProviderId>,
}

impl CommandResult {
    pub fn ok(data: Value, source_chain: Vec<ProviderId>) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            source_chain,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_error(mut self, error: EnvelopeError) -> Self {
        self.errors.push(error);
        self
    }

    /// Records a degraded news fetch as a warning.
    pub fn with_news_failure(self, provider: ProviderId, failure: Option<&SourceError>) -> Self {
        match failure {
            Some(error) => self.with_warning(format!(
                "news unavailable from {provider}, sentiment treated as neutral: {error}"
            )),
            None => self,
        }
    }

    /// Records a headline fetch that hit its limit before the range end.
    pub fn with_news_truncation(self, truncated_after: Option<TradingDate>) -> Self {
        match truncated_after {
            Some(last) => self.with_warning(format!(
                "headline limit reached; news after {last} was not scored"
            )),
            None => self,
        }
    }
}

/// Shared inputs resolved once from global flags.
pub struct Context {
    pub selector: SourceSelector,
    pub config: EngineConfig,
    pub sessions: SessionStore,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        Ok(Self {
            selector: cli.source,
            config: EngineConfig::resolve(cli.config.as_deref())?,
            sessions: SessionStore::default(),
        })
    }

    pub fn provider(&self) -> ProviderId {
        self.selector.provider_id()
    }

    pub fn source(&self) -> Box<dyn DataSource> {
        adapter_for(self.provider())
    }

    pub fn engine(&self, config: EngineConfig) -> AnalyticsEngine {
        AnalyticsEngine::new(self.source(), config)
    }
}

pub fn adapter_for(provider: ProviderId) -> Box<dyn DataSource> {
    match provider {
        ProviderId::Yahoo => Box::new(YahooAdapter::default()),
        ProviderId::Polygon => Box::new(PolygonAdapter::default()),
    }
}

pub fn today() -> TradingDate {
    UtcDateTime::now().date()
}

pub fn parse_date_or(raw: Option<&str>, fallback: TradingDate) -> Result<TradingDate, CliError> {
    match raw {
        Some(value) => Ok(TradingDate::parse(value)?),
        None => Ok(fallback),
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();
    let context = Context::from_cli(cli)?;

    let command_result = match &cli.command {
        Command::Analyze(args) => analyze::run(args, &context)?,
        Command::Sentiment(args) => sentiment::run(args, &context)?,
        Command::Backtest(args) => backtest::run(args, &context)?,
        Command::Watchlist(args) => watchlist::run(args, &context)?,
        Command::Login(args) => session::login(args, &context)?,
        Command::Logout => session::logout(&context)?,
        Command::Portfolio(args) => portfolio::run(args, &context)?,
        Command::Sources(args) => sources::run(args)?,
    };

    let CommandResult {
        data,
        warnings,
        errors,
        source_chain,
    } = command_result;

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        SCHEMA_VERSION,
        source_chain,
        latency_ms,
    )?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    info!(
        request_id = %meta.request_id,
        latency_ms,
        warnings = meta.warnings.len(),
        errors = errors.len(),
        "command complete"
    );
    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}
