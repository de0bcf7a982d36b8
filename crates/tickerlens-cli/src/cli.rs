//! CLI argument definitions for tickerlens.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Trend forecast, news sentiment, and trade labels |
//! | `sentiment` | Headline scores and daily sentiment |
//! | `backtest` | Sentiment, buy-and-hold, or DCA backtest |
//! | `watchlist` | Add, remove, or list watched symbols |
//! | `login` / `logout` | Session user |
//! | `portfolio` | Value watched holdings at latest quotes |
//! | `sources` | Data source capability matrix |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--source` | `yahoo` | Data provider |
//! | `--config` | `$TICKERLENS_HOME/config.json` | Engine config file |
//! | `-v` | off | Debug logging on stderr |
//!
//! # Examples
//!
//! ```bash
//! tickerlens analyze NVDA --pretty
//! tickerlens backtest AAPL --start 2024-01-01 --end 2024-06-30 --source polygon
//! tickerlens portfolio --shares NVDA=4 --format table
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tickerlens_analytics::StrategyKind;
use tickerlens_core::ProviderId;

/// Price trend forecasts, headline sentiment, and strategy backtests.
#[derive(Debug, Parser)]
#[command(name = "tickerlens", author, version, about)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Provider for prices, headlines, and quotes.
    #[arg(long, global = true, value_enum, default_value_t = SourceSelector::Yahoo)]
    pub source: SourceSelector,

    /// Engine config file; defaults to `config.json` in the tickerlens home.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Ndjson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceSelector {
    Yahoo,
    Polygon,
}

impl SourceSelector {
    pub const fn provider_id(self) -> ProviderId {
        match self {
            Self::Yahoo => ProviderId::Yahoo,
            Self::Polygon => ProviderId::Polygon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Sentiment,
    BuyAndHold,
    Dca,
}

impl From<StrategyArg> for StrategyKind {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Sentiment => Self::Sentiment,
            StrategyArg::BuyAndHold => Self::BuyAndHold,
            StrategyArg::Dca => Self::DollarCostAveraging,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Forecast the next days from a linear trend and score recent news.
    ///
    ///   tickerlens analyze NVDA
    ///   tickerlens analyze BTC-USD --days 180 --horizon 14
    Analyze(AnalyzeArgs),

    /// Score headlines for a symbol over a date range.
    Sentiment(SentimentArgs),

    /// Backtest a strategy against buy-and-hold.
    ///
    ///   tickerlens backtest AAPL --start 2024-01-01 --end 2024-03-31 --strategy dca
    Backtest(BacktestArgs),

    /// Manage the watchlist.
    Watchlist(WatchlistArgs),

    /// Set the session user.
    Login(LoginArgs),

    /// Clear the session user.
    Logout,

    /// Value watched holdings at the latest quotes.
    Portfolio(PortfolioArgs),

    /// List data source capability matrix.
    Sources(SourcesArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    pub symbol: String,

    /// Calendar days of history to fit (default from config: 90).
    #[arg(long)]
    pub days: Option<u32>,

    /// Days to forecast (default from config: 7).
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Analyze as of this date (YYYY-MM-DD) instead of today.
    #[arg(long)]
    pub as_of: Option<String>,
}

#[derive(Debug, Args)]
pub struct SentimentArgs {
    pub symbol: String,

    /// First day of news (YYYY-MM-DD); defaults to six days before `--end`.
    #[arg(long)]
    pub start: Option<String>,

    /// Last day of news (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Debug, Args)]
pub struct BacktestArgs {
    pub symbol: String,

    #[arg(long)]
    pub start: String,

    #[arg(long)]
    pub end: String,

    #[arg(long, default_value_t = 10_000.0)]
    pub capital: f64,

    #[arg(long, value_enum, default_value_t = StrategyArg::Sentiment)]
    pub strategy: StrategyArg,
}

#[derive(Debug, Args)]
pub struct WatchlistArgs {
    #[command(subcommand)]
    pub command: WatchlistCommand,
}

#[derive(Debug, Subcommand)]
pub enum WatchlistCommand {
    Add { symbol: String },
    Remove { symbol: String },
    List,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    pub name: String,
}

#[derive(Debug, Args)]
pub struct PortfolioArgs {
    /// Holding override as SYMBOL=COUNT; repeatable.
    #[arg(long = "shares", value_name = "SYMBOL=COUNT")]
    pub shares: Vec<String>,
}

#[derive(Debug, Args)]
pub struct SourcesArgs {
    /// Include quota and backoff policy.
    #[arg(long, default_value_t = false)]
    pub policies: bool,
}
