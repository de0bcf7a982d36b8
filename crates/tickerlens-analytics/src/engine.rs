use serde::{Deserialize, Serialize};
use tickerlens_core::{
    DataSource, DateRange, Headline, HeadlineRequest, PriceRequest, PriceSeries, SourceError,
    SourceErrorKind, Symbol, TradingDate,
};
use tracing::{debug, warn};

use crate::backtest::{self, BacktestResult, StrategyKind, MIN_POINTS};
use crate::config::EngineConfig;
use crate::forecast::{self, ForecastResult};
use crate::sentiment::{LexiconScorer, SentimentScorer};
use crate::signal::{aggregate_scored, score_headlines, DailySentiment};
use crate::summary::{classify, SentimentReport, Summary};
use crate::AnalyticsError;

/// Calendar days of news scored next to a forecast.
const NEWS_WINDOW_DAYS: u32 = 7;

/// Headlines fetched for a request; `failure` is set when the news provider
/// could not answer and the list was degraded to empty.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineFetch {
    pub headlines: Vec<Headline>,
    pub failure: Option<SourceError>,
    /// Last covered day when the headline limit ran out before the range end.
    pub truncated_after: Option<TradingDate>,
}

impl HeadlineFetch {
    fn degraded(error: SourceError) -> Self {
        Self {
            headlines: Vec::new(),
            failure: Some(error),
            truncated_after: None,
        }
    }
}

/// Forecast, news sentiment, and labels for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub forecast: ForecastResult,
    pub sentiment: SentimentReport,
    pub summary: Summary,
    #[serde(skip)]
    pub news_failure: Option<SourceError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestRun {
    pub result: BacktestResult,
    /// Daily scores that drove the sentiment strategy; empty for the others.
    pub sentiment: DailySentiment,
    pub news_failure: Option<SourceError>,
    pub news_truncated_after: Option<TradingDate>,
}

/// Binds a data source and a sentiment scorer to the pure analytics functions.
pub struct AnalyticsEngine {
    source: Box<dyn DataSource>,
    scorer: Box<dyn SentimentScorer>,
    config: EngineConfig,
}

impl AnalyticsEngine {
    pub fn new(source: Box<dyn DataSource>, config: EngineConfig) -> Self {
        Self {
            source,
            scorer: Box::new(LexiconScorer::default()),
            config,
        }
    }

    pub fn with_scorer(mut self, scorer: Box<dyn SentimentScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A range with no sessions is too little data rather than a provider outage.
    fn fetch_prices(
        &self,
        symbol: &Symbol,
        range: DateRange,
        required: usize,
    ) -> Result<PriceSeries, AnalyticsError> {
        let request = PriceRequest::new(symbol.clone(), range);
        self.source.prices(&request).map_err(|error| match error.kind() {
            SourceErrorKind::NoTradingDays => AnalyticsError::InsufficientData {
                required,
                actual: 0,
            },
            _ => AnalyticsError::data_unavailable(self.source.id(), error),
        })
    }

    /// Never fails: provider errors degrade to an empty list.
    pub fn fetch_headlines(&self, symbol: &Symbol, range: DateRange) -> HeadlineFetch {
        self.fetch_headlines_up_to(symbol, range, self.config.headline_limit)
    }

    fn fetch_headlines_up_to(&self, symbol: &Symbol, range: DateRange, limit: usize) -> HeadlineFetch {
        let fetched = HeadlineRequest::new(symbol.clone(), range, limit)
            .and_then(|request| self.source.headlines(&request));
        let batch = match fetched {
            Ok(batch) => batch,
            Err(error) => {
                warn!(
                    provider = %self.source.id(),
                    symbol = %symbol,
                    %error,
                    "news unavailable, continuing without headlines"
                );
                return HeadlineFetch::degraded(error);
            }
        };

        let truncated_after = batch
            .headlines
            .last()
            .map(Headline::date)
            .filter(|last| batch.headlines.len() >= limit && *last < range.end);
        if let Some(last) = truncated_after {
            warn!(
                provider = %self.source.id(),
                symbol = %symbol,
                limit,
                %last,
                "headline limit reached before the end of the range"
            );
        }
        HeadlineFetch {
            headlines: batch.headlines,
            failure: None,
            truncated_after,
        }
    }

    pub fn analyze(&self, series: &PriceSeries) -> Result<ForecastResult, AnalyticsError> {
        forecast::forecast(series, &self.config)
    }

    pub fn score_sentiment(&self, headlines: &[Headline]) -> SentimentReport {
        SentimentReport::from_scores(score_headlines(headlines, self.scorer.as_ref()))
    }

    pub fn daily_sentiment(&self, headlines: &[Headline]) -> DailySentiment {
        aggregate_scored(&score_headlines(headlines, self.scorer.as_ref()))
    }

    pub fn backtest(
        &self,
        series: &PriceSeries,
        sentiment: &DailySentiment,
        range: DateRange,
        initial_capital: f64,
        kind: StrategyKind,
    ) -> Result<BacktestResult, AnalyticsError> {
        backtest::run(series, sentiment, range, initial_capital, kind, &self.config)
    }

    /// Fetches history ending on `as_of`, forecasts it, and scores the last week of news.
    pub fn analyze_symbol(&self, symbol: &Symbol, as_of: TradingDate) -> Result<Analysis, AnalyticsError> {
        let history = DateRange::trailing(as_of, self.config.history_days);
        let series = self.fetch_prices(symbol, history, self.config.min_history)?;
        let forecast = self.analyze(&series)?;

        let news = self.fetch_headlines(symbol, DateRange::trailing(as_of, NEWS_WINDOW_DAYS));
        let sentiment = self.score_sentiment(&news.headlines);
        let summary = classify(forecast.pct_change, sentiment.average);
        debug!(
            symbol = %symbol,
            pct_change = forecast.pct_change,
            sentiment = sentiment.average,
            "analysis complete"
        );

        Ok(Analysis {
            forecast,
            sentiment,
            summary,
            news_failure: news.failure,
        })
    }

    /// Fetches prices (and news for the sentiment strategy) over `range` and backtests.
    pub fn backtest_symbol(
        &self,
        symbol: &Symbol,
        range: DateRange,
        initial_capital: f64,
        kind: StrategyKind,
    ) -> Result<BacktestRun, AnalyticsError> {
        let series = self.fetch_prices(symbol, range, MIN_POINTS)?;
        let news = if kind == StrategyKind::Sentiment {
            self.fetch_headlines_up_to(symbol, range, self.config.backtest_headline_limit)
        } else {
            HeadlineFetch {
                headlines: Vec::new(),
                failure: None,
                truncated_after: None,
            }
        };
        let sentiment = self.daily_sentiment(&news.headlines);

        let result = self.backtest(&series, &sentiment, range, initial_capital, kind)?;
        Ok(BacktestRun {
            result,
            sentiment,
            news_failure: news.failure,
            news_truncated_after: news.truncated_after,
        })
    }
}
