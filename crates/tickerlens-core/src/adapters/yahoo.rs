use tracing::debug;

use super::{admit, render_headline, synthetic_series, HEADLINE_TEMPLATES};
use crate::data_source::{
    CapabilitySet, DataSource, HeadlineBatch, HeadlineRequest, HealthState, HealthStatus,
    PriceRequest, QuoteBatch, QuoteRequest, SourceError,
};
use crate::provider_policy::ProviderPolicy;
use crate::throttling::Throttle;
use crate::{
    DateRange, Headline, PriceSeries, ProviderId, Quote, Symbol, TradingDate, UtcDateTime,
};

/// Number of dashboard headlines Yahoo returns per request.
const DASHBOARD_HEADLINES: usize = 5;

/// Deterministic Yahoo adapter: daily closes, quotes, and a fixed set of
/// dashboard headlines stamped on the last day of the requested range.
#[derive(Clone)]
pub struct YahooAdapter {
    health: HealthStatus,
    throttle: Throttle,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self {
            health: HealthStatus::healthy(),
            throttle: Throttle::from_policy(&ProviderPolicy::for_provider(ProviderId::Yahoo)),
        }
    }
}

impl YahooAdapter {
    pub fn with_health(health_state: HealthState, rate_available: bool) -> Self {
        Self {
            health: HealthStatus::new(health_state, rate_available),
            ..Self::default()
        }
    }

    pub fn with_policy(policy: &ProviderPolicy) -> Self {
        Self {
            throttle: Throttle::from_policy(policy),
            ..Self::default()
        }
    }
}

impl DataSource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::full()
    }

    fn prices(&self, req: &PriceRequest) -> Result<PriceSeries, SourceError> {
        admit(self.id(), self.health, &self.throttle)?;
        let series = synthetic_series(&req.symbol, req.range)?;
        debug!(
            symbol = %req.symbol,
            points = series.len(),
            "yahoo served daily closes"
        );
        Ok(series)
    }

    fn headlines(&self, req: &HeadlineRequest) -> Result<HeadlineBatch, SourceError> {
        admit(self.id(), self.health, &self.throttle)?;
        let published_at = dashboard_timestamp(req.range)?;
        let headlines = HEADLINE_TEMPLATES
            .iter()
            .take(DASHBOARD_HEADLINES.min(req.limit))
            .map(|template| Headline::new(published_at, render_headline(template, &req.symbol)))
            .collect();

        Ok(HeadlineBatch {
            symbol: req.symbol.clone(),
            headlines,
        })
    }

    fn quote(&self, req: &QuoteRequest) -> Result<QuoteBatch, SourceError> {
        admit(self.id(), self.health, &self.throttle)?;
        let today = UtcDateTime::now().date();
        let quotes = req
            .symbols
            .iter()
            .map(|symbol| latest_quote(symbol, today))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QuoteBatch { quotes })
    }

    fn health(&self) -> HealthStatus {
        self.health
    }
}

fn dashboard_timestamp(range: DateRange) -> Result<UtcDateTime, SourceError> {
    let noon = UtcDateTime::start_of(range.end).into_inner() + time::Duration::hours(12);
    UtcDateTime::from_offset_datetime(noon).map_err(|error| SourceError::internal(error.to_string()))
}

/// Last close within the trailing week; the quote is stamped at that close's date.
fn latest_quote(symbol: &Symbol, today: TradingDate) -> Result<Quote, SourceError> {
    let series = synthetic_series(symbol, DateRange::trailing(today, 7))?;
    let last = series.last();
    let currency = if symbol.as_str().ends_with("-EUR") {
        "EUR"
    } else {
        "USD"
    };
    Quote::new(
        symbol.clone(),
        last.close,
        currency,
        UtcDateTime::start_of(last.date),
    )
    .map_err(|error| SourceError::internal(error.to_string()))
}
