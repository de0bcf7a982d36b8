use tracing::debug;

use super::{admit, render_headline, symbol_seed, synthetic_series, HEADLINE_TEMPLATES};
use crate::data_source::{
    CapabilitySet, DataSource, Endpoint, HeadlineBatch, HeadlineRequest, HealthState,
    HealthStatus, PriceRequest, QuoteBatch, QuoteRequest, SourceError,
};
use crate::provider_policy::ProviderPolicy;
use crate::throttling::Throttle;
use crate::{Headline, PriceSeries, ProviderId, Symbol, TradingDate, UtcDateTime};

/// Deterministic Polygon adapter: daily aggregates plus a dated news feed.
///
/// Calls share the free-tier budget of [`ProviderPolicy::for_provider`];
/// once it is spent every endpoint answers `source.rate_limited`.
#[derive(Clone)]
pub struct PolygonAdapter {
    health: HealthStatus,
    throttle: Throttle,
}

impl Default for PolygonAdapter {
    fn default() -> Self {
        Self::with_policy(&ProviderPolicy::for_provider(ProviderId::Polygon))
    }
}

impl PolygonAdapter {
    pub fn with_policy(policy: &ProviderPolicy) -> Self {
        Self {
            health: HealthStatus::healthy(),
            throttle: Throttle::from_policy(policy),
        }
    }

    pub fn with_health(health_state: HealthState, rate_available: bool) -> Self {
        Self {
            health: HealthStatus::new(health_state, rate_available),
            ..Self::default()
        }
    }
}

impl DataSource for PolygonAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Polygon
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::new(true, true, false)
    }

    fn prices(&self, req: &PriceRequest) -> Result<PriceSeries, SourceError> {
        admit(self.id(), self.health, &self.throttle)?;
        synthetic_series(&req.symbol, req.range)
    }

    fn headlines(&self, req: &HeadlineRequest) -> Result<HeadlineBatch, SourceError> {
        admit(self.id(), self.health, &self.throttle)?;

        let mut headlines = Vec::new();
        let mut date = req.range.start;
        while date <= req.range.end && headlines.len() < req.limit {
            for (slot, template) in daily_templates(&req.symbol, date).into_iter().enumerate() {
                if headlines.len() == req.limit {
                    break;
                }
                headlines.push(Headline::new(
                    published_at(date, slot)?,
                    render_headline(template, &req.symbol),
                ));
            }
            date = date.add_days(1);
        }

        debug!(
            symbol = %req.symbol,
            count = headlines.len(),
            "polygon served headlines"
        );
        Ok(HeadlineBatch {
            symbol: req.symbol.clone(),
            headlines,
        })
    }

    fn quote(&self, _req: &QuoteRequest) -> Result<QuoteBatch, SourceError> {
        Err(SourceError::unsupported_endpoint(Endpoint::Quote))
    }

    fn health(&self) -> HealthStatus {
        self.health
    }
}

/// Zero to two headlines per calendar day, picked from the symbol and date.
fn daily_templates(symbol: &Symbol, date: TradingDate) -> Vec<&'static str> {
    let day_key = u64::try_from(date.into_inner().to_julian_day()).unwrap_or_default();
    let mix = symbol_seed(symbol)
        .wrapping_add(day_key.wrapping_mul(2_654_435_761))
        .rotate_left(17);
    let count = (mix % 3) as usize;
    (0..count)
        .map(|slot| {
            let index = ((mix >> (8 * (slot + 1))) % HEADLINE_TEMPLATES.len() as u64) as usize;
            HEADLINE_TEMPLATES[index]
        })
        .collect()
}

fn published_at(date: TradingDate, slot: usize) -> Result<UtcDateTime, SourceError> {
    let hours = 13 + i64::try_from(slot).unwrap_or_default() * 4;
    let instant = UtcDateTime::start_of(date).into_inner() + time::Duration::hours(hours);
    UtcDateTime::from_offset_datetime(instant).map_err(|error| SourceError::internal(error.to_string()))
}
