//! Deterministic provider adapters.
//!
//! Both adapters synthesize symbol-seeded data instead of calling the network,
//! so identical requests always produce identical series.

mod polygon;
mod yahoo;

pub use polygon::PolygonAdapter;
pub use yahoo::YahooAdapter;

use crate::data_source::{HealthState, HealthStatus, SourceError};
use crate::throttling::Throttle;
use crate::{MarketKind, PricePoint, PriceSeries, ProviderId, Symbol, TradingDate};

const HEADLINE_TEMPLATES: [&str; 10] = [
    "{} surges on strong earnings",
    "Analysts raise price target for {}",
    "Market volatility impacts {}",
    "{} beats revenue expectations",
    "Investors cautious on {} outlook",
    "{} shares fall after weak guidance",
    "{} faces regulatory scrutiny",
    "{} announces exciting new product line",
    "{} stock hits record high",
    "Concerns grow over {} debt",
];

/// Rejects the call when forced health or the request budget says so.
fn admit(
    provider: ProviderId,
    health: HealthStatus,
    throttle: &Throttle,
) -> Result<(), SourceError> {
    if health.state == HealthState::Unhealthy {
        return Err(SourceError::unavailable(format!(
            "{provider} is unavailable"
        )));
    }
    if !health.rate_available {
        return Err(SourceError::rate_limited(format!(
            "{provider} reports its rate limit is exhausted"
        )));
    }
    throttle.acquire().map_err(|wait| {
        SourceError::rate_limited(format!(
            "{provider} request budget exhausted; retry in {}s",
            wait.as_secs().max(1)
        ))
    })
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(u64::from(byte))
    })
}

/// Small LCG; only needs to be stable across runs.
fn next_noise(state: &mut u64) -> f64 {
    *state = state
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407);
    ((*state >> 33) % 10_000) as f64 / 10_000.0 - 0.5
}

fn is_trading_day(symbol: &Symbol, date: TradingDate) -> bool {
    if symbol.market() == MarketKind::Crypto {
        return true;
    }
    !matches!(
        date.into_inner().weekday(),
        time::Weekday::Saturday | time::Weekday::Sunday
    )
}

/// Log-price step for one calendar day, in units of 1e-5.
///
/// Derived from the date alone, so the walk to any day is an exact integer
/// sum and does not depend on where the requested range begins.
fn log_step(seed: u64, date: TradingDate) -> i64 {
    let day = u64::from(date.into_inner().to_julian_day().unsigned_abs());
    let mut state = seed ^ day.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let noise = (next_noise(&mut state) * 4_000.0) as i64;
    let drift = ((seed % 7) as i64 - 2) * 60;
    drift + noise
}

/// Random-walk closes pinned to a fixed epoch price.
fn synthetic_series(
    symbol: &Symbol,
    range: crate::DateRange,
) -> Result<PriceSeries, SourceError> {
    let seed = symbol_seed(symbol);
    let epoch = TradingDate::from_calendar_date(2015, time::Month::January, 1)
        .map_err(|error| SourceError::internal(error.to_string()))?;
    let base = (20.0 + (seed % 400) as f64).ln();

    let mut date = epoch;
    let mut offset: i64 = 0;
    while date > range.start {
        offset -= log_step(seed, date);
        date = date.add_days(-1);
    }
    while date < range.start {
        date = date.add_days(1);
        offset += log_step(seed, date);
    }

    let mut points = Vec::new();
    loop {
        if is_trading_day(symbol, date) {
            let close = (base + offset as f64 * 1e-5).exp();
            let rounded = (close * 100.0).round() / 100.0;
            points.push(
                PricePoint::new(date, rounded.max(0.01))
                    .map_err(|error| SourceError::internal(error.to_string()))?,
            );
        }
        if date >= range.end {
            break;
        }
        date = date.add_days(1);
        offset += log_step(seed, date);
    }

    if points.is_empty() {
        return Err(SourceError::no_trading_days(symbol, range));
    }

    PriceSeries::new(symbol.clone(), points).map_err(|error| SourceError::internal(error.to_string()))
}

fn render_headline(template: &str, symbol: &Symbol) -> String {
    template.replacen("{}", symbol.as_str(), 1)
}
