use serde::{Deserialize, Serialize};
use tickerlens_core::{PriceSeries, Symbol, TradingDate, ValidationError};
use tracing::debug;

use crate::config::{EngineConfig, StdDevKind};
use crate::metrics::{mean, std_dev};
use crate::AnalyticsError;

/// Ordinary least squares line over day indices `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    pub fn fit(values: &[f64]) -> Result<Self, AnalyticsError> {
        let n = values.len();
        if n < 2 {
            return Err(AnalyticsError::InsufficientData {
                required: 2,
                actual: n,
            });
        }

        let x_mean = (n - 1) as f64 / 2.0;
        let y_mean = mean(values);
        let (sxy, sxx) = values
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(sxy, sxx), (index, value)| {
                let dx = index as f64 - x_mean;
                (sxy + dx * (value - y_mean), sxx + dx * dx)
            });

        let slope = sxy / sxx;
        Ok(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Predictions for the `horizon` indices following the last observation.
pub fn fit_and_forecast(values: &[f64], horizon: usize) -> Result<Vec<f64>, AnalyticsError> {
    if horizon == 0 {
        return Err(ValidationError::NonPositiveValue { field: "horizon" }.into());
    }
    let trend = LinearTrend::fit(values)?;
    let n = values.len();
    Ok((n..n + horizon)
        .map(|index| trend.predict(index as f64))
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: TradingDate,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub symbol: Symbol,
    pub current_price: f64,
    pub forecast: Vec<ForecastPoint>,
    pub forecast_price: f64,
    pub pct_change: f64,
    pub volatility: f64,
    pub slope: f64,
    pub intercept: f64,
    pub history_len: usize,
}

/// Fits the trend on the whole series and projects it over calendar days.
pub fn forecast(series: &PriceSeries, config: &EngineConfig) -> Result<ForecastResult, AnalyticsError> {
    let closes = series.closes();
    if closes.len() < config.min_history {
        return Err(AnalyticsError::InsufficientData {
            required: config.min_history,
            actual: closes.len(),
        });
    }
    if config.horizon == 0 {
        return Err(ValidationError::NonPositiveValue { field: "horizon" }.into());
    }

    let trend = LinearTrend::fit(&closes)?;
    let n = closes.len();
    let last_date = series.last().date;
    let points: Vec<ForecastPoint> = (0..config.horizon)
        .map(|step| ForecastPoint {
            date: last_date.add_days(step as i64 + 1),
            price: trend.predict((n + step) as f64),
        })
        .collect();

    let current_price = series.last().close;
    let forecast_price = points.last().map_or(current_price, |point| point.price);
    let result = ForecastResult {
        symbol: series.symbol().clone(),
        current_price,
        forecast_price,
        pct_change: pct_change(current_price, forecast_price),
        volatility: volatility(&closes, config.volatility_window),
        slope: trend.slope,
        intercept: trend.intercept,
        history_len: n,
        forecast: points,
    };

    debug!(
        symbol = %result.symbol,
        slope = result.slope,
        intercept = result.intercept,
        pct_change = result.pct_change,
        "fitted linear trend"
    );
    Ok(result)
}

pub fn pct_change(current: f64, forecast: f64) -> f64 {
    if current == 0.0 {
        return 0.0;
    }
    (forecast - current) / current * 100.0
}

/// Coefficient of variation of the last `window` closes, in percent.
///
/// Shorter histories and a zero mean report `0.0`.
pub fn volatility(closes: &[f64], window: usize) -> f64 {
    if window == 0 || closes.len() < window {
        return 0.0;
    }
    let recent = &closes[closes.len() - window..];
    let average = mean(recent);
    if average == 0.0 {
        return 0.0;
    }
    std_dev(recent, StdDevKind::Population) / average * 100.0
}
