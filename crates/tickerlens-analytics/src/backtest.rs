//! Daily-close backtests of a sentiment-gated strategy against buy-and-hold.
//!
//! All curves are cumulative growth factors seeded at `1.0` on the first
//! trading day of the window. Day `t` earns `close[t] / close[t - 1] - 1`
//! scaled by the exposure decided at the end of day `t - 1`.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tickerlens_core::{DateRange, PriceSeries, Symbol, TradingDate, ValidationError};
use tracing::debug;

use crate::config::EngineConfig;
use crate::metrics::PerformanceMetrics;
use crate::signal::DailySentiment;
use crate::AnalyticsError;

/// Closes a backtest window needs to produce one return.
pub(crate) const MIN_POINTS: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Long the next day when the previous day's sentiment was positive, flat otherwise.
    #[default]
    Sentiment,
    BuyAndHold,
    /// Equal monthly tranches; uninvested capital waits as cash.
    #[serde(rename = "dca")]
    DollarCostAveraging,
}

impl StrategyKind {
    pub const ALL: [Self; 3] = [Self::Sentiment, Self::BuyAndHold, Self::DollarCostAveraging];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::BuyAndHold => "buy-and-hold",
            Self::DollarCostAveraging => "dca",
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub strategy: StrategyKind,
    pub symbol: Symbol,
    pub range: DateRange,
    pub dates: Vec<TradingDate>,
    /// `returns[0]` is always `0.0`.
    pub returns: Vec<f64>,
    /// Fraction of the portfolio held in the asset while earning `returns[t]`.
    pub exposure: Vec<f64>,
    pub strategy_returns: Vec<f64>,
    pub strategy_cum: Vec<f64>,
    pub benchmark_cum: Vec<f64>,
    pub strategy_metrics: PerformanceMetrics,
    pub benchmark_metrics: PerformanceMetrics,
    pub initial_capital: f64,
    pub final_value: f64,
    pub pnl: f64,
}

/// Runs `kind` over the closes of `prices` that fall inside `range`.
pub fn run(
    prices: &PriceSeries,
    sentiment: &DailySentiment,
    range: DateRange,
    initial_capital: f64,
    kind: StrategyKind,
    config: &EngineConfig,
) -> Result<BacktestResult, AnalyticsError> {
    validate_capital(initial_capital)?;

    let window = prices.window(range);
    let actual = window.as_ref().map_or(0, PriceSeries::len);
    let Some(window) = window.filter(|series| series.len() >= MIN_POINTS) else {
        return Err(AnalyticsError::InsufficientData {
            required: MIN_POINTS,
            actual,
        });
    };

    let dates = window.dates();
    let closes = window.closes();
    let returns: Vec<f64> = std::iter::once(0.0).chain(window.returns()).collect();
    let benchmark_cum = cumulative(&returns);

    let (exposure, strategy_returns, strategy_cum) = match kind {
        StrategyKind::Sentiment => {
            let exposure = lagged_exposure(&dates, sentiment);
            gated(&returns, exposure)
        }
        StrategyKind::BuyAndHold => {
            let exposure = std::iter::once(0.0)
                .chain(std::iter::repeat(1.0))
                .take(returns.len())
                .collect();
            gated(&returns, exposure)
        }
        StrategyKind::DollarCostAveraging => dollar_cost_average(&dates, &closes, range),
    };

    let final_factor = strategy_cum.last().copied().unwrap_or(1.0);
    let final_value = initial_capital * final_factor;
    let result = BacktestResult {
        strategy: kind,
        symbol: window.symbol().clone(),
        range,
        strategy_metrics: PerformanceMetrics::compute(&strategy_cum, &strategy_returns, range, config),
        benchmark_metrics: PerformanceMetrics::compute(&benchmark_cum, &returns, range, config),
        dates,
        returns,
        exposure,
        strategy_returns,
        strategy_cum,
        benchmark_cum,
        initial_capital,
        final_value,
        pnl: final_value - initial_capital,
    };

    debug!(
        symbol = %result.symbol,
        strategy = %kind,
        days = result.dates.len(),
        final_value = result.final_value,
        "backtest finished"
    );
    Ok(result)
}

fn validate_capital(capital: f64) -> Result<(), ValidationError> {
    if !capital.is_finite() {
        return Err(ValidationError::NonFiniteValue {
            field: "initial_capital",
        });
    }
    if capital <= 0.0 {
        return Err(ValidationError::NonPositiveValue {
            field: "initial_capital",
        });
    }
    Ok(())
}

fn cumulative(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |growth, ret| {
            *growth *= 1.0 + ret;
            Some(*growth)
        })
        .collect()
}

/// `exposure[t]` is 1 when the sentiment on the previous trading date was positive.
fn lagged_exposure(dates: &[TradingDate], sentiment: &DailySentiment) -> Vec<f64> {
    std::iter::once(0.0)
        .chain(dates.windows(2).map(|pair| {
            if sentiment.get_or_neutral(pair[0]) > 0.0 {
                1.0
            } else {
                0.0
            }
        }))
        .collect()
}

fn gated(returns: &[f64], exposure: Vec<f64>) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let strategy_returns: Vec<f64> = returns
        .iter()
        .zip(&exposure)
        .map(|(ret, weight)| ret * weight)
        .collect();
    let strategy_cum = cumulative(&strategy_returns);
    (exposure, strategy_returns, strategy_cum)
}

/// Trading-day index on which each monthly tranche is invested.
///
/// Anchors are the later of the month's first day and the range start; a
/// tranche whose anchor falls after the last close is never invested.
fn tranche_days(dates: &[TradingDate], range: DateRange) -> Vec<usize> {
    let mut days = Vec::new();
    let mut month = range.start.month_start();
    while month <= range.end {
        let anchor = month.max(range.start);
        if let Some(index) = dates.iter().position(|date| *date >= anchor) {
            days.push(index);
        }
        month = month.next_month_start();
    }
    days
}

fn dollar_cost_average(
    dates: &[TradingDate],
    closes: &[f64],
    range: DateRange,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let months = range.calendar_months().max(1);
    let tranche = 1.0 / f64::from(months);
    let schedule = tranche_days(dates, range);

    let mut cash = 1.0_f64;
    let mut units = 0.0_f64;
    let mut curve: Vec<f64> = Vec::with_capacity(closes.len());
    let mut exposure: Vec<f64> = Vec::with_capacity(closes.len());

    for (index, close) in closes.iter().enumerate() {
        let held = match index.checked_sub(1) {
            Some(prev) if curve[prev] > 0.0 => units * closes[prev] / curve[prev],
            _ => 0.0,
        };
        exposure.push(held);

        for _ in schedule.iter().filter(|day| **day == index) {
            let amount = tranche.min(cash);
            units += amount / close;
            cash -= amount;
        }
        curve.push(cash + units * close);
    }

    let strategy_returns = std::iter::once(0.0)
        .chain(curve.windows(2).map(|pair| pair[1] / pair[0] - 1.0))
        .collect();
    (exposure, strategy_returns, curve)
}
