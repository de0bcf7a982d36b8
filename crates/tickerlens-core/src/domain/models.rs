use serde::{Deserialize, Serialize};

use crate::{DateRange, Symbol, TradingDate, UtcDateTime, ValidationError};

/// Daily closing price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: TradingDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: TradingDate, close: f64) -> Result<Self, ValidationError> {
        validate_positive("close", close)?;
        Ok(Self { date, close })
    }
}

/// Ordered closing prices for one symbol.
///
/// Construction guarantees at least one point, strictly increasing dates and
/// positive finite closes, so consumers never re-check those invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: Symbol,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: Symbol, points: Vec<PricePoint>) -> Result<Self, ValidationError> {
        if points.is_empty() {
            return Err(ValidationError::EmptySeries);
        }

        for point in &points {
            validate_positive("close", point.close)?;
        }

        if let Some(pair) = points.windows(2).find(|pair| pair[0].date >= pair[1].date) {
            return Err(ValidationError::UnorderedDates {
                previous: pair[0].date.to_string(),
                next: pair[1].date.to_string(),
            });
        }

        Ok(Self { symbol, points })
    }

    /// Build a series from `(date, close)` pairs.
    pub fn from_closes(
        symbol: Symbol,
        closes: impl IntoIterator<Item = (TradingDate, f64)>,
    ) -> Result<Self, ValidationError> {
        let points = closes
            .into_iter()
            .map(|(date, close)| PricePoint::new(date, close))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(symbol, points)
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.close).collect()
    }

    pub fn dates(&self) -> Vec<TradingDate> {
        self.points.iter().map(|point| point.date).collect()
    }

    pub fn first(&self) -> PricePoint {
        self.points[0]
    }

    pub fn last(&self) -> PricePoint {
        self.points[self.points.len() - 1]
    }

    /// Calendar span from the first to the last observation.
    pub fn span(&self) -> DateRange {
        DateRange {
            start: self.first().date,
            end: self.last().date,
        }
    }

    /// Simple daily returns; index `i` holds `close[i + 1] / close[i] - 1`.
    pub fn returns(&self) -> Vec<f64> {
        self.points
            .windows(2)
            .map(|pair| pair[1].close / pair[0].close - 1.0)
            .collect()
    }

    /// Points falling inside `range`, or `None` when the window is empty.
    pub fn window(&self, range: DateRange) -> Option<Self> {
        let points = self
            .points
            .iter()
            .copied()
            .filter(|point| range.contains(point.date))
            .collect::<Vec<_>>();
        if points.is_empty() {
            return None;
        }
        Some(Self {
            symbol: self.symbol.clone(),
            points,
        })
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            symbol: Symbol,
            points: Vec<PricePoint>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.symbol, raw.points).map_err(serde::de::Error::custom)
    }
}

/// News headline with its publication instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub published_at: UtcDateTime,
    pub text: String,
}

impl Headline {
    pub fn new(published_at: UtcDateTime, text: impl Into<String>) -> Self {
        Self {
            published_at,
            text: text.into(),
        }
    }

    pub fn date(&self) -> TradingDate {
        self.published_at.date()
    }
}

/// Latest traded price used for portfolio valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: Symbol,
    pub price: f64,
    pub currency: String,
    pub as_of: UtcDateTime,
}

impl Quote {
    pub fn new(
        symbol: Symbol,
        price: f64,
        currency: impl AsRef<str>,
        as_of: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("price", price)?;

        Ok(Self {
            symbol,
            price,
            currency: validate_currency_code(currency.as_ref())?,
            as_of,
        })
    }
}

/// Validate and normalize currency to uppercase 3-letter code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_non_negative(field, value)?;
    if value == 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> TradingDate {
        TradingDate::parse(value).expect("valid date")
    }

    fn symbol() -> Symbol {
        Symbol::parse("TSLA").expect("valid")
    }

    #[test]
    fn rejects_empty_and_unordered_series() {
        assert!(matches!(
            PriceSeries::new(symbol(), Vec::new()),
            Err(ValidationError::EmptySeries)
        ));

        let err = PriceSeries::from_closes(
            symbol(),
            [(date("2024-01-03"), 10.0), (date("2024-01-03"), 11.0)],
        )
        .expect_err("duplicate dates");
        assert!(matches!(err, ValidationError::UnorderedDates { .. }));
    }

    #[test]
    fn rejects_zero_and_nan_closes() {
        assert!(matches!(
            PricePoint::new(date("2024-01-02"), 0.0),
            Err(ValidationError::NonPositiveValue { field: "close" })
        ));
        assert!(matches!(
            PricePoint::new(date("2024-01-02"), f64::NAN),
            Err(ValidationError::NonFiniteValue { field: "close" })
        ));
    }

    #[test]
    fn derives_returns_from_consecutive_closes() {
        let series = PriceSeries::from_closes(
            symbol(),
            [
                (date("2024-01-02"), 100.0),
                (date("2024-01-03"), 110.0),
                (date("2024-01-04"), 99.0),
            ],
        )
        .expect("series");

        let returns = series.returns();
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.10).abs() < 1e-12);
        assert!((returns[1] + 0.10).abs() < 1e-12);
    }

    #[test]
    fn window_filters_to_inclusive_range() {
        let series = PriceSeries::from_closes(
            symbol(),
            [
                (date("2024-01-02"), 1.0),
                (date("2024-01-03"), 2.0),
                (date("2024-01-04"), 3.0),
            ],
        )
        .expect("series");

        let range = DateRange::new(date("2024-01-03"), date("2024-01-10")).expect("range");
        let window = series.window(range).expect("non-empty window");
        assert_eq!(window.closes(), vec![2.0, 3.0]);

        let later = DateRange::new(date("2024-02-01"), date("2024-02-10")).expect("range");
        assert!(series.window(later).is_none());
    }

    #[test]
    fn deserialization_enforces_invariants() {
        let json = r#"{"symbol":"TSLA","points":[{"date":"2024-01-03","close":1.0},{"date":"2024-01-02","close":2.0}]}"#;
        assert!(serde_json::from_str::<PriceSeries>(json).is_err());
    }
}
