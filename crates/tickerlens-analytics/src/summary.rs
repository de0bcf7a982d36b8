//! Threshold labels shown next to a forecast.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::signal::ScoredHeadline;

/// Average polarity beyond which the news is called bullish or bearish.
pub const SENTIMENT_THRESHOLD: f64 = 0.1;
/// Forecast move, in percent, that triggers a trade signal.
pub const STRONG_MOVE_PCT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentLabel {
    pub fn from_average(average: f64) -> Self {
        if average > SENTIMENT_THRESHOLD {
            Self::Bullish
        } else if average < -SENTIMENT_THRESHOLD {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
            Self::Neutral => "Neutral",
        }
    }
}

impl Display for SentimentLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSignal {
    StrongBuy,
    SellWarning,
}

impl TradeSignal {
    pub fn from_pct_change(pct_change: f64) -> Option<Self> {
        if pct_change > STRONG_MOVE_PCT {
            Some(Self::StrongBuy)
        } else if pct_change < -STRONG_MOVE_PCT {
            Some(Self::SellWarning)
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StrongBuy => "STRONG BUY SIGNAL",
            Self::SellWarning => "SELL WARNING",
        }
    }
}

impl Display for TradeSignal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-headline scores with their mean and label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub scores: Vec<ScoredHeadline>,
    pub average: f64,
    pub positive_count: usize,
    pub label: SentimentLabel,
}

impl SentimentReport {
    pub fn from_scores(scores: Vec<ScoredHeadline>) -> Self {
        let average = if scores.is_empty() {
            0.0
        } else {
            scores.iter().map(|item| item.score).sum::<f64>() / scores.len() as f64
        };
        let positive_count = scores
            .iter()
            .filter(|item| item.score > SENTIMENT_THRESHOLD)
            .count();
        Self {
            average,
            positive_count,
            label: SentimentLabel::from_average(average),
            scores,
        }
    }

    /// e.g. `Bullish (3/5)`.
    pub fn headline_summary(&self) -> String {
        format!("{} ({}/{})", self.label, self.positive_count, self.scores.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub sentiment: SentimentLabel,
    pub signal: Option<TradeSignal>,
}

pub fn classify(pct_change: f64, average_sentiment: f64) -> Summary {
    Summary {
        sentiment: SentimentLabel::from_average(average_sentiment),
        signal: TradeSignal::from_pct_change(pct_change),
    }
}
