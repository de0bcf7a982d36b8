use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tickerlens_core::{Headline, TradingDate};

use crate::sentiment::{score_or_neutral, SentimentScorer};

/// One headline with the polarity assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredHeadline {
    pub headline: Headline,
    pub score: f64,
}

/// Sparse per-day mean sentiment; absent dates read as neutral.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailySentiment(BTreeMap<TradingDate, f64>);

impl DailySentiment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: TradingDate, score: f64) {
        self.0.insert(date, score);
    }

    pub fn get(&self, date: TradingDate) -> Option<f64> {
        self.0.get(&date).copied()
    }

    pub fn get_or_neutral(&self, date: TradingDate) -> f64 {
        self.get(date).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TradingDate, f64)> + '_ {
        self.0.iter().map(|(date, score)| (*date, *score))
    }
}

impl FromIterator<(TradingDate, f64)> for DailySentiment {
    fn from_iter<I: IntoIterator<Item = (TradingDate, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub fn score_headlines(headlines: &[Headline], scorer: &dyn SentimentScorer) -> Vec<ScoredHeadline> {
    headlines
        .iter()
        .map(|headline| ScoredHeadline {
            score: score_or_neutral(scorer, &headline.text),
            headline: headline.clone(),
        })
        .collect()
}

/// Buckets scores by UTC publication date and takes the unweighted mean.
pub fn aggregate_scored(scored: &[ScoredHeadline]) -> DailySentiment {
    let mut buckets: BTreeMap<TradingDate, (f64, u32)> = BTreeMap::new();
    for item in scored {
        let bucket = buckets.entry(item.headline.date()).or_insert((0.0, 0));
        bucket.0 += item.score;
        bucket.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(date, (sum, count))| (date, sum / f64::from(count)))
        .collect()
}

pub fn aggregate(headlines: &[Headline], scorer: &dyn SentimentScorer) -> DailySentiment {
    aggregate_scored(&score_headlines(headlines, scorer))
}
