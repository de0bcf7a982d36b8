//! Headline polarity scoring.
//!
//! Scores are advisory: [`score_or_neutral`] turns any scorer failure into a
//! neutral `0.0`.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sentiment scorer failed: {message}")]
pub struct ScorerError {
    message: String,
}

impl ScorerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Maps headline text to a polarity in `[-1, 1]`.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> Result<f64, ScorerError>;
}

/// Scores with `scorer`, substituting `0.0` when it fails or returns a non-finite value.
pub fn score_or_neutral(scorer: &dyn SentimentScorer, text: &str) -> f64 {
    match scorer.score(text) {
        Ok(score) if score.is_finite() => score.clamp(-1.0, 1.0),
        Ok(score) => {
            warn!(score, "sentiment scorer returned a non-finite score, using neutral");
            0.0
        }
        Err(error) => {
            warn!(%error, "sentiment scorer failed, using neutral");
            0.0
        }
    }
}

const POLARITY: &[(&str, f64)] = &[
    ("surge", 0.6),
    ("surges", 0.6),
    ("surged", 0.6),
    ("soar", 0.7),
    ("soars", 0.7),
    ("rally", 0.6),
    ("rallies", 0.6),
    ("gain", 0.5),
    ("gains", 0.5),
    ("strong", 0.5),
    ("stronger", 0.5),
    ("raise", 0.3),
    ("raises", 0.3),
    ("raised", 0.3),
    ("upgrade", 0.5),
    ("upgrades", 0.5),
    ("beat", 0.5),
    ("beats", 0.5),
    ("record", 0.4),
    ("high", 0.3),
    ("exciting", 0.7),
    ("bullish", 0.8),
    ("growth", 0.5),
    ("profit", 0.6),
    ("profits", 0.6),
    ("outperform", 0.6),
    ("positive", 0.4),
    ("good", 0.5),
    ("great", 0.8),
    ("success", 0.6),
    ("fall", -0.5),
    ("falls", -0.5),
    ("fell", -0.5),
    ("drop", -0.5),
    ("drops", -0.5),
    ("decline", -0.5),
    ("declines", -0.5),
    ("plunge", -0.8),
    ("plunges", -0.8),
    ("crash", -0.9),
    ("weak", -0.5),
    ("weaker", -0.5),
    ("miss", -0.5),
    ("misses", -0.5),
    ("downgrade", -0.5),
    ("downgrades", -0.5),
    ("cautious", -0.3),
    ("volatility", -0.3),
    ("volatile", -0.3),
    ("scrutiny", -0.3),
    ("concern", -0.4),
    ("concerns", -0.4),
    ("debt", -0.2),
    ("risk", -0.2),
    ("bearish", -0.8),
    ("loss", -0.6),
    ("losses", -0.6),
    ("lawsuit", -0.6),
    ("fear", -0.6),
    ("fears", -0.6),
    ("negative", -0.4),
    ("bad", -0.6),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("highly", 1.3),
    ("significantly", 1.3),
    ("sharply", 1.4),
    ("extremely", 1.6),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "without", "isn't", "aren't", "wasn't", "don't", "doesn't", "won't",
    "can't",
];

/// Word-polarity scorer.
///
/// Each lexicon word contributes its polarity, scaled by a preceding
/// intensifier and flipped and halved by a preceding negation. The headline
/// score is the mean contribution clamped to `[-1, 1]`; text without any
/// lexicon word scores `0.0`.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    polarity: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self {
            polarity: POLARITY
                .iter()
                .map(|(word, weight)| ((*word).to_owned(), *weight))
                .collect(),
            intensifiers: INTENSIFIERS
                .iter()
                .map(|(word, factor)| ((*word).to_owned(), *factor))
                .collect(),
            negations: NEGATIONS.iter().map(|word| (*word).to_owned()).collect(),
        }
    }
}

impl LexiconScorer {
    /// Adds or overrides one lexicon entry.
    pub fn with_word(mut self, word: &str, polarity: f64) -> Self {
        self.polarity
            .insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
        self
    }

    fn polarity_of(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let tokens = lowered
            .split(|ch: char| !(ch.is_alphanumeric() || ch == '\''))
            .map(|token| token.trim_matches('\''))
            .filter(|token| !token.is_empty());

        let mut total = 0.0;
        let mut hits = 0_u32;
        let mut negated = false;
        let mut intensity = 1.0;

        for token in tokens {
            if self.negations.contains(token) {
                negated = true;
                continue;
            }
            if let Some(factor) = self.intensifiers.get(token) {
                intensity = *factor;
                continue;
            }
            let Some(weight) = self.polarity.get(token) else {
                continue;
            };

            let mut contribution = weight * intensity;
            if negated {
                contribution *= -0.5;
            }
            total += contribution;
            hits += 1;
            negated = false;
            intensity = 1.0;
        }

        if hits == 0 {
            return 0.0;
        }
        (total / f64::from(hits)).clamp(-1.0, 1.0)
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f64, ScorerError> {
        Ok(self.polarity_of(text))
    }
}
