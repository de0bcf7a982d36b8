//! Behavior-driven tests for headline scoring and daily aggregation.

use tickerlens_analytics::signal::score_headlines;
use tickerlens_analytics::{
    aggregate, LexiconScorer, ScorerError, SentimentLabel, SentimentReport, SentimentScorer,
};
use tickerlens_tests::{assert_close, date, headline};

/// Reads the score straight out of the headline text.
struct LiteralScorer;

impl SentimentScorer for LiteralScorer {
    fn score(&self, text: &str) -> Result<f64, ScorerError> {
        text.parse::<f64>()
            .map_err(|_| ScorerError::new(format!("not a number: {text}")))
    }
}

// ============================================================================
// Lexicon scoring
// ============================================================================

#[test]
fn when_headline_is_upbeat_system_scores_it_positive() {
    // Given
    let scorer = LexiconScorer::default();

    // When
    let score = scorer.score("TSLA surges on strong earnings").expect("score");

    // Then
    assert_close(score, 0.55);
}

#[test]
fn when_headline_negates_a_positive_word_system_flips_its_sign() {
    // Given
    let scorer = LexiconScorer::default();

    // When
    let score = scorer.score("earnings not strong").expect("score");

    // Then
    assert_close(score, -0.25);
}

#[test]
fn when_headline_has_no_known_words_system_scores_neutral() {
    let score = LexiconScorer::default()
        .score("Company holds annual meeting")
        .expect("score");
    assert_eq!(score, 0.0);
}

// ============================================================================
// Daily aggregation
// ============================================================================

#[test]
fn when_several_headlines_share_a_day_system_averages_them() {
    // Given: two headlines on Jan 2 and one on Jan 3
    let headlines = [
        headline("2024-01-02T09:00:00Z", "0.4"),
        headline("2024-01-02T15:30:00Z", "-0.2"),
        headline("2024-01-03T11:00:00Z", "0.6"),
    ];

    // When
    let daily = aggregate(&headlines, &LiteralScorer);

    // Then
    assert_eq!(daily.len(), 2);
    assert_close(daily.get(date("2024-01-02")).expect("jan 2"), 0.1);
    assert_close(daily.get(date("2024-01-03")).expect("jan 3"), 0.6);
}

#[test]
fn when_headline_lands_late_in_the_day_system_buckets_by_utc_date() {
    // Given
    let headlines = [headline("2024-01-02T23:59:59Z", "0.3")];

    // When
    let daily = aggregate(&headlines, &LiteralScorer);

    // Then
    assert!(daily.get(date("2024-01-02")).is_some());
    assert_eq!(daily.get(date("2024-01-03")), None);
    assert_eq!(daily.get_or_neutral(date("2024-01-03")), 0.0);
}

#[test]
fn when_scorer_fails_system_counts_the_headline_as_neutral() {
    // Given: one unreadable headline next to a scored one
    let headlines = [
        headline("2024-01-02T09:00:00Z", "0.8"),
        headline("2024-01-02T10:00:00Z", "garbled"),
    ];

    // When
    let daily = aggregate(&headlines, &LiteralScorer);

    // Then: the failure contributes 0.0 to the mean
    assert_close(daily.get(date("2024-01-02")).expect("jan 2"), 0.4);
}

#[test]
fn when_scorer_overshoots_system_clamps_to_unit_range() {
    let headlines = [headline("2024-01-02T09:00:00Z", "3.5")];
    let daily = aggregate(&headlines, &LiteralScorer);
    assert_close(daily.get(date("2024-01-02")).expect("jan 2"), 1.0);
}

#[test]
fn when_no_headlines_exist_system_returns_an_empty_map() {
    let daily = aggregate(&[], &LiteralScorer);
    assert!(daily.is_empty());
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn when_most_headlines_are_positive_system_labels_the_report_bullish() {
    // Given
    let headlines = [
        headline("2024-01-02T09:00:00Z", "0.5"),
        headline("2024-01-02T10:00:00Z", "0.5"),
        headline("2024-01-02T11:00:00Z", "-0.1"),
    ];

    // When
    let report = SentimentReport::from_scores(score_headlines(&headlines, &LiteralScorer));

    // Then
    assert_close(report.average, 0.3);
    assert_eq!(report.label, SentimentLabel::Bullish);
    assert_eq!(report.headline_summary(), "Bullish (2/3)");
}

#[test]
fn when_report_is_empty_system_labels_it_neutral() {
    let report = SentimentReport::from_scores(Vec::new());
    assert_eq!(report.average, 0.0);
    assert_eq!(report.headline_summary(), "Neutral (0/0)");
}
