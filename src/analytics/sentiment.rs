//! Sentiment scoring and polarity ranking
//!
//! Scoring is a pluggable capability: anything implementing
//! [`SentimentScorer`] can drive the ranking, whether lexicon-based,
//! model-based or remote. The ranking policy around it is fixed here. A
//! per-post failure (including a timeout) is recorded and excluded from the
//! ranked extremes; it never aborts the run.

use crate::analytics::word_frequency::tokenize;
use crate::models::Post;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Errors raised while scoring a single post
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// The per-post scoring call exceeded the configured timeout
    #[error("scoring timed out after {0} ms")]
    Timeout(u64),

    /// The scorer could not be reached or is not operational
    #[error("scorer unavailable: {0}")]
    Unavailable(String),

    /// The scorer returned a value outside [-1.0, 1.0]
    #[error("score {0} outside [-1.0, 1.0]")]
    OutOfRange(f64),
}

/// Capability interface for sentiment scoring
///
/// `score` must be deterministic and pure for identical text: polarity is
/// encoded in the sign, confidence in the magnitude, both within
/// [-1.0, 1.0].
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    async fn score(&self, text: &str) -> Result<f64, ScoringError>;
}

/// Small built-in positive lexicon (English + Portuguese)
const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "love", "happy", "best", "amazing", "awesome", "beautiful", "excellent",
    "wonderful", "nice", "win", "fantastic", "perfect", "fun", "cool", "brilliant", "enjoy",
    "glad", "thanks", "congrats", "bom", "boa", "ótimo", "otimo", "amor", "feliz", "melhor",
    "incrível", "incrivel", "lindo", "linda", "excelente", "maravilhoso", "legal", "parabéns",
    "parabens", "obrigado", "obrigada", "adorei", "gostei",
];

/// Small built-in negative lexicon (English + Portuguese)
const NEGATIVE_WORDS: &[&str] = &[
    "bad", "hate", "sad", "worst", "terrible", "awful", "horrible", "angry", "ugly", "fail",
    "lose", "broken", "wrong", "boring", "annoying", "disappointed", "disgusting", "poor",
    "ruim", "odeio", "triste", "pior", "terrível", "terrivel", "horrível", "horrivel",
    "péssimo", "pessimo", "raiva", "feio", "feia", "chato", "chata", "decepcionado",
    "decepcionada", "nojento", "errado",
];

/// Deterministic lexicon-based scorer shipped with the crate
///
/// Scores as `(positive hits - negative hits) / total hits` over the
/// case-folded tokens of the text, which stays within [-1.0, 1.0] by
/// construction. Texts with no lexicon hits score 0.0.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl LexiconScorer {
    /// Create a scorer with the built-in bilingual lexicon
    #[must_use]
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().map(|w| (*w).to_string()).collect(),
            negative: NEGATIVE_WORDS.iter().map(|w| (*w).to_string()).collect(),
        }
    }

    /// Create a scorer with a caller-supplied lexicon
    ///
    /// Words are compared case-folded.
    #[must_use]
    pub fn with_lexicon(positive: HashSet<String>, negative: HashSet<String>) -> Self {
        Self {
            positive: positive.into_iter().map(|w| w.to_lowercase()).collect(),
            negative: negative.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    fn score_text(&self, text: &str) -> f64 {
        let mut pos = 0u64;
        let mut neg = 0u64;
        for token in tokenize(text) {
            let folded = token.to_lowercase();
            if self.positive.contains(&folded) {
                pos += 1;
            } else if self.negative.contains(&folded) {
                neg += 1;
            }
        }
        let total = pos + neg;
        if total == 0 {
            0.0
        } else {
            (pos as f64 - neg as f64) / total as f64
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentScorer for LexiconScorer {
    async fn score(&self, text: &str) -> Result<f64, ScoringError> {
        Ok(self.score_text(text))
    }
}

/// One score per post; `None` records a scoring failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub post_id: String,
    pub score: Option<f64>,
}

/// A post that could not be scored, with the recorded reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnscoredPost {
    pub post_id: String,
    pub reason: String,
}

/// Configuration for sentiment analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Maximum posts in each polarity extreme view
    pub top_n: usize,

    /// Per-post scoring timeout in milliseconds
    pub score_timeout_ms: u64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            score_timeout_ms: 5_000,
        }
    }
}

/// Sentiment section of an analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentReport {
    /// Raw score list, one entry per post in corpus order
    pub scores: Vec<SentimentScore>,

    /// Posts ranked by score descending, failures excluded
    pub most_positive: Vec<Post>,

    /// Posts ranked by score ascending, failures excluded
    pub most_negative: Vec<Post>,

    /// Posts whose scoring failed, with recorded reasons
    pub unscored: Vec<UnscoredPost>,
}

impl SentimentReport {
    /// Whether every post in a non-empty corpus failed to score
    #[must_use]
    pub fn all_failed(&self) -> bool {
        !self.scores.is_empty() && self.scores.iter().all(|s| s.score.is_none())
    }
}

/// Score every post and rank the polarity extremes
///
/// Posts are scored concurrently, each `score` call under the configured
/// timeout; results are recorded in corpus order regardless of completion
/// order. A timed-out or otherwise failed post is recorded in `unscored`,
/// kept in `scores` with `score = None`, and excluded from both extremes.
/// Ties within an extreme break on ascending post `id`.
pub async fn analyze_sentiment(
    corpus: &[Post],
    scorer: &dyn SentimentScorer,
    config: &SentimentConfig,
) -> SentimentReport {
    let timeout = Duration::from_millis(config.score_timeout_ms);

    let outcomes = futures::future::join_all(corpus.iter().map(|post| async move {
        match tokio::time::timeout(timeout, scorer.score(&post.text)).await {
            Ok(Ok(value)) if (-1.0..=1.0).contains(&value) => Ok(value),
            Ok(Ok(value)) => Err(ScoringError::OutOfRange(value)),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(ScoringError::Timeout(config.score_timeout_ms)),
        }
    }))
    .await;

    let mut scores = Vec::with_capacity(corpus.len());
    let mut unscored = Vec::new();
    let mut scored: Vec<(f64, &Post)> = Vec::new();

    for (post, outcome) in corpus.iter().zip(outcomes) {
        match outcome {
            Ok(value) => {
                scores.push(SentimentScore {
                    post_id: post.id.clone(),
                    score: Some(value),
                });
                scored.push((value, post));
            }
            Err(err) => {
                warn!(post_id = %post.id, error = %err, "sentiment scoring failed");
                scores.push(SentimentScore {
                    post_id: post.id.clone(),
                    score: None,
                });
                unscored.push(UnscoredPost {
                    post_id: post.id.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    // Scores are validated finite, so partial_cmp cannot actually fail here.
    let mut most_positive = scored.clone();
    most_positive.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.id.cmp(&b.1.id))
    });
    most_positive.truncate(config.top_n);

    let mut most_negative = scored;
    most_negative.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.id.cmp(&b.1.id))
    });
    most_negative.truncate(config.top_n);

    SentimentReport {
        scores,
        most_positive: most_positive.into_iter().map(|(_, p)| p.clone()).collect(),
        most_negative: most_negative.into_iter().map(|(_, p)| p.clone()).collect(),
        unscored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(id: &str, text: &str) -> Post {
        Post {
            id: id.to_string(),
            text: text.to_string(),
            author_handle: "tester".to_string(),
            is_verified: false,
            location: None,
            like_count: 0,
            repost_count: 0,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    /// Scorer that always fails, for unavailability paths
    struct BrokenScorer;

    #[async_trait]
    impl SentimentScorer for BrokenScorer {
        async fn score(&self, _text: &str) -> Result<f64, ScoringError> {
            Err(ScoringError::Unavailable("connection refused".to_string()))
        }
    }

    /// Scorer that returns an out-of-range value
    struct WildScorer;

    #[async_trait]
    impl SentimentScorer for WildScorer {
        async fn score(&self, _text: &str) -> Result<f64, ScoringError> {
            Ok(3.5)
        }
    }

    #[test]
    fn test_lexicon_scorer_polarity() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score_text("what a great amazing day") > 0.0);
        assert!(scorer.score_text("terrible awful experience") < 0.0);
        assert_eq!(scorer.score_text("the sky has clouds"), 0.0);
    }

    #[test]
    fn test_lexicon_scorer_mixed_text() {
        let scorer = LexiconScorer::new();
        // One positive, one negative hit cancel out.
        assert_eq!(scorer.score_text("great but terrible"), 0.0);
        // Two positive, one negative.
        let score = scorer.score_text("great amazing but terrible");
        assert!((score - (1.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_lexicon_scorer_deterministic() {
        let scorer = LexiconScorer::new();
        let text = "love this, best day, but sad ending";
        assert_eq!(scorer.score_text(text), scorer.score_text(text));
    }

    #[test]
    fn test_lexicon_scorer_portuguese() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score_text("que dia lindo, adorei") > 0.0);
        assert!(scorer.score_text("filme péssimo, odeio") < 0.0);
    }

    #[tokio::test]
    async fn test_extremes_ranked_and_truncated() {
        let corpus = vec![
            post("1", "great great great"),
            post("2", "terrible awful"),
            post("3", "great but bad"),
            post("4", "nothing notable"),
        ];
        let scorer = LexiconScorer::new();
        let config = SentimentConfig {
            top_n: 2,
            ..Default::default()
        };
        let report = analyze_sentiment(&corpus, &scorer, &config).await;

        assert_eq!(report.scores.len(), 4);
        assert_eq!(report.most_positive.len(), 2);
        assert_eq!(report.most_positive[0].id, "1");
        assert_eq!(report.most_negative[0].id, "2");
        assert!(report.unscored.is_empty());
    }

    #[tokio::test]
    async fn test_tie_break_ascending_id() {
        let corpus = vec![post("b", "great"), post("a", "love")];
        let scorer = LexiconScorer::new();
        let report = analyze_sentiment(&corpus, &scorer, &SentimentConfig::default()).await;
        // Both score 1.0; ascending id decides.
        assert_eq!(report.most_positive[0].id, "a");
        assert_eq!(report.most_positive[1].id, "b");
    }

    #[tokio::test]
    async fn test_broken_scorer_records_unscored() {
        let corpus = vec![post("1", "anything")];
        let report =
            analyze_sentiment(&corpus, &BrokenScorer, &SentimentConfig::default()).await;

        assert_eq!(report.scores[0].score, None);
        assert_eq!(report.unscored.len(), 1);
        assert!(report.unscored[0].reason.contains("unavailable"));
        assert!(report.most_positive.is_empty());
        assert!(report.most_negative.is_empty());
        assert!(report.all_failed());
    }

    #[tokio::test]
    async fn test_out_of_range_score_rejected() {
        let corpus = vec![post("1", "anything")];
        let report = analyze_sentiment(&corpus, &WildScorer, &SentimentConfig::default()).await;
        assert_eq!(report.scores[0].score, None);
        assert!(report.unscored[0].reason.contains("outside"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_scorer_times_out() {
        /// Scorer that sleeps past any reasonable timeout
        struct SlowScorer;

        #[async_trait]
        impl SentimentScorer for SlowScorer {
            async fn score(&self, _text: &str) -> Result<f64, ScoringError> {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(0.0)
            }
        }

        let corpus = vec![post("1", "anything")];
        let config = SentimentConfig {
            score_timeout_ms: 100,
            ..Default::default()
        };
        let report = analyze_sentiment(&corpus, &SlowScorer, &config).await;
        assert_eq!(report.scores[0].score, None);
        assert!(report.unscored[0].reason.contains("timed out"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scores_recorded_in_corpus_order() {
        /// Scorer whose latency varies by text, so completion order differs
        /// from corpus order
        struct VariableLatencyScorer;

        #[async_trait]
        impl SentimentScorer for VariableLatencyScorer {
            async fn score(&self, text: &str) -> Result<f64, ScoringError> {
                if text.contains("slow") {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    Ok(0.5)
                } else {
                    Ok(-0.5)
                }
            }
        }

        let corpus = vec![
            post("1", "slow start"),
            post("2", "quick"),
            post("3", "slow finish"),
        ];
        let report =
            analyze_sentiment(&corpus, &VariableLatencyScorer, &SentimentConfig::default())
                .await;

        let ids: Vec<&str> = report.scores.iter().map(|s| s.post_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(report.scores[0].score, Some(0.5));
        assert_eq!(report.scores[1].score, Some(-0.5));
        assert_eq!(report.scores[2].score, Some(0.5));
    }

    #[tokio::test]
    async fn test_empty_corpus() {
        let report =
            analyze_sentiment(&[], &LexiconScorer::new(), &SentimentConfig::default()).await;
        assert!(report.scores.is_empty());
        assert!(report.most_positive.is_empty());
        assert!(!report.all_failed());
    }
}
