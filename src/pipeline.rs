//! Analysis pipeline: fans one corpus out to every analytical view
//!
//! The pipeline performs no I/O; it operates purely over an in-memory corpus
//! supplied by the caller. Each sub-analysis is independent, and a
//! whole-section failure is recorded in the bundle instead of aborting the
//! call. Only configuration errors abort up front, before any sub-analysis
//! runs, since they indicate caller misuse.

use crate::analytics::{
    analyze_sentiment, author_activity, filter_by_verification, location_buckets,
    rank_by_engagement, word_frequencies, AuthorActivity, AuthorConfig, EngagementConfig,
    GeoConfig, LocationBucket, SentimentConfig, SentimentReport, SentimentScorer,
    WordFrequencyConfig, WordFrequencyEntry,
};
use crate::config::ConfigurationError;
use crate::models::Post;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One section of an [`AnalysisBundle`]: either a computed result or an
/// explicit unavailability reason. Nothing is silently swallowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum Section<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> Section<T> {
    /// Whether the section holds a result
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Get the result, if available
    #[must_use]
    pub fn as_available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable { .. } => None,
        }
    }

    /// Get the recorded unavailability reason, if any
    #[must_use]
    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}

/// Configuration for one `analyze` call
///
/// Validated up front; an invalid option fails the whole call before any
/// sub-analysis runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub word_frequency: WordFrequencyConfig,
    pub geo: GeoConfig,
    pub engagement: EngagementConfig,
    pub sentiment: SentimentConfig,
    pub authors: AuthorConfig,

    /// Verification flag value the filtered view selects for
    pub require_verified: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            word_frequency: WordFrequencyConfig::default(),
            geo: GeoConfig::default(),
            engagement: EngagementConfig::default(),
            sentiment: SentimentConfig::default(),
            authors: AuthorConfig::default(),
            require_verified: true,
        }
    }
}

impl AnalysisConfig {
    /// Check every option value
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        fn at_least_one(
            option: &'static str,
            value: usize,
        ) -> Result<(), ConfigurationError> {
            if value == 0 {
                Err(ConfigurationError::InvalidOption {
                    option,
                    reason: "must be at least 1".to_string(),
                })
            } else {
                Ok(())
            }
        }

        at_least_one("word_frequency.top_n", self.word_frequency.top_n)?;
        at_least_one("geo.max_samples", self.geo.max_samples)?;
        at_least_one("engagement.top_n", self.engagement.top_n)?;
        at_least_one("sentiment.top_n", self.sentiment.top_n)?;
        at_least_one("authors.top_n", self.authors.top_n)?;
        if self.sentiment.score_timeout_ms == 0 {
            return Err(ConfigurationError::InvalidOption {
                option: "sentiment.score_timeout_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Aggregated outputs of one `analyze` call
///
/// Plain serializable data with no rendering logic; the presentation layer
/// (CLI, plotting, reporting) consumes it as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisBundle {
    /// Number of posts in the analyzed corpus
    pub corpus_size: usize,

    pub word_frequency: Section<Vec<WordFrequencyEntry>>,
    pub locations: Section<Vec<LocationBucket>>,
    pub engagement: Section<Vec<Post>>,
    pub sentiment: Section<SentimentReport>,
    pub verified: Section<Vec<Post>>,
    pub authors: Section<Vec<AuthorActivity>>,
}

/// Run every analytical view over one corpus
///
/// Fails only on an invalid configuration. Sub-analyses are independent:
/// a sentiment scorer that is down for the whole run yields an unavailable
/// sentiment section while every other section still completes. Calling
/// twice with identical corpus and configuration yields identical bundles.
pub async fn analyze(
    corpus: &[Post],
    config: &AnalysisConfig,
    scorer: &dyn SentimentScorer,
) -> Result<AnalysisBundle, ConfigurationError> {
    config.validate()?;

    debug!(corpus_size = corpus.len(), "starting analysis");

    let word_frequency = Section::Available(word_frequencies(corpus, &config.word_frequency));
    let locations = Section::Available(location_buckets(corpus, &config.geo));
    let engagement = Section::Available(rank_by_engagement(corpus, &config.engagement));
    let verified = Section::Available(filter_by_verification(corpus, config.require_verified));
    let authors = Section::Available(author_activity(corpus, &config.authors));

    let report = analyze_sentiment(corpus, scorer, &config.sentiment).await;
    let sentiment = if report.all_failed() {
        let reason = report
            .unscored
            .first()
            .map(|u| u.reason.clone())
            .unwrap_or_else(|| "no posts could be scored".to_string());
        warn!(%reason, "sentiment section unavailable");
        Section::Unavailable { reason }
    } else {
        Section::Available(report)
    };

    Ok(AnalysisBundle {
        corpus_size: corpus.len(),
        word_frequency,
        locations,
        engagement,
        sentiment,
        verified,
        authors,
    })
}
