//! Analytical views over a fetched post corpus
//!
//! Each submodule is an independent, read-only transformation of the corpus;
//! none depends on another's output. The [`crate::pipeline`] module fans a
//! corpus out to all of them.

pub mod authors;
pub mod engagement;
pub mod geo;
pub mod sentiment;
pub mod verification;
pub mod word_frequency;

pub use authors::{author_activity, AuthorActivity, AuthorConfig};
pub use engagement::{rank_by_engagement, EngagementConfig, EngagementMetric};
pub use geo::{location_buckets, GeoConfig, LocationBucket};
pub use sentiment::{
    analyze_sentiment, LexiconScorer, ScoringError, SentimentConfig, SentimentReport,
    SentimentScore, SentimentScorer, UnscoredPost,
};
pub use verification::filter_by_verification;
pub use word_frequency::{
    builtin_stopwords, frequency_table, word_frequencies, WordFrequencyConfig,
    WordFrequencyEntry,
};
