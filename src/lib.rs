//! tagpulse - Hashtag search analytics
//!
//! Retrieves posts matching a search term (typically a hashtag) and derives
//! aggregate analytics over the fetched corpus: word-frequency ranking,
//! geographic distribution, engagement ranking, sentiment polarity ranking,
//! author activity and verification filtering.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`] - Core data structures: posts, corpus, validation
//! - [`analytics`] - The independent analytical views over a corpus
//! - [`pipeline`] - The `analyze` orchestrator and result bundle
//! - [`fetcher`] - Recent-search API client
//! - [`config`] - Configuration management and settings
//! - [`error`] - Unified error handling
//!
//! # Example
//!
//! ```no_run
//! use tagpulse::analytics::LexiconScorer;
//! use tagpulse::pipeline::{analyze, AnalysisConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let corpus = vec![]; // fetched by fetcher::SearchClient or loaded from file
//!     let bundle = analyze(&corpus, &AnalysisConfig::default(), &LexiconScorer::new()).await?;
//!     println!("{}", serde_json::to_string_pretty(&bundle)?);
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod pipeline;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{
        EngagementConfig, EngagementMetric, GeoConfig, LexiconScorer, SentimentConfig,
        SentimentScorer, WordFrequencyConfig,
    };
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::fetcher::{SearchClient, SearchQuery};
    pub use crate::models::{Corpus, Language, Post, RawPost};
    pub use crate::pipeline::{analyze, AnalysisBundle, AnalysisConfig, Section};
}

// Direct re-exports for convenience
pub use models::{Corpus, Language, Post, RawPost};
pub use pipeline::{analyze, AnalysisBundle, AnalysisConfig};
