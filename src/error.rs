//! Unified error handling for the tagpulse crate
//!
//! Domain-specific errors live next to the code that raises them
//! ([`ValidationError`] in `models`, [`ScoringError`] in
//! `analytics::sentiment`, [`ConfigurationError`] in `config`,
//! [`FetchError`] in `fetcher`); this module wraps them into a single
//! [`Error`] enum for use across module boundaries.
//!
//! Propagation policy: errors local to one post (validation of a fetched
//! record, scoring of a single text) never abort a batch — they are logged
//! or recorded in the result. Configuration errors abort immediately since
//! they indicate caller misuse.

use std::io;
use thiserror::Error;

pub use crate::analytics::sentiment::ScoringError;
pub use crate::config::ConfigurationError;
pub use crate::fetcher::FetchError;
pub use crate::models::ValidationError;

/// Unified error type for the tagpulse crate
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input record
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid option value (caller misuse, fails the whole call)
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Per-post sentiment scoring failure
    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),

    /// Search API failure
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error indicates caller misuse rather than data trouble
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Whether the error is local to one post and safe to record and skip
    #[must_use]
    pub fn is_per_post(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Scoring(_))
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
