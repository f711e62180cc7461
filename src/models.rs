// Core data structures for the tagpulse analytics engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating a raw record into a [`Post`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent or blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// An interaction count is negative in the raw record
    #[error("negative {field}: {value}")]
    NegativeCount { field: &'static str, value: i64 },
}

/// A single fetched post, immutable once constructed
///
/// All analyses read posts through shared references; nothing in the crate
/// mutates a post after [`Post::from_raw`] returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    /// Opaque identifier, unique within a corpus
    pub id: String,

    /// Raw textual content (UTF-8, arbitrary length)
    pub text: String,

    /// Handle of the posting account
    pub author_handle: String,

    /// Author trust flag at fetch time
    pub is_verified: bool,

    /// Free-text declared location; `None` means unknown
    pub location: Option<String>,

    /// Like count (non-negative)
    pub like_count: u64,

    /// Repost count (non-negative)
    pub repost_count: u64,

    /// Creation timestamp, used for tie-breaking in rankings
    pub created_at: DateTime<Utc>,
}

/// Unvalidated record shape handed in by a fetcher or corpus file
///
/// Counts are signed so that malformed negative inputs are representable
/// and rejected rather than silently wrapped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPost {
    pub id: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub author_handle: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub repost_count: i64,
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Validate a raw record into a `Post`
    ///
    /// Fails if `id`, `text` or `created_at` is missing (blank strings count
    /// as missing), or if either interaction count is negative. A
    /// blank/whitespace-only `location` normalizes to `None`.
    pub fn from_raw(raw: RawPost) -> Result<Self, ValidationError> {
        let id = raw
            .id
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingField("id"))?;
        let text = raw
            .text
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingField("text"))?;
        let created_at = raw
            .created_at
            .ok_or(ValidationError::MissingField("created_at"))?;

        if raw.like_count < 0 {
            return Err(ValidationError::NegativeCount {
                field: "like_count",
                value: raw.like_count,
            });
        }
        if raw.repost_count < 0 {
            return Err(ValidationError::NegativeCount {
                field: "repost_count",
                value: raw.repost_count,
            });
        }

        let location = raw
            .location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        Ok(Self {
            id,
            text,
            author_handle: raw.author_handle.unwrap_or_default(),
            is_verified: raw.is_verified,
            location,
            like_count: raw.like_count as u64,
            repost_count: raw.repost_count as u64,
            created_at,
        })
    }

    /// Combined interaction count (likes + reposts)
    #[must_use]
    pub fn combined_engagement(&self) -> u64 {
        self.like_count + self.repost_count
    }
}

/// An ordered batch of posts, insertion order = fetch order
///
/// Every analysis treats the corpus as immutable shared input.
pub type Corpus = Vec<Post>;

/// Language of the searched posts, selecting the stopword list and the
/// `lang:` filter of the search query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Pt,
}

impl Language {
    /// Parse a two-letter language code
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" => Some(Self::En),
            "pt" => Some(Self::Pt),
            _ => None,
        }
    }

    /// Get the two-letter code
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Pt => "pt",
        }
    }

    /// Get all supported languages
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![Self::En, Self::Pt]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(id: &str, text: &str) -> RawPost {
        RawPost {
            id: Some(id.to_string()),
            text: Some(text.to_string()),
            author_handle: Some("tester".to_string()),
            created_at: Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_raw_valid() {
        let post = Post::from_raw(raw("1", "hello world")).unwrap();
        assert_eq!(post.id, "1");
        assert_eq!(post.text, "hello world");
        assert!(!post.is_verified);
        assert_eq!(post.like_count, 0);
    }

    #[test]
    fn test_missing_id_rejected() {
        let mut r = raw("1", "hello");
        r.id = None;
        assert_eq!(Post::from_raw(r), Err(ValidationError::MissingField("id")));
    }

    #[test]
    fn test_blank_id_counts_as_missing() {
        let r = raw("   ", "hello");
        assert_eq!(Post::from_raw(r), Err(ValidationError::MissingField("id")));
    }

    #[test]
    fn test_missing_text_rejected() {
        let mut r = raw("1", "x");
        r.text = None;
        assert_eq!(
            Post::from_raw(r),
            Err(ValidationError::MissingField("text"))
        );
    }

    #[test]
    fn test_negative_count_rejected() {
        let mut r = raw("1", "hello");
        r.like_count = -3;
        assert_eq!(
            Post::from_raw(r),
            Err(ValidationError::NegativeCount {
                field: "like_count",
                value: -3
            })
        );
    }

    #[test]
    fn test_blank_location_normalized_to_none() {
        let mut r = raw("1", "hello");
        r.location = Some("   ".to_string());
        let post = Post::from_raw(r).unwrap();
        assert_eq!(post.location, None);
    }

    #[test]
    fn test_location_trimmed() {
        let mut r = raw("1", "hello");
        r.location = Some("  Lisboa  ".to_string());
        let post = Post::from_raw(r).unwrap();
        assert_eq!(post.location.as_deref(), Some("Lisboa"));
    }

    #[test]
    fn test_combined_engagement() {
        let mut r = raw("1", "hello");
        r.like_count = 10;
        r.repost_count = 5;
        let post = Post::from_raw(r).unwrap();
        assert_eq!(post.combined_engagement(), 15);
    }

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::parse("en"), Some(Language::En));
        assert_eq!(Language::parse("PT"), Some(Language::Pt));
        assert_eq!(Language::parse("de"), None);
    }

    #[test]
    fn test_language_roundtrip() {
        for lang in Language::all() {
            assert_eq!(Language::parse(lang.as_str()), Some(lang));
        }
    }
}
