//! Engagement ranking of posts by interaction counts

use crate::models::Post;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Interaction metric used for engagement ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementMetric {
    Likes,
    Reposts,
    Combined,
}

impl EngagementMetric {
    /// Metric value for a post
    #[must_use]
    pub fn value(&self, post: &Post) -> u64 {
        match self {
            Self::Likes => post.like_count,
            Self::Reposts => post.repost_count,
            Self::Combined => post.combined_engagement(),
        }
    }

    /// Parse a metric name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "likes" => Some(Self::Likes),
            "reposts" => Some(Self::Reposts),
            "combined" => Some(Self::Combined),
            _ => None,
        }
    }

    /// Get string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Likes => "likes",
            Self::Reposts => "reposts",
            Self::Combined => "combined",
        }
    }
}

impl std::fmt::Display for EngagementMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for engagement ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementConfig {
    /// Metric to rank by
    pub metric: EngagementMetric,

    /// Maximum posts in the ranked view
    pub top_n: usize,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            metric: EngagementMetric::Likes,
            top_n: 10,
        }
    }
}

/// Rank posts by the chosen engagement metric
///
/// Sorted by metric descending; ties break on earlier `created_at` first,
/// then ascending `id`, so the order is a deterministic total order. When
/// `top_n` exceeds the corpus size the whole ranked corpus is returned; no
/// post is duplicated or dropped silently.
#[must_use]
pub fn rank_by_engagement(corpus: &[Post], config: &EngagementConfig) -> Vec<Post> {
    let mut ranked: Vec<Post> = corpus.to_vec();
    ranked.sort_by_key(|post| {
        (
            Reverse(config.metric.value(post)),
            post.created_at,
            post.id.clone(),
        )
    });
    ranked.truncate(config.top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
    }

    fn post(id: &str, likes: u64, reposts: u64, hour: u32) -> Post {
        Post {
            id: id.to_string(),
            text: "text".to_string(),
            author_handle: "tester".to_string(),
            is_verified: false,
            location: None,
            like_count: likes,
            repost_count: reposts,
            created_at: ts(hour),
        }
    }

    #[test]
    fn test_likes_ranking() {
        let corpus = vec![post("a", 3, 0, 0), post("b", 10, 0, 0), post("c", 7, 0, 0)];
        let ranked = rank_by_engagement(&corpus, &EngagementConfig::default());
        let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_combined_metric() {
        let corpus = vec![post("a", 10, 5, 0), post("b", 2, 20, 0)];
        let config = EngagementConfig {
            metric: EngagementMetric::Combined,
            ..Default::default()
        };
        let ranked = rank_by_engagement(&corpus, &config);
        // 22 beats 15.
        assert_eq!(ranked[0].id, "b");
    }

    #[test]
    fn test_tie_break_created_at_then_id() {
        // Both tie at combined 15; earlier created_at wins.
        let corpus = vec![post("b", 2, 13, 5), post("a", 10, 5, 3)];
        let config = EngagementConfig {
            metric: EngagementMetric::Combined,
            ..Default::default()
        };
        let ranked = rank_by_engagement(&corpus, &config);
        assert_eq!(ranked[0].id, "a");
        assert_eq!(ranked[1].id, "b");

        // Same timestamp as well: ascending id decides.
        let corpus = vec![post("z", 5, 0, 1), post("y", 5, 0, 1)];
        let ranked = rank_by_engagement(&corpus, &EngagementConfig::default());
        assert_eq!(ranked[0].id, "y");
    }

    #[test]
    fn test_top_n_beyond_corpus_returns_all() {
        let corpus = vec![post("a", 1, 0, 0), post("b", 2, 0, 0)];
        let config = EngagementConfig {
            top_n: 100,
            ..Default::default()
        };
        let ranked = rank_by_engagement(&corpus, &config);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_metric_parse_roundtrip() {
        for metric in [
            EngagementMetric::Likes,
            EngagementMetric::Reposts,
            EngagementMetric::Combined,
        ] {
            assert_eq!(EngagementMetric::parse(metric.as_str()), Some(metric));
        }
        assert_eq!(EngagementMetric::parse("views"), None);
    }

    #[test]
    fn test_empty_corpus() {
        assert!(rank_by_engagement(&[], &EngagementConfig::default()).is_empty());
    }
}
