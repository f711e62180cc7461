//! Geographic distribution of posts by declared location
//!
//! Locations are free text, so grouping normalizes them (trim + case-fold)
//! while keeping the first-seen original casing for display.

use crate::models::Post;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display label for posts without a declared location
pub const UNKNOWN_LOCATION: &str = "unknown";

/// A group of posts sharing a normalized location string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationBucket {
    /// First-seen original casing of the location (trimmed)
    pub location: String,

    /// Number of posts in the bucket, always at least 1
    pub count: u64,

    /// Up to `max_samples` posts from the bucket, in corpus order
    pub sample_posts: Vec<Post>,
}

/// Configuration for geo aggregation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    /// Add a bucket for posts with no declared location
    pub include_unknown: bool,

    /// Maximum sample posts kept per bucket
    pub max_samples: usize,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            include_unknown: false,
            max_samples: 5,
        }
    }
}

/// Group posts into location buckets
///
/// Buckets are sorted by count descending, ties broken by ascending
/// lexicographic order of the normalized location key. Posts with `None`
/// location are excluded unless `include_unknown` is set, in which case they
/// form an [`UNKNOWN_LOCATION`] bucket subject to the same ordering rules.
#[must_use]
pub fn location_buckets(corpus: &[Post], config: &GeoConfig) -> Vec<LocationBucket> {
    // normalized key -> (display, count, samples)
    let mut buckets: HashMap<String, (String, u64, Vec<Post>)> = HashMap::new();

    for post in corpus {
        let display = match &post.location {
            Some(loc) => loc.trim().to_string(),
            None if config.include_unknown => UNKNOWN_LOCATION.to_string(),
            None => continue,
        };
        if display.is_empty() {
            continue;
        }
        let key = display.to_lowercase();

        let entry = buckets
            .entry(key)
            .or_insert_with(|| (display, 0, Vec::new()));
        entry.1 += 1;
        if entry.2.len() < config.max_samples {
            entry.2.push(post.clone());
        }
    }

    let mut result: Vec<(String, LocationBucket)> = buckets
        .into_iter()
        .map(|(key, (location, count, sample_posts))| {
            (
                key,
                LocationBucket {
                    location,
                    count,
                    sample_posts,
                },
            )
        })
        .collect();

    result.sort_by(|(ka, a), (kb, b)| b.count.cmp(&a.count).then_with(|| ka.cmp(kb)));
    result.into_iter().map(|(_, bucket)| bucket).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(id: &str, location: Option<&str>) -> Post {
        Post {
            id: id.to_string(),
            text: "text".to_string(),
            author_handle: "tester".to_string(),
            is_verified: false,
            location: location.map(str::to_string),
            like_count: 0,
            repost_count: 0,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_grouping_case_folded() {
        let corpus = vec![
            post("1", Some("Lisboa")),
            post("2", Some("lisboa")),
            post("3", Some("LISBOA")),
        ];
        let buckets = location_buckets(&corpus, &GeoConfig::default());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 3);
        // First-seen casing wins for display.
        assert_eq!(buckets[0].location, "Lisboa");
    }

    #[test]
    fn test_unknown_excluded_by_default() {
        let corpus = vec![post("1", Some("Porto")), post("2", None)];
        let buckets = location_buckets(&corpus, &GeoConfig::default());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].location, "Porto");
    }

    #[test]
    fn test_include_unknown_bucket() {
        let corpus = vec![post("1", Some("Porto")), post("2", None), post("3", None)];
        let config = GeoConfig {
            include_unknown: true,
            ..Default::default()
        };
        let buckets = location_buckets(&corpus, &config);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].location, UNKNOWN_LOCATION);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn test_sorted_by_count_then_key() {
        let corpus = vec![
            post("1", Some("Berlin")),
            post("2", Some("Austin")),
            post("3", Some("Austin")),
            post("4", Some("Zagreb")),
        ];
        let buckets = location_buckets(&corpus, &GeoConfig::default());
        assert_eq!(buckets[0].location, "Austin");
        assert_eq!(buckets[1].location, "Berlin");
        assert_eq!(buckets[2].location, "Zagreb");
    }

    #[test]
    fn test_sample_posts_capped_in_corpus_order() {
        let corpus: Vec<Post> = (0..8).map(|i| post(&i.to_string(), Some("Rio"))).collect();
        let config = GeoConfig {
            max_samples: 3,
            ..Default::default()
        };
        let buckets = location_buckets(&corpus, &config);
        assert_eq!(buckets[0].count, 8);
        assert_eq!(buckets[0].sample_posts.len(), 3);
        let ids: Vec<&str> = buckets[0].sample_posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_empty_corpus() {
        assert!(location_buckets(&[], &GeoConfig::default()).is_empty());
    }
}
