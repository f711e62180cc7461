//! Author activity: post counts per posting account
//!
//! Handles are canonical identifiers, so grouping is exact-match with no
//! case folding.

use crate::models::Post;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Post count for one author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorActivity {
    /// Posting account handle
    pub handle: String,

    /// Number of posts by this author in the corpus
    pub post_count: u64,

    /// Verification flag, taken from the author's first post in the corpus
    pub verified: bool,
}

/// Configuration for author activity ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorConfig {
    /// Maximum authors in the ranked view
    pub top_n: usize,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self { top_n: 10 }
    }
}

/// Rank authors by post count
///
/// Sorted by count descending, ties broken by ascending handle.
#[must_use]
pub fn author_activity(corpus: &[Post], config: &AuthorConfig) -> Vec<AuthorActivity> {
    let mut counts: HashMap<&str, (u64, bool)> = HashMap::new();

    for post in corpus {
        let entry = counts
            .entry(post.author_handle.as_str())
            .or_insert((0, post.is_verified));
        entry.0 += 1;
    }

    let mut result: Vec<AuthorActivity> = counts
        .into_iter()
        .map(|(handle, (post_count, verified))| AuthorActivity {
            handle: handle.to_string(),
            post_count,
            verified,
        })
        .collect();

    result.sort_by(|a, b| {
        b.post_count
            .cmp(&a.post_count)
            .then_with(|| a.handle.cmp(&b.handle))
    });
    result.truncate(config.top_n);
    result
}
