//! Filtering posts by author-verification status

use crate::models::Post;

/// Select the posts whose `is_verified` flag matches `require_verified`
///
/// Pure order-preserving filter: the output is a strict subsequence of the
/// input, and together with its complement partitions the corpus by post id.
#[must_use]
pub fn filter_by_verification(corpus: &[Post], require_verified: bool) -> Vec<Post> {
    corpus
        .iter()
        .filter(|post| post.is_verified == require_verified)
        .cloned()
        .collect()
}
