//! Common test utilities

use chrono::{DateTime, TimeZone, Utc};
use tagpulse::models::Post;

/// Fixed base timestamp for deterministic fixtures
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Create a test post with default values
pub fn create_test_post(id: &str, text: &str) -> Post {
    Post {
        id: id.to_string(),
        text: text.to_string(),
        author_handle: format!("user_{id}"),
        is_verified: false,
        location: None,
        like_count: 0,
        repost_count: 0,
        created_at: base_time(),
    }
}

/// Create a post with engagement counts and an offset timestamp
#[allow(dead_code)]
pub fn create_engaged_post(id: &str, likes: u64, reposts: u64, minutes_later: i64) -> Post {
    Post {
        like_count: likes,
        repost_count: reposts,
        created_at: base_time() + chrono::Duration::minutes(minutes_later),
        ..create_test_post(id, "engagement fixture")
    }
}

/// Create a post with a declared location and verification flag
#[allow(dead_code)]
pub fn create_located_post(id: &str, location: Option<&str>, verified: bool) -> Post {
    Post {
        location: location.map(str::to_string),
        is_verified: verified,
        ..create_test_post(id, "location fixture")
    }
}
