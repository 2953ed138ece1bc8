//! URL mapping entity, the sole persisted record of the service.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Association between a short code and an original URL, plus metadata.
///
/// `code`, `original_url`, `user_id`, and `created_at` are immutable once
/// created. Only `clicks` is ever mutated, by the resolve-time click
/// accounting side effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlMapping {
    pub code: String,
    pub original_url: String,
    /// Opaque creator identifier; not validated, used only for listing.
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    /// When set and in the past, the mapping is invisible to reads but not
    /// necessarily removed from storage until a cleanup pass runs.
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: i64,
}

impl UrlMapping {
    /// Creates a fresh mapping with `created_at = now` and zero clicks.
    pub fn new(code: String, original_url: String, user_id: String) -> Self {
        Self {
            code,
            original_url,
            user_id,
            created_at: Utc::now(),
            expires_at: None,
            clicks: 0,
        }
    }

    /// Sets an expiry timestamp on a freshly built mapping.
    pub fn with_expiry(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Returns true if the mapping has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_mapping_creation() {
        let mapping = UrlMapping::new(
            "abc123".to_string(),
            "https://example.com/long".to_string(),
            "user-1".to_string(),
        );

        assert_eq!(mapping.code, "abc123");
        assert_eq!(mapping.original_url, "https://example.com/long");
        assert_eq!(mapping.user_id, "user-1");
        assert_eq!(mapping.clicks, 0);
        assert!(mapping.expires_at.is_none());
        assert!(!mapping.is_expired());
    }

    #[test]
    fn test_mapping_with_future_expiry_is_live() {
        let mapping = UrlMapping::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            "user-1".to_string(),
        )
        .with_expiry(Some(Utc::now() + Duration::hours(1)));

        assert!(!mapping.is_expired());
    }

    #[test]
    fn test_mapping_with_past_expiry_is_expired() {
        let mapping = UrlMapping::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            "user-1".to_string(),
        )
        .with_expiry(Some(Utc::now() - Duration::seconds(1)));

        assert!(mapping.is_expired());
    }
}
