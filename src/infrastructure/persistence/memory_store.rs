//! Volatile in-process implementation of the mapping store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use serde_json::json;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::MappingStore;
use crate::error::AppError;

/// In-memory mapping store guarded by a single reader-writer lock.
///
/// Every operation holds the lock for its entire duration, so no partial
/// state is ever visible to another caller. Growth is unbounded; there is
/// no eviction. Intended for development and tests, and as the reference
/// semantics for the durable backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, UrlMapping>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingStore for MemoryStore {
    async fn save(&self, mapping: UrlMapping) -> Result<(), AppError> {
        let mut data = self
            .data
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        // Insert-only for live entries; an expired entry gives its code up.
        if let Some(existing) = data.get(&mapping.code) {
            if !existing.is_expired() {
                return Err(AppError::conflict(
                    "Code already exists",
                    json!({ "code": mapping.code }),
                ));
            }
        }

        data.insert(mapping.code.clone(), mapping);
        Ok(())
    }

    async fn get(&self, code: &str) -> Result<Option<String>, AppError> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);

        Ok(data
            .get(code)
            .filter(|mapping| !mapping.is_expired())
            .map(|mapping| mapping.original_url.clone()))
    }

    async fn increment_click_count(&self, code: &str) -> Result<(), AppError> {
        let mut data = self
            .data
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        match data.get_mut(code) {
            Some(mapping) => {
                mapping.clicks += 1;
                Ok(())
            }
            None => Err(AppError::not_found(
                "code not found",
                json!({ "code": code }),
            )),
        }
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<UrlMapping>, AppError> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);

        Ok(data
            .values()
            .filter(|mapping| mapping.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, code: &str) -> Result<(), AppError> {
        let mut data = self
            .data
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        match data.remove(code) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(
                "code not found",
                json!({ "code": code }),
            )),
        }
    }

    async fn cleanup_expired(&self) -> Result<u64, AppError> {
        let mut data = self
            .data
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let before = data.len();
        data.retain(|_, mapping| !mapping.is_expired());

        Ok((before - data.len()) as u64)
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn mapping(code: &str, url: &str, user: &str) -> UrlMapping {
        UrlMapping::new(code.to_string(), url.to_string(), user.to_string())
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let store = MemoryStore::new();

        store
            .save(mapping("abc123", "https://example.com", "user-1"))
            .await
            .unwrap();

        let url = store.get("abc123").await.unwrap();
        assert_eq!(url.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_get_unknown_code_is_absent_not_error() {
        let store = MemoryStore::new();

        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_conflict_on_live_code() {
        let store = MemoryStore::new();

        store
            .save(mapping("abc123", "https://example.com", "user-1"))
            .await
            .unwrap();

        let err = store
            .save(mapping("abc123", "https://other.com", "user-2"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        // The original mapping is untouched.
        let url = store.get("abc123").await.unwrap();
        assert_eq!(url.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_save_reclaims_expired_code() {
        let store = MemoryStore::new();

        let expired = mapping("abc123", "https://old.com", "user-1")
            .with_expiry(Some(Utc::now() - Duration::seconds(1)));
        store.save(expired).await.unwrap();

        store
            .save(mapping("abc123", "https://new.com", "user-2"))
            .await
            .unwrap();

        let url = store.get("abc123").await.unwrap();
        assert_eq!(url.as_deref(), Some("https://new.com"));
    }

    #[tokio::test]
    async fn test_expired_mapping_absent_but_stored() {
        let store = MemoryStore::new();

        let expired = mapping("abc123", "https://example.com", "user-1")
            .with_expiry(Some(Utc::now() - Duration::seconds(1)));
        store.save(expired).await.unwrap();

        // Invisible to get...
        assert!(store.get("abc123").await.unwrap().is_none());

        // ...but still physically present until a cleanup pass runs.
        let listed = store.list_by_user("user-1").await.unwrap();
        assert_eq!(listed.len(), 1);

        let removed = store.cleanup_expired().await.unwrap();
        assert_eq!(removed, 1);

        assert!(store.get("abc123").await.unwrap().is_none());
        assert!(store.list_by_user("user-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_keeps_live_mappings() {
        let store = MemoryStore::new();

        store
            .save(mapping("live", "https://example.com", "user-1"))
            .await
            .unwrap();
        store
            .save(
                mapping("dead", "https://example.com", "user-1")
                    .with_expiry(Some(Utc::now() - Duration::hours(1))),
            )
            .await
            .unwrap();

        assert_eq!(store.cleanup_expired().await.unwrap(), 1);
        assert_eq!(store.get("live").await.unwrap().as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_increment_click_count() {
        let store = MemoryStore::new();

        store
            .save(mapping("abc123", "https://example.com", "user-1"))
            .await
            .unwrap();

        store.increment_click_count("abc123").await.unwrap();
        store.increment_click_count("abc123").await.unwrap();

        let listed = store.list_by_user("user-1").await.unwrap();
        assert_eq!(listed[0].clicks, 2);
    }

    #[tokio::test]
    async fn test_increment_unknown_code_not_found() {
        let store = MemoryStore::new();

        let err = store.increment_click_count("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_by_user_filters_owner() {
        let store = MemoryStore::new();

        store
            .save(mapping("one", "https://a.com", "alice"))
            .await
            .unwrap();
        store
            .save(mapping("two", "https://b.com", "alice"))
            .await
            .unwrap();
        store
            .save(mapping("three", "https://c.com", "bob"))
            .await
            .unwrap();

        let listed = store.list_by_user("alice").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|m| m.user_id == "alice"));

        assert!(store.list_by_user("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();

        store
            .save(mapping("abc123", "https://example.com", "user-1"))
            .await
            .unwrap();

        store.delete("abc123").await.unwrap();
        assert!(store.get("abc123").await.unwrap().is_none());

        let err = store.delete("abc123").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_close_is_noop_and_idempotent() {
        let store = MemoryStore::new();

        store
            .save(mapping("abc123", "https://example.com", "user-1"))
            .await
            .unwrap();

        store.close().await;
        store.close().await;

        // Data survives close for the volatile backend.
        assert!(store.get("abc123").await.unwrap().is_some());
    }
}
