//! Storage trait for short URL mappings.

use crate::domain::entities::UrlMapping;
use crate::error::AppError;
use async_trait::async_trait;

/// Polymorphic storage abstraction over the code → URL mapping.
///
/// Every operation is safe to call concurrently with any other. Backends
/// are selected at runtime by
/// [`crate::infrastructure::persistence::create_store`], so consumers hold
/// the trait as `Arc<dyn MappingStore>`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryStore`] - volatile,
///   in-process, lock-guarded map
/// - [`crate::infrastructure::persistence::PgMappingStore`] - durable,
///   connection-pooled PostgreSQL
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Inserts a new mapping keyed by `code`.
    ///
    /// Insert-only on every backend: a live mapping already holding the
    /// code fails with [`AppError::Conflict`]. An expired mapping does not
    /// block its code from being reused.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the code is taken,
    /// [`AppError::Storage`] on I/O or timeout failure.
    async fn save(&self, mapping: UrlMapping) -> Result<(), AppError>;

    /// Returns the original URL for `code`.
    ///
    /// Unknown codes and mappings whose `expires_at` has elapsed both
    /// resolve to `Ok(None)`; an error means genuine storage failure.
    async fn get(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Atomically increments the click counter for an existing mapping.
    ///
    /// Concurrent increments never lose updates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is not stored,
    /// [`AppError::Storage`] on I/O or timeout failure.
    async fn increment_click_count(&self, code: &str) -> Result<(), AppError>;

    /// Lists all mappings created by `user_id`, possibly empty.
    ///
    /// Ordering is unspecified for the volatile backend; the durable
    /// backend orders by `created_at` descending.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<UrlMapping>, AppError>;

    /// Removes the mapping for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is not stored,
    /// [`AppError::Storage`] on I/O or timeout failure.
    async fn delete(&self, code: &str) -> Result<(), AppError>;

    /// Physically removes mappings whose `expires_at` has elapsed.
    ///
    /// Reads already treat expired mappings as absent; this reclaims the
    /// storage. Returns how many mappings were removed.
    async fn cleanup_expired(&self) -> Result<u64, AppError>;

    /// Releases held resources (connections). Idempotent; a no-op for the
    /// volatile backend.
    async fn close(&self);
}
