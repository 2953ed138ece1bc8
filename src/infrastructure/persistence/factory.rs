//! Construction-time backend selection.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::info;

use crate::config::Config;
use crate::domain::repositories::MappingStore;
use crate::error::AppError;
use crate::infrastructure::persistence::{MemoryStore, PgMappingStore};

/// Builds the mapping store selected by `DB_TYPE`.
///
/// Recognized selectors are `"memory"`, `"postgres"`, and `"redis"`; the
/// last is recognized but not yet implemented and fails construction, as
/// does any unknown selector.
///
/// # Errors
///
/// - [`AppError::UnsupportedBackend`] for `"redis"` or an unknown selector
/// - [`AppError::Validation`] when `DB_TYPE=postgres` without a database URL
/// - [`AppError::Storage`] when pool creation or migration fails
pub async fn create_store(config: &Config) -> Result<Arc<dyn MappingStore>, AppError> {
    match config.db_type.as_str() {
        "memory" => {
            info!("using in-memory mapping store");
            Ok(Arc::new(MemoryStore::new()))
        }
        "postgres" => {
            let database_url = config.database_url.as_deref().ok_or_else(|| {
                AppError::bad_request(
                    "DATABASE_URL is required for the postgres backend",
                    json!({}),
                )
            })?;

            let store = PgMappingStore::connect(
                database_url,
                config.db_max_connections,
                Duration::from_secs(config.db_connect_timeout),
            )
            .await?;

            info!("using postgres mapping store");
            Ok(Arc::new(store))
        }
        "redis" => Err(AppError::unsupported_backend(
            "redis storage not yet implemented",
            json!({ "db_type": "redis" }),
        )),
        other => Err(AppError::unsupported_backend(
            format!("unknown database type: {other}"),
            json!({ "db_type": other }),
        )),
    }
}
