//! Durable PostgreSQL implementation of the mapping store.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::MappingStore;
use crate::error::{AppError, map_sqlx_error};

/// Per-call bound for point operations (save, get, increment, delete).
const POINT_OP_TIMEOUT: Duration = Duration::from_secs(5);
/// Per-call bound for bulk operations (list, cleanup).
const BULK_OP_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection-pooled PostgreSQL mapping store.
///
/// Every operation runs as a bounded-duration unit of work on a pooled
/// connection; on timeout the call returns a storage error and the
/// statement's transaction semantics roll back any partial mutation.
pub struct PgMappingStore {
    pool: PgPool,
}

/// Row shape of the `url_mappings` table.
#[derive(sqlx::FromRow)]
struct MappingRow {
    code: String,
    original_url: String,
    user_id: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    clicks: i64,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping {
            code: row.code,
            original_url: row.original_url,
            user_id: row.user_id,
            created_at: row.created_at,
            expires_at: row.expires_at,
            clicks: row.clicks,
        }
    }
}

impl PgMappingStore {
    /// Connects to PostgreSQL and applies pending schema migrations.
    ///
    /// The store is only handed out once migrations have succeeded, so the
    /// schema is guaranteed current before any operation runs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the pool cannot be created or a
    /// migration fails; construction is aborted in both cases.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(connect_timeout)
            .connect(database_url)
            .await
            .map_err(|e| {
                AppError::storage(
                    "Failed to create connection pool",
                    json!({ "source": e.to_string() }),
                )
            })?;

        sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
            AppError::storage(
                "Failed to run migrations",
                json!({ "source": e.to_string() }),
            )
        })?;

        Ok(Self { pool })
    }

    /// Wraps a store built on an already-migrated pool. Test hook.
    #[doc(hidden)]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn bounded<T>(
        &self,
        limit: Duration,
        query: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> Result<T, AppError> {
        match tokio::time::timeout(limit, query).await {
            Ok(result) => result.map_err(map_sqlx_error),
            Err(_) => Err(AppError::storage(
                "Query timed out",
                json!({ "timeout_secs": limit.as_secs() }),
            )),
        }
    }
}

#[async_trait]
impl MappingStore for PgMappingStore {
    async fn save(&self, mapping: UrlMapping) -> Result<(), AppError> {
        // Insert-only for live rows. An expired row is reclaimed in place so
        // its code can be reused, matching the volatile backend.
        let result = self
            .bounded(
                POINT_OP_TIMEOUT,
                sqlx::query(
                    r#"
                    INSERT INTO url_mappings
                        (code, original_url, user_id, created_at, expires_at, clicks)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    ON CONFLICT (code) DO UPDATE
                        SET original_url = EXCLUDED.original_url,
                            user_id      = EXCLUDED.user_id,
                            created_at   = EXCLUDED.created_at,
                            expires_at   = EXCLUDED.expires_at,
                            clicks       = EXCLUDED.clicks
                        WHERE url_mappings.expires_at IS NOT NULL
                          AND url_mappings.expires_at <= NOW()
                    "#,
                )
                .bind(&mapping.code)
                .bind(&mapping.original_url)
                .bind(&mapping.user_id)
                .bind(mapping.created_at)
                .bind(mapping.expires_at)
                .bind(mapping.clicks)
                .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(
                "Code already exists",
                json!({ "code": mapping.code }),
            ));
        }

        Ok(())
    }

    async fn get(&self, code: &str) -> Result<Option<String>, AppError> {
        // Expiry is evaluated server-side against the database clock.
        self.bounded(
            POINT_OP_TIMEOUT,
            sqlx::query_scalar::<_, String>(
                r#"
                SELECT original_url FROM url_mappings
                WHERE code = $1 AND (expires_at IS NULL OR expires_at > NOW())
                "#,
            )
            .bind(code)
            .fetch_optional(&self.pool),
        )
        .await
    }

    async fn increment_click_count(&self, code: &str) -> Result<(), AppError> {
        let result = self
            .bounded(
                POINT_OP_TIMEOUT,
                sqlx::query("UPDATE url_mappings SET clicks = clicks + 1 WHERE code = $1")
                    .bind(code)
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "code not found",
                json!({ "code": code }),
            ));
        }

        Ok(())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<UrlMapping>, AppError> {
        let rows = self
            .bounded(
                BULK_OP_TIMEOUT,
                sqlx::query_as::<_, MappingRow>(
                    r#"
                    SELECT code, original_url, user_id, created_at, expires_at, clicks
                    FROM url_mappings
                    WHERE user_id = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.into_iter().map(UrlMapping::from).collect())
    }

    async fn delete(&self, code: &str) -> Result<(), AppError> {
        let result = self
            .bounded(
                POINT_OP_TIMEOUT,
                sqlx::query("DELETE FROM url_mappings WHERE code = $1")
                    .bind(code)
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "code not found",
                json!({ "code": code }),
            ));
        }

        Ok(())
    }

    async fn cleanup_expired(&self) -> Result<u64, AppError> {
        let result = self
            .bounded(
                BULK_OP_TIMEOUT,
                sqlx::query(
                    "DELETE FROM url_mappings WHERE expires_at IS NOT NULL AND expires_at <= NOW()",
                )
                .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
