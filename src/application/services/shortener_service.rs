//! Shortening, resolution, and listing orchestration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use url::Url;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::UrlMapping;
use crate::domain::repositories::MappingStore;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Attempts at generating a non-colliding code before giving up.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Stateless façade composing the code generator, the mapping store, and
/// the asynchronous click accounting side effect.
///
/// The store is a trait object because the backend is chosen at runtime by
/// the configuration-time factory. Click events flow through `click_tx`
/// into [`crate::domain::click_worker::run_click_worker`].
pub struct ShortenerService {
    store: Arc<dyn MappingStore>,
    click_tx: mpsc::Sender<ClickEvent>,
    base_url: String,
    code_length: usize,
}

impl ShortenerService {
    /// Creates a new shortener service.
    ///
    /// `code_length` is validated by configuration to lie within 3-20.
    pub fn new(
        store: Arc<dyn MappingStore>,
        click_tx: mpsc::Sender<ClickEvent>,
        base_url: String,
        code_length: usize,
    ) -> Self {
        Self {
            store,
            click_tx,
            base_url,
            code_length,
        }
    }

    /// Public base URL short links are built from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Shortens `original_url` on behalf of `user_id`.
    ///
    /// Generates a random code of the configured length and saves the
    /// mapping with `created_at = now` and zero clicks. The generator does
    /// not consult the store, so a generated code can collide with a stored
    /// one; on a Conflict from `save` a fresh code is generated, up to
    /// [`MAX_CODE_ATTEMPTS`] times. Any other store error propagates
    /// unchanged and is never retried.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed or non-HTTP(S) URL,
    /// [`AppError::Storage`] on storage failure or retry exhaustion.
    pub async fn shorten(
        &self,
        user_id: &str,
        original_url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<String, AppError> {
        let parsed = Url::parse(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::bad_request(
                "URL scheme must be http or https",
                json!({ "scheme": parsed.scheme() }),
            ));
        }

        info!(url = %original_url, "shortening url");

        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code(self.code_length);
            let mapping = UrlMapping::new(
                code.clone(),
                original_url.to_string(),
                user_id.to_string(),
            )
            .with_expiry(expires_at);

            match self.store.save(mapping).await {
                Ok(()) => return Ok(code),
                Err(e) if e.is_conflict() => {
                    warn!(code = %code, "generated code already taken, retrying");
                }
                Err(e) => {
                    error!(url = %original_url, error = %e, "shorten failed");
                    return Err(e);
                }
            }
        }

        Err(AppError::storage(
            "Failed to generate a unique code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Resolves a short code to its original URL.
    ///
    /// Before returning, dispatches a fire-and-forget click event onto the
    /// accounting channel. The call never waits for the increment; a full
    /// or closed queue drops the event with a warning. The returned URL
    /// therefore reflects the click count *before* this call's own
    /// increment lands.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the code is unknown or expired,
    /// [`AppError::Storage`] on storage failure.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let original_url = self.store.get(code).await.inspect_err(|e| {
            error!(code = %code, error = %e, "resolve failed");
        })?;

        let Some(original_url) = original_url else {
            return Err(AppError::not_found(
                "code not found",
                json!({ "code": code }),
            ));
        };

        if let Err(e) = self.click_tx.try_send(ClickEvent::new(code)) {
            warn!(code = %code, error = %e, "dropping click event");
        }

        Ok(original_url)
    }

    /// Lists every mapping created by `user_id`.
    pub async fn list_mappings(&self, user_id: &str) -> Result<Vec<UrlMapping>, AppError> {
        self.store.list_by_user(user_id).await.inspect_err(|e| {
            error!(user_id = %user_id, error = %e, "list mappings failed");
        })
    }

    /// Removes the mapping for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the code is not stored.
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        self.store.delete(code).await
    }
}
