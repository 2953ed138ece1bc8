//! Handler for the shorten endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "userId": "user-1",
///   "url": "https://example.com/some/long/path",
///   "expiresAt": "2026-01-01T00:00:00Z"  // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "https://sho.rt/aB3xYz" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed URL, 500 on storage failure.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let code = state
        .shortener
        .shorten(&payload.user_id, &payload.url, payload.expires_at)
        .await?;

    Ok(Json(ShortenResponse {
        short_url: state.shortener.short_url(&code),
    }))
}
