//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Accounting
///
/// The resolve enqueues a click event onto a bounded channel before the
/// redirect is returned; the increment itself happens in the background
/// worker. A full queue drops the event, never the redirect.
///
/// # Errors
///
/// Returns 404 Not Found when the code is unknown or expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let original_url = state.shortener.resolve(&code).await?;

    Ok(Redirect::temporary(&original_url))
}
