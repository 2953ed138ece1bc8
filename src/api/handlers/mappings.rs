//! Handlers for the mapping management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::mappings::{ListMappingsQuery, ListMappingsResponse, MappingResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every mapping created by one owner.
///
/// # Endpoint
///
/// `GET /api/mappings?user_id=...`
///
/// Returns an empty list for an owner with no mappings. Ordering follows
/// the backend: the durable store returns newest first.
pub async fn list_mappings_handler(
    State(state): State<AppState>,
    Query(query): Query<ListMappingsQuery>,
) -> Result<Json<ListMappingsResponse>, AppError> {
    let mappings = state.shortener.list_mappings(&query.user_id).await?;

    Ok(Json(ListMappingsResponse {
        mappings: mappings.into_iter().map(MappingResponse::from).collect(),
    }))
}

/// Removes a mapping.
///
/// # Endpoint
///
/// `DELETE /api/mappings/{code}`
///
/// # Errors
///
/// Returns 404 Not Found when the code is not stored.
pub async fn delete_mapping_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.shortener.delete(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
