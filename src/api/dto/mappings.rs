//! DTOs for the mapping management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::UrlMapping;

/// Owner filter for the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListMappingsQuery {
    pub user_id: String,
}

/// One mapping as returned by the listing endpoint.
#[derive(Debug, Serialize)]
pub struct MappingResponse {
    pub code: String,
    pub original_url: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: i64,
}

impl From<UrlMapping> for MappingResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            code: mapping.code,
            original_url: mapping.original_url,
            user_id: mapping.user_id,
            created_at: mapping.created_at,
            expires_at: mapping.expires_at,
            clicks: mapping.clicks,
        }
    }
}

/// Envelope for the listing endpoint.
#[derive(Debug, Serialize)]
pub struct ListMappingsResponse {
    pub mappings: Vec<MappingResponse>,
}
