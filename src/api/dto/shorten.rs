//! DTOs for the shorten endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Opaque creator identifier; recorded as-is, used only for listing.
    #[serde(rename = "userId")]
    pub user_id: String,

    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional expiry timestamp. After this time, the code resolves as
    /// not found.
    #[serde(default, rename = "expiresAt")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Response carrying the full short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}
