use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Wire representation of an error, embedded in every error response.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application-level error taxonomy.
///
/// - `Validation` - malformed input (bad URL, bad request body)
/// - `NotFound` - the target code is unknown or expired
/// - `Conflict` - a generated or stored code is already taken
/// - `Storage` - I/O, timeout, pool, or migration failure; never retried
/// - `UnsupportedBackend` - unrecognized or unimplemented backend selector,
///   fatal at store construction time
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Storage { message: String, details: Value },
    UnsupportedBackend { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }
    pub fn unsupported_backend(message: impl Into<String>, details: Value) -> Self {
        Self::UnsupportedBackend {
            message: message.into(),
            details,
        }
    }

    /// Returns true for the NotFound variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for the Conflict variant.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Storage { message, details } => ("storage_error", message, details),
            AppError::UnsupportedBackend { message, details } => {
                ("unsupported_backend", message, details)
            }
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (kind, message) = match self {
            AppError::Validation { message, .. } => ("validation error", message),
            AppError::NotFound { message, .. } => ("not found", message),
            AppError::Conflict { message, .. } => ("conflict", message),
            AppError::Storage { message, .. } => ("storage error", message),
            AppError::UnsupportedBackend { message, .. } => ("unsupported backend", message),
        };
        write!(f, "{kind}: {message}")
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            // UnsupportedBackend aborts startup and never reaches a handler;
            // map it to 500 anyway so the conversion is total.
            AppError::Storage { .. } | AppError::UnsupportedBackend { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&errors).unwrap_or_else(|_| json!({})),
        )
    }
}

/// Maps a sqlx error onto the application taxonomy.
///
/// Unique-constraint violations become `Conflict` so the orchestrator can
/// retry code generation; everything else is a `Storage` error.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    AppError::storage("Database error", json!({ "source": e.to_string() }))
}
