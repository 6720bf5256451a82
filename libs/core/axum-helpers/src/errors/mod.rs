pub mod codes;
pub mod handlers;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer, ser::SerializeMap};
use thiserror::Error;
use utoipa::ToSchema;

/// Ordered field-level validation violations.
///
/// A `Vec` rather than a map so the order violations were collected in
/// survives serialization (`serde_json` maps would sort the keys).
pub type FieldErrors = Vec<(String, Vec<String>)>;

/// A classified, immutable description of why an operation could not
/// complete.
///
/// This single tagged type replaces a per-resource exception zoo: every
/// domain rule violation is raised as an `AppError` carrying exactly one
/// [`ErrorCode`], and [`translate`] is the only place a failure becomes a
/// wire payload.
///
/// The rendered status usually follows the code's registry classification,
/// but constructors may pin a different one — conflicts raised through
/// [`AppError::bad_request_with`] render as 400 while keeping their distinct
/// wire codes.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub status: StatusCode,
    /// Raw underlying error text for unclassified failures. Never surfaced
    /// as the primary message.
    pub details: Option<String>,
    pub validation_errors: Option<FieldErrors>,
}

impl AppError {
    /// Generic application failure; the message overrides the registry
    /// default.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: code.status(),
            details: None,
            validation_errors: None,
        }
    }

    /// Absence failure with the standard message shape.
    pub fn not_found(
        resource: &str,
        field: &str,
        value: impl std::fmt::Display,
    ) -> Self {
        Self {
            code: ErrorCode::ResourceNotFound,
            message: format!("{} not found with {}: '{}'", resource, field, value),
            status: StatusCode::NOT_FOUND,
            details: None,
            validation_errors: None,
        }
    }

    /// Client-input failure classified as plain bad-request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::bad_request_with(ErrorCode::BadRequest, message)
    }

    /// Client-input failure with a more specific kind (e.g. a duplicate
    /// username). Always renders under 400 regardless of the kind's
    /// registry status.
    pub fn bad_request_with(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
            details: None,
            validation_errors: None,
        }
    }

    /// Aggregated field-level validation failure. Classified as
    /// validation-error regardless of what the individual violations are.
    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            code: ErrorCode::ValidationError,
            message: "Validation failed".to_string(),
            status: StatusCode::BAD_REQUEST,
            details: None,
            validation_errors: Some(errors),
        }
    }

    /// Unclassified runtime error. The raw message goes into the details
    /// slot so internals never leak into the stable message.
    pub fn internal(source: impl std::fmt::Display) -> Self {
        Self {
            code: ErrorCode::InternalServerError,
            message: "An unexpected error occurred".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            details: Some(source.to_string()),
            validation_errors: None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Standard error payload returned for every failed request.
///
/// # JSON Example
///
/// ```json
/// {
///   "success": false,
///   "errorCode": "USER_002",
///   "message": "Username already exists",
///   "timestamp": "2025-01-01T00:00:00Z",
///   "path": "/api/v1/users"
/// }
/// ```
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Stable taxonomy code (e.g. "USER_002"), not the HTTP status
    pub error_code: String,
    /// Human-readable error message
    pub message: String,
    /// Raw underlying error text for unclassified failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Server-side time the failure was translated
    pub timestamp: DateTime<Utc>,
    /// Request path, supplied by the caller context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Field name to ordered violation messages
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_field_errors"
    )]
    #[schema(value_type = Option<std::collections::BTreeMap<String, Vec<String>>>)]
    pub validation_errors: Option<FieldErrors>,
}

fn serialize_field_errors<S: Serializer>(
    errors: &Option<FieldErrors>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    // skip_serializing_if means this only runs for Some
    let errors = errors.as_deref().unwrap_or_default();
    let mut map = serializer.serialize_map(Some(errors.len()))?;
    for (field, messages) in errors {
        map.serialize_entry(field, messages)?;
    }
    map.end()
}

/// Translate a failure into the wire payload.
///
/// Pure given its inputs (plus the server clock); performs no I/O and never
/// fails. The request path is supplied by the caller context — the
/// translator does not derive it.
pub fn translate(failure: &AppError, path: Option<&str>) -> ErrorResponse {
    ErrorResponse {
        success: false,
        error_code: failure.code.as_str().to_string(),
        message: failure.message.clone(),
        details: failure.details.clone(),
        timestamp: Utc::now(),
        path: path.map(|p| p.to_string()),
        validation_errors: failure.validation_errors.clone(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                error_code = self.code.as_str(),
                details = self.details.as_deref(),
                "{}",
                self.message
            );
        } else {
            tracing::info!(error_code = self.code.as_str(), "{}", self.message);
        }

        let status = self.status;
        let body = Json(translate(&self, None));
        let mut response = (status, body).into_response();
        // Stashed for the request-path middleware, which re-renders the
        // body with the path slot filled in.
        response.extensions_mut().insert(self);
        response
    }
}
