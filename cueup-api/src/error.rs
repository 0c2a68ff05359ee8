//! Error Types for the Cueup API
//!
//! This module defines error handling for the API layer:
//! - `ErrorCode` enum categorizing every failure the core can raise
//! - `ApiError` struct for structured error responses
//! - `IntoResponse` implementation for Axum HTTP responses
//!
//! Errors serialize as `{"errorMessage": "...", "context": {...}}` with the
//! HTTP status derived from the error code; `context.field` carries the
//! offending field name for field-level rejections.

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each code maps to one HTTP status. The code itself is not serialized;
/// clients see the status line plus the JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCode {
    // Authentication / authorization (401, 403)
    Unauthorized,
    Forbidden,

    // Request rejections (400)
    InvalidInput,
    /// A score attribute is not permitted by its parent routine.
    InvalidScoreField,
    /// A score submission references a routine that does not exist.
    RoutineForScoreNotFound,

    // Lookup failures (404)
    UserNotFound,
    RoutineNotFound,
    ScoreNotFound,

    // Conflicts (409)
    DuplicateValue,

    // Server errors (500)
    #[default]
    Internal,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,

            ErrorCode::InvalidInput
            | ErrorCode::InvalidScoreField
            | ErrorCode::RoutineForScoreNotFound => StatusCode::BAD_REQUEST,

            ErrorCode::UserNotFound | ErrorCode::RoutineNotFound | ErrorCode::ScoreNotFound => {
                StatusCode::NOT_FOUND
            }

            ErrorCode::DuplicateValue => StatusCode::CONFLICT,

            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response returned by every endpoint on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Error category; determines the HTTP status, not part of the body.
    #[serde(skip)]
    pub code: ErrorCode,

    /// Human-readable error message.
    pub error_message: String,

    /// Optional key/value detail, e.g. `field` for field-level rejections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            error_message: message.into(),
            context: None,
        }
    }

    /// Attach a `field` entry to the error context.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.context
            .get_or_insert_with(BTreeMap::new)
            .insert("field".to_string(), field.into());
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    /// Create an Unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Create a Forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create an InvalidInput error for a missing required field.
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::InvalidInput,
            format!("Required field '{}' is missing", field),
        )
        .with_field(field)
    }

    /// Create an InvalidInput error for an out-of-range field.
    pub fn invalid_range(field: &str, min: impl fmt::Display, max: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidInput,
            format!("Field '{}' must be between {} and {}", field, min, max),
        )
        .with_field(field)
    }

    /// Create a UserNotFound error.
    pub fn user_not_found(user_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::UserNotFound,
            format!("User not found, ID={}", user_id),
        )
    }

    /// Create a RoutineNotFound error.
    pub fn routine_not_found(routine_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::RoutineNotFound,
            format!("Routine not found, ID={}", routine_id),
        )
    }

    /// Create a ScoreNotFound error.
    pub fn score_not_found(score_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ScoreNotFound,
            format!("Score not found, ID={}", score_id),
        )
    }

    /// Create a RoutineForScoreNotFound error: the score submission names a
    /// routine that does not exist, which rejects the write request.
    pub fn routine_for_score_not_found(routine_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::RoutineForScoreNotFound,
            format!("Invalid routine ID {}", routine_id),
        )
    }

    /// Create an InvalidScoreField error naming the rejected field.
    pub fn invalid_score_field(field: &str) -> Self {
        Self::new(
            ErrorCode::InvalidScoreField,
            format!("Field {} on score not allowed with selected routine", field),
        )
        .with_field(field)
    }

    /// Create a DuplicateValue error.
    pub fn duplicate_value() -> Self {
        Self::new(ErrorCode::DuplicateValue, "Duplicate value error")
    }

    /// Create an Internal error.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.error_message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Implement IntoResponse so handlers can return `Err(ApiError)` directly.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Convert store failures into API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => {
                tracing::debug!(field, "unique index rejected insert");
                ApiError::duplicate_value().with_field(field)
            }
        }
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
