//! Gateway error taxonomy
//!
//! Every failure in the request pipeline is converted to exactly one of
//! these variants before a byte is written. The status mapping lives here
//! and nowhere else.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// A single field-level validation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Gateway errors
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    // ==================
    // Client errors (4xx)
    // ==================
    /// Request body is not parseable JSON
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    /// Request shape violates field constraints
    #[error("Request validation failed")]
    ValidationFailed(Vec<FieldIssue>),

    /// Requested loader is not registered
    #[error("Unsupported loader '{0}'")]
    UnknownLoader(String),

    /// Row limit below zero
    #[error("limit must be non-negative")]
    NegativeLimit,

    /// Supplied parameters do not match the loader's declaration
    #[error("Invalid parameters for loader: {0}")]
    InvalidParams(String),

    // ==================
    // Server errors (5xx)
    // ==================
    /// Loader body failed; detail is reported, never a backtrace
    #[error("Loader execution failed")]
    LoaderFailed { detail: String },
}

impl GatewayError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            GatewayError::NegativeLimit => StatusCode::BAD_REQUEST,
            GatewayError::InvalidParams(_) => StatusCode::BAD_REQUEST,

            GatewayError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,

            GatewayError::UnknownLoader(_) => StatusCode::NOT_FOUND,

            GatewayError::LoaderFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
///
/// Never merged with a success payload; `detail` and `field_errors` are
/// emitted only for the variants that carry them.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldIssue>>,
}

impl ErrorBody {
    /// A bare error message with no detail or field errors.
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
            field_errors: None,
        }
    }

    /// Build the body for a gateway error.
    pub fn from_error(err: &GatewayError) -> Self {
        match err {
            GatewayError::ValidationFailed(issues) => Self {
                error: err.to_string(),
                detail: None,
                field_errors: Some(issues.clone()),
            },
            GatewayError::LoaderFailed { detail } => Self {
                error: err.to_string(),
                detail: Some(detail.clone()),
                field_errors: None,
            },
            _ => Self::message(err.to_string()),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody::from_error(&self));
        (status, body).into_response()
    }
}
