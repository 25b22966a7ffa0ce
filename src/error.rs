// Error handling module for the Market API
// Every handler returns Result<T, ApiError>; module errors convert into it

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

/// Message returned to clients for every unclassified failure
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// HTTP-facing error taxonomy
///
/// Each variant maps to exactly one status code. Module errors
/// (`AuthError`, `CatalogError`, `PurchaseError`) are classified into one of
/// these variants by their `From` impls, so the status mapping lives here only.
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed `validator` rules
    /// Maps to HTTP 400 Bad Request
    ValidationError(validator::ValidationErrors),

    /// Malformed input or a rejected business request
    /// Maps to HTTP 400 Bad Request
    BadRequest(String),

    /// Missing, malformed or expired bearer token
    /// Maps to HTTP 401 Unauthorized
    Unauthorized(String),

    /// Resource not found by ID
    /// Maps to HTTP 404 Not Found
    NotFound { resource: String, id: String },

    /// Uniqueness violation or a state conflict
    /// Maps to HTTP 409 Conflict
    Conflict { message: String },

    /// Store, hashing or signing failure
    /// Maps to HTTP 500; the detail is logged and never sent to the client
    InternalError(String),
}

/// JSON body of every error response: `{"error": "<message>"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to clients, logging at a level matching severity
    fn client_message(&self) -> String {
        match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);
                errors.to_string()
            }
            ApiError::BadRequest(message) => {
                debug!("Bad request: {}", message);
                message.clone()
            }
            ApiError::Unauthorized(message) => {
                warn!("Unauthorized access attempt: {}", message);
                message.clone()
            }
            ApiError::NotFound { resource, id } => {
                debug!("Resource not found: {} with id {}", resource, id);
                format!("{} with id {} not found", resource, id)
            }
            ApiError::Conflict { message } => {
                warn!("Conflict error: {}", message);
                message.clone()
            }
            ApiError::InternalError(detail) => {
                error!("Internal error: {}", detail);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// Convert validator errors to ApiError
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest("invalid request body".to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
