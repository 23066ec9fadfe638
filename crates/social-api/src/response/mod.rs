//! Response types and error handling for API endpoints
//!
//! Every failure leaves the server as `{"reason": ...}`, optionally with a
//! machine-readable `code` and a `detail`. Bodies are built per response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use social_common::{AppError, ErrorResponse};
use social_service::ServiceError;
use thiserror::Error;
use tracing::error;

/// Reason sent with every 400 produced at the boundary
pub const INVALID_REQUEST_REASON: &str = "Invalid Request";

/// Reason sent with every 401 produced at the boundary
pub const INVALID_TOKEN_REASON: &str = "Invalid token";

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required parameter is missing or malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No token, or one that does not confirm
    #[error("Invalid token")]
    InvalidToken,

    /// The token is valid but a predicate refused the caller
    #[error("Not permitted")]
    NotPermitted,

    /// Failure reported by a resource service, passed through unchanged
    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            // Both authentication and permission failures answer 401
            Self::InvalidToken | Self::NotPermitted => StatusCode::UNAUTHORIZED,
            Self::Service(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::InvalidRequest(detail.into())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    fn body(&self) -> ErrorResponse {
        match self {
            Self::InvalidRequest(detail) => {
                ErrorResponse::reason(INVALID_REQUEST_REASON).with_detail(detail.clone())
            }
            Self::InvalidToken | Self::NotPermitted => ErrorResponse::reason(INVALID_TOKEN_REASON),
            Self::Service(e) => ErrorResponse::from(e),
            Self::Internal(_) => ErrorResponse::reason("Internal server error").with_code("INTERNAL_ERROR"),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::Service(ServiceError::App(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        (status, Json(self.body())).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

/// No content response (204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
