//! Service layer error type
//!
//! Resource services fail with a domain rule, an application error, a
//! missing row or a validation failure. Each maps to an HTTP status and a
//! stable code; the API passes both through unchanged.

use social_common::{domain_status, AppError, ErrorResponse};
use social_core::DomainError;
use std::fmt;

#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or storage failure
    Domain(DomainError),

    /// Credentials, tokens, configuration
    App(AppError),

    /// Lookup by a natural key (not an id) found nothing
    NotFound { resource: &'static str, key: String },

    /// Request fields failed validation
    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, key } => write!(f, "{resource} not found: {key}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            Self::NotFound { .. } | Self::Validation(_) => None,
        }
    }
}

impl ServiceError {
    pub fn not_found(resource: &'static str, key: impl fmt::Display) -> Self {
        Self::NotFound {
            resource,
            key: key.to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
        }
    }

    /// Machine-readable code sent with the reason
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        // Storage details never leave the server
        let reason = if err.is_server_error() {
            "Internal server error".to_string()
        } else {
            err.to_string()
        };
        ErrorResponse::reason(reason).with_code(err.error_code())
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use social_core::Id;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("User", "ghost");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "User not found: ghost");
    }

    #[test]
    fn test_domain_error_status() {
        assert_eq!(ServiceError::from(DomainError::AlreadyLiked).status_code(), 409);
        assert_eq!(ServiceError::from(DomainError::PrivateGroup).status_code(), 403);
        assert_eq!(
            ServiceError::from(DomainError::PostNotFound(Id::new(3))).error_code(),
            "UNKNOWN_POST"
        );
    }

    #[test]
    fn test_credentials_error_is_unauthorized() {
        let err = ServiceError::from(AppError::InvalidCredentials);
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.error_code(), "INVALID_CREDENTIALS");
    }

    #[test]
    fn test_server_error_body_hides_detail() {
        let err = ServiceError::from(DomainError::DatabaseError("connection reset".to_string()));
        let body = ErrorResponse::from(&err);
        assert_eq!(body.reason, "Internal server error");
        assert_eq!(body.code.as_deref(), Some("DATABASE_ERROR"));
    }

    #[test]
    fn test_client_error_body_keeps_message() {
        let err = ServiceError::validation("at least one of username or email is required");
        let body = ErrorResponse::from(&err);
        assert_eq!(
            body.reason,
            "Validation error: at least one of username or email is required"
        );
        assert_eq!(body.code.as_deref(), Some("VALIDATION_ERROR"));
    }
}
