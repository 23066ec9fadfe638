//! Authentication service
//!
//! Handles registration, login and logout on top of the token service.

use social_common::{hash_password, verify_password, AppError};
use social_core::{DomainError, NewUser, User};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::token::TokenService;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and open a session for them
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;

        if self.ctx.user_repo().username_exists(&request.username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let user = self
            .ctx
            .user_repo()
            .create(&NewUser {
                username: request.username,
                email: request.email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered successfully");

        self.issue(&user, false).await
    }

    /// Login with username or email
    #[instrument(skip(self, request), fields(remember = request.remember))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;

        let user = match (&request.username, &request.email) {
            (Some(username), _) => self.ctx.user_repo().find_by_username(username).await?,
            (None, Some(email)) => self.ctx.user_repo().find_by_email(email).await?,
            (None, None) => {
                return Err(ServiceError::validation("username or email is required"));
            }
        };

        let user = user.ok_or_else(|| {
            warn!("Login failed: unknown account");
            ServiceError::App(AppError::InvalidCredentials)
        })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        verify_password(&request.password, &password_hash).map_err(|e| {
            warn!(user_id = %user.id, "Login failed: invalid password");
            ServiceError::App(e)
        })?;

        info!(user_id = %user.id, "User logged in successfully");

        self.issue(&user, request.remember).await
    }

    /// Revoke the session behind a token
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> ServiceResult<()> {
        TokenService::new(self.ctx).close_session(token).await?;
        info!("User logged out");
        Ok(())
    }

    async fn issue(&self, user: &User, remember: bool) -> ServiceResult<AuthResponse> {
        let issued = TokenService::new(self.ctx)
            .open_session(user.id, remember)
            .await?;

        Ok(AuthResponse::new(
            issued.token,
            issued.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::in_memory_context;
    use crate::services::token::TokenStatus;
    use social_common::JwtService;

    fn register_request(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login_by_email() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let auth = AuthService::new(&ctx);

        let registered = auth.register(register_request("alice")).await.unwrap();
        assert_eq!(registered.user.username, "alice");
        assert_eq!(registered.expires_in, 3600);

        let login = auth
            .login(LoginRequest {
                username: None,
                email: Some("alice@example.com".to_string()),
                password: "password123".to_string(),
                remember: true,
            })
            .await
            .unwrap();
        assert_eq!(login.user.id, registered.user.id);
        assert_eq!(login.expires_in, 7200);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let auth = AuthService::new(&ctx);

        auth.register(register_request("alice")).await.unwrap();
        let mut again = register_request("alice");
        again.email = "other@example.com".to_string();

        let err = auth.register(again).await.unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "USERNAME_ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let auth = AuthService::new(&ctx);
        auth.register(register_request("alice")).await.unwrap();

        let err = auth
            .login(LoginRequest {
                username: Some("alice".to_string()),
                email: None,
                password: "wrong-password".to_string(),
                remember: false,
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.error_code(), "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_login_needs_username_or_email() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let err = AuthService::new(&ctx)
            .login(LoginRequest {
                username: None,
                email: None,
                password: "password123".to_string(),
                remember: false,
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let auth = AuthService::new(&ctx);
        let registered = auth.register(register_request("alice")).await.unwrap();

        auth.logout(&registered.token).await.unwrap();

        let status = TokenService::new(&ctx).confirm_token(&registered.token).await;
        assert_eq!(status, TokenStatus::Invalid);
    }
}
