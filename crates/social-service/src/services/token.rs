//! Token service
//!
//! Confirms and decodes bearer tokens and opens or closes the sessions
//! backing them. A token is only valid while its session is live.

use social_common::{AppError, Claims, IssuedToken};
use social_core::{Id, Session};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Outcome of confirming a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Valid,
    Invalid,
}

impl TokenStatus {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

/// Token service
pub struct TokenService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TokenService<'a> {
    /// Create a new TokenService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check signature, expiry and that the session is still open
    #[instrument(skip_all)]
    pub async fn confirm_token(&self, token: &str) -> TokenStatus {
        let Some((claims, user_id)) = self.verified_claims(token) else {
            return TokenStatus::Invalid;
        };

        match self.ctx.session_store().get(&claims.sid).await {
            Ok(Some(session)) if session.user_id == user_id => TokenStatus::Valid,
            Ok(_) => {
                debug!(user_id = %user_id, "Token refers to a closed session");
                TokenStatus::Invalid
            }
            Err(e) => {
                warn!(error = %e, "Session lookup failed while confirming token");
                TokenStatus::Invalid
            }
        }
    }

    /// The user a token was issued to, if its signature and expiry verify
    pub fn decode_token(&self, token: &str) -> Option<Id> {
        self.verified_claims(token).map(|(_, user_id)| user_id)
    }

    /// Open a session for a user and sign a token naming it
    #[instrument(skip(self))]
    pub async fn open_session(&self, user_id: Id, remember: bool) -> ServiceResult<IssuedToken> {
        let session_id = Uuid::new_v4().to_string();
        let issued = self.ctx.jwt_service().issue(user_id, &session_id, remember)?;

        let ttl = u64::try_from(issued.expires_in).unwrap_or_default();
        self.ctx
            .session_store()
            .store(&Session::new(session_id, user_id), ttl)
            .await?;

        Ok(issued)
    }

    /// Close the session a token belongs to
    ///
    /// # Errors
    /// `InvalidToken` if the token does not verify
    #[instrument(skip_all)]
    pub async fn close_session(&self, token: &str) -> ServiceResult<bool> {
        let (claims, user_id) = self.verified_claims(token).ok_or(AppError::InvalidToken)?;
        let revoked = self.ctx.session_store().revoke(&claims.sid).await?;
        debug!(user_id = %user_id, revoked, "Session closed");
        Ok(revoked)
    }

    fn verified_claims(&self, token: &str) -> Option<(Claims, Id)> {
        let claims = self
            .ctx
            .jwt_service()
            .decode_token(token)
            .map_err(|e| debug!(error = %e, "Rejected bearer token"))
            .ok()?;
        let user_id = claims.user_id().ok()?;
        Some((claims, user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::in_memory_context;
    use social_common::JwtService;

    #[tokio::test]
    async fn test_open_session_confirms() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let tokens = TokenService::new(&ctx);

        let issued = tokens.open_session(Id::new(5), false).await.unwrap();
        assert_eq!(issued.expires_in, 3600);
        assert_eq!(tokens.confirm_token(&issued.token).await, TokenStatus::Valid);
        assert_eq!(tokens.decode_token(&issued.token), Some(Id::new(5)));
    }

    #[tokio::test]
    async fn test_closed_session_is_invalid() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let tokens = TokenService::new(&ctx);

        let issued = tokens.open_session(Id::new(5), true).await.unwrap();
        assert_eq!(issued.expires_in, 7200);
        assert!(tokens.close_session(&issued.token).await.unwrap());

        assert_eq!(tokens.confirm_token(&issued.token).await, TokenStatus::Invalid);
        // Still decodes; only confirmation consults the session
        assert_eq!(tokens.decode_token(&issued.token), Some(Id::new(5)));
    }

    #[tokio::test]
    async fn test_foreign_token_is_invalid() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let other = JwtService::new("other-secret", 3600, 7200);
        let forged = other.issue(Id::new(1), "sid", false).unwrap();

        let tokens = TokenService::new(&ctx);
        assert_eq!(tokens.confirm_token(&forged.token).await, TokenStatus::Invalid);
        assert_eq!(tokens.decode_token(&forged.token), None);
        assert_eq!(tokens.confirm_token("garbage").await, TokenStatus::Invalid);
    }
}
