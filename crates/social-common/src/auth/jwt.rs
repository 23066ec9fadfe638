//! Bearer token encoding and decoding
//!
//! Tokens are HS256 JWTs whose subject is the user id. Every token names the
//! server-side session it belongs to, so revoking the session revokes the token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use social_core::Id;

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Session the token belongs to
    pub sid: String,
}

impl Claims {
    /// Get the user ID carried in the subject
    ///
    /// # Errors
    /// Returns `AppError::InvalidToken` if the subject is not an integer
    pub fn user_id(&self) -> Result<Id, AppError> {
        Id::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// A freshly signed token and its lifetime in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Signs and verifies bearer tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    remember_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and lifetimes (seconds)
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64, remember_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
            remember_token_expiry,
        }
    }

    /// Lifetime in seconds of a token issued with the given remember flag
    #[must_use]
    pub fn lifetime(&self, remember: bool) -> i64 {
        if remember {
            self.remember_token_expiry
        } else {
            self.access_token_expiry
        }
    }

    /// Issue a token for a user session
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, user_id: Id, session_id: &str, remember: bool) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_in = self.lifetime(remember);

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expires_in)).timestamp(),
            sid: session_id.to_string(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to encode JWT: {e}")))?;

        Ok(IssuedToken { token, expires_in })
    }

    /// Decode and validate a token's signature and expiry
    ///
    /// # Errors
    /// Returns `TokenExpired` or `InvalidToken`
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("remember_token_expiry", &self.remember_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 900, 604_800)
    }

    #[test]
    fn test_issue_and_decode() {
        let service = service();
        let issued = service.issue(Id::new(12345), "session-1", false).unwrap();
        assert_eq!(issued.expires_in, 900);

        let claims = service.decode_token(&issued.token).unwrap();
        assert_eq!(claims.sub, "12345");
        assert_eq!(claims.sid, "session-1");
        assert_eq!(claims.user_id().unwrap(), Id::new(12345));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_remember_uses_long_lifetime() {
        let service = service();
        let issued = service.issue(Id::new(1), "s", true).unwrap();
        assert_eq!(issued.expires_in, 604_800);
        let claims = service.decode_token(&issued.token).unwrap();
        assert!(claims.exp - claims.iat >= 604_800);
    }

    #[test]
    fn test_invalid_token() {
        let result = service().decode_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = service().issue(Id::new(1), "s", false).unwrap();
        let other = JwtService::new("another-secret", 900, 900);
        assert!(matches!(other.decode_token(&issued.token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        // Far enough in the past to exceed the default 60s leeway
        let service = JwtService::new("secret", -3600, -3600);
        let issued = service.issue(Id::new(1), "s", false).unwrap();
        assert!(matches!(service.decode_token(&issued.token), Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_non_integer_subject() {
        let claims = Claims {
            sub: "abc".to_string(),
            iat: 0,
            exp: i64::MAX,
            sid: "s".to_string(),
        };
        assert!(matches!(claims.user_id(), Err(AppError::InvalidToken)));
    }
}
