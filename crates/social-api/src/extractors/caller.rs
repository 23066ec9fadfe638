//! Caller extractor
//!
//! Captures the bearer token, if any, and answers the authorization
//! questions handlers ask before delegating. A missing or malformed
//! `Authorization` header simply means "no token".

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use social_core::Id;
use social_service::AuthorizationService;
use tracing::debug;

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// The bearer token presented with a request
#[derive(Debug, Clone, Default)]
pub struct Caller {
    token: Option<String>,
}

impl Caller {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Require a confirmed token
    pub async fn authenticate(&self, state: &AppState) -> ApiResult<()> {
        let authz = AuthorizationService::new(state.service_context());
        if authz.is_authenticated(self.token()).await {
            Ok(())
        } else {
            debug!(has_token = self.token.is_some(), "Rejected unauthenticated request");
            Err(ApiError::InvalidToken)
        }
    }

    /// Require a confirmed token and return the user it was issued to
    pub async fn user_id(&self, state: &AppState) -> ApiResult<Id> {
        self.authenticate(state).await?;
        AuthorizationService::new(state.service_context())
            .caller_id(self.token())
            .ok_or(ApiError::InvalidToken)
    }

    /// Require a confirmed token belonging to the user named by `raw_user_id`
    pub async fn ensure_is(&self, state: &AppState, raw_user_id: &str) -> ApiResult<Id> {
        self.authenticate(state).await?;
        let authz = AuthorizationService::new(state.service_context());
        if !authz.is_caller(self.token(), raw_user_id) {
            return Err(ApiError::NotPermitted);
        }
        parse_id(raw_user_id, "userId")
    }

    /// Require a confirmed token held by an admin of the group
    pub async fn ensure_group_admin(&self, state: &AppState, raw_group_id: &str) -> ApiResult<Id> {
        self.authenticate(state).await?;
        let authz = AuthorizationService::new(state.service_context());
        if !authz.is_group_admin(self.token(), raw_group_id).await {
            return Err(ApiError::NotPermitted);
        }
        parse_id(raw_group_id, "groupId")
    }

    /// Require a confirmed token held by the comment's author
    pub async fn ensure_comment_author(
        &self,
        state: &AppState,
        raw_comment_id: &str,
    ) -> ApiResult<Id> {
        self.authenticate(state).await?;
        let authz = AuthorizationService::new(state.service_context());
        if !authz.is_comment_author(self.token(), raw_comment_id).await {
            return Err(ApiError::NotPermitted);
        }
        parse_id(raw_comment_id, "commentId")
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string());

        Ok(Self::new(token))
    }
}

fn parse_id(raw: &str, name: &str) -> ApiResult<Id> {
    Id::parse(raw).map_err(|e| ApiError::invalid_request(format!("{name}: {e}")))
}
