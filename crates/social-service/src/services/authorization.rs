//! Authorization predicates
//!
//! Boolean checks consulted by handlers before a request is delegated.
//! Identifiers arrive as raw query-string text; anything that is not an
//! integer makes a predicate false. Storage failures are logged and also
//! count as false, so a predicate never fails the request by itself.

use social_core::Id;
use tracing::{instrument, warn};

use super::context::ServiceContext;
use super::token::TokenService;

/// Authorization predicates over the caller's bearer token
pub struct AuthorizationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthorizationService<'a> {
    /// Create a new AuthorizationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// A token is present and confirmed valid
    pub async fn is_authenticated(&self, token: Option<&str>) -> bool {
        match token {
            Some(token) => TokenService::new(self.ctx).confirm_token(token).await.is_valid(),
            None => false,
        }
    }

    /// User id the token was issued to
    pub fn caller_id(&self, token: Option<&str>) -> Option<Id> {
        token.and_then(|t| TokenService::new(self.ctx).decode_token(t))
    }

    /// The caller is the user named by `raw_user_id`
    pub fn is_caller(&self, token: Option<&str>, raw_user_id: &str) -> bool {
        match (self.caller_id(token), Id::parse(raw_user_id)) {
            (Some(caller), Ok(user_id)) => caller == user_id,
            _ => false,
        }
    }

    /// The caller holds the admin role in the group named by `raw_group_id`
    #[instrument(skip(self, token))]
    pub async fn is_group_admin(&self, token: Option<&str>, raw_group_id: &str) -> bool {
        let Some(caller) = self.caller_id(token) else {
            return false;
        };
        let Ok(group_id) = Id::parse(raw_group_id) else {
            return false;
        };

        match self.ctx.group_repo().find_by_id(group_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return false,
            Err(e) => {
                warn!(error = %e, "Group lookup failed during admin check");
                return false;
            }
        }

        match self.ctx.member_repo().admin_ids(group_id).await {
            Ok(admins) => admins.contains(&caller),
            Err(e) => {
                warn!(error = %e, "Admin lookup failed during admin check");
                false
            }
        }
    }

    /// The caller wrote the comment named by `raw_comment_id`
    #[instrument(skip(self, token))]
    pub async fn is_comment_author(&self, token: Option<&str>, raw_comment_id: &str) -> bool {
        let Some(caller) = self.caller_id(token) else {
            return false;
        };
        let Ok(comment_id) = Id::parse(raw_comment_id) else {
            return false;
        };

        match self.ctx.comment_repo().find_by_id(comment_id).await {
            Ok(Some(comment)) => comment.is_author(caller),
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Comment lookup failed during author check");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::memory::{in_memory_context_with, MemoryStore};
    use social_common::JwtService;
    use social_core::{
        CommentRepository, GroupMember, GroupRepository, MemberRepository, MemberRole,
        NewComment, NewGroup,
    };

    fn jwt() -> JwtService {
        JwtService::new("secret", 3600, 7200)
    }

    async fn token_for(ctx: &ServiceContext, user_id: i64) -> String {
        TokenService::new(ctx)
            .open_session(Id::new(user_id), false)
            .await
            .unwrap()
            .token
    }

    #[tokio::test]
    async fn test_is_caller() {
        let ctx = crate::memory::in_memory_context(jwt());
        let token = token_for(&ctx, 5).await;
        let authz = AuthorizationService::new(&ctx);

        assert!(authz.is_caller(Some(&token), "5"));
        assert!(authz.is_caller(Some(&token), " 5 "));
        assert!(!authz.is_caller(Some(&token), "7"));
        assert!(!authz.is_caller(Some(&token), "five"));
        assert!(!authz.is_caller(None, "5"));
    }

    #[tokio::test]
    async fn test_is_authenticated_requires_live_session() {
        let ctx = crate::memory::in_memory_context(jwt());
        let token = token_for(&ctx, 5).await;
        let authz = AuthorizationService::new(&ctx);

        assert!(authz.is_authenticated(Some(&token)).await);
        assert!(!authz.is_authenticated(None).await);
        assert!(!authz.is_authenticated(Some("not-a-jwt")).await);

        TokenService::new(&ctx).close_session(&token).await.unwrap();
        assert!(!authz.is_authenticated(Some(&token)).await);
    }

    #[tokio::test]
    async fn test_is_group_admin() {
        let store = Arc::new(MemoryStore::new());
        let ctx = in_memory_context_with(store.clone(), jwt());

        let group = GroupRepository::create_with_admin(
            store.as_ref(),
            &NewGroup {
                title: "rust".to_string(),
                description: String::new(),
                private: false,
            },
            Id::new(100),
        )
        .await
        .unwrap();
        MemberRepository::create(
            store.as_ref(),
            &GroupMember::new(group.id, Id::new(101), MemberRole::Member),
        )
        .await
        .unwrap();

        let admin = token_for(&ctx, 100).await;
        let member = token_for(&ctx, 101).await;
        let authz = AuthorizationService::new(&ctx);
        let raw = group.id.to_string();

        assert!(authz.is_group_admin(Some(&admin), &raw).await);
        assert!(!authz.is_group_admin(Some(&member), &raw).await);
        assert!(!authz.is_group_admin(None, &raw).await);
        assert!(!authz.is_group_admin(Some(&admin), "9999").await);
        assert!(!authz.is_group_admin(Some(&admin), "abc").await);
    }

    #[tokio::test]
    async fn test_predicates_degrade_when_storage_fails() {
        let store = Arc::new(MemoryStore::new());
        let ctx = in_memory_context_with(store.clone(), jwt());
        let token = token_for(&ctx, 100).await;

        store.set_unavailable(true);
        let authz = AuthorizationService::new(&ctx);
        assert!(!authz.is_group_admin(Some(&token), "1").await);
        assert!(!authz.is_comment_author(Some(&token), "1").await);
    }

    #[tokio::test]
    async fn test_is_comment_author() {
        let store = Arc::new(MemoryStore::new());
        let ctx = in_memory_context_with(store.clone(), jwt());
        let comment = CommentRepository::create(
            store.as_ref(),
            &NewComment {
                post_id: Id::new(1),
                author_id: Id::new(2),
                content: "hi".to_string(),
            },
        )
        .await
        .unwrap();

        let author = token_for(&ctx, 2).await;
        let other = token_for(&ctx, 3).await;
        let authz = AuthorizationService::new(&ctx);
        let raw = comment.id.to_string();

        assert!(authz.is_comment_author(Some(&author), &raw).await);
        assert!(!authz.is_comment_author(Some(&other), &raw).await);
        assert!(!authz.is_comment_author(Some(&author), "424242").await);
    }
}
