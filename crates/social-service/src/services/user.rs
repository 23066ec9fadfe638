//! User service
//!
//! Handles profile lookups and updates, account deletion and search.

use social_common::hash_password;
use social_core::{DomainError, Id, User};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CurrentUserResponse, PublicUserResponse, UpdateUserRequest, UserIdResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Maximum number of users returned by a search
pub const USER_SEARCH_LIMIT: i64 = 25;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get user by ID (public profile)
    #[instrument(skip(self))]
    pub async fn load_user(&self, user_id: Id) -> ServiceResult<PublicUserResponse> {
        let user = self.get_user_entity(user_id).await?;
        Ok(PublicUserResponse::from(user))
    }

    /// Users whose name contains `term`, excluding the searcher
    #[instrument(skip(self))]
    pub async fn search_user(
        &self,
        term: &str,
        user_id: Id,
    ) -> ServiceResult<Vec<PublicUserResponse>> {
        let users = self
            .ctx
            .user_repo()
            .search(term.trim(), user_id, USER_SEARCH_LIMIT)
            .await?;

        Ok(users.into_iter().map(PublicUserResponse::from).collect())
    }

    /// Update profile fields and, optionally, the password
    #[instrument(skip(self, request))]
    pub async fn update_user_details(
        &self,
        user_id: Id,
        request: UpdateUserRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        request.validate()?;

        let mut user = self.get_user_entity(user_id).await?;
        let password_hash = request.password.as_deref().map(hash_password).transpose()?;
        let mut changed = false;

        if let Some(username) = request.username {
            if username != user.username {
                if self.ctx.user_repo().username_exists(&username).await? {
                    return Err(DomainError::UsernameAlreadyExists.into());
                }
                user.set_username(username);
                changed = true;
            }
        }

        if let Some(email) = request.email {
            if email != user.email {
                if self.ctx.user_repo().email_exists(&email).await? {
                    return Err(DomainError::EmailAlreadyExists.into());
                }
                user.set_email(email);
                changed = true;
            }
        }

        if let Some(bio) = request.bio {
            user.set_bio(bio);
            changed = true;
        }

        if changed {
            self.ctx.user_repo().update(&user).await?;
        }

        if let Some(password_hash) = password_hash {
            self.ctx
                .user_repo()
                .update_password(user_id, &password_hash)
                .await?;
            info!(user_id = %user_id, "Password changed");
        }

        info!(user_id = %user_id, changed, "User profile updated");

        Ok(CurrentUserResponse::from(&user))
    }

    /// Delete user account (soft delete) and close every session
    ///
    /// Refused while the user is the only admin of a group; they have to
    /// promote someone or delete the group first.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: Id) -> ServiceResult<()> {
        for group in self.ctx.group_repo().find_by_user(user_id).await? {
            let admins = self.ctx.member_repo().admin_ids(group.id).await?;
            if admins == [user_id] {
                return Err(DomainError::LastAdmin.into());
            }
        }

        self.ctx.user_repo().delete(user_id).await?;
        let revoked = self
            .ctx
            .session_store()
            .revoke_all_for_user(user_id)
            .await?;

        info!(user_id = %user_id, revoked, "User account deleted");
        Ok(())
    }

    /// Point the profile at a new avatar image
    #[instrument(skip(self))]
    pub async fn update_avatar(&self, user_id: Id, url: &str) -> ServiceResult<CurrentUserResponse> {
        let mut user = self.get_user_entity(user_id).await?;

        let url = url.trim();
        user.set_avatar((!url.is_empty()).then(|| url.to_string()));
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, "Avatar updated");
        Ok(CurrentUserResponse::from(&user))
    }

    /// Resolve a username to its id
    #[instrument(skip(self))]
    pub async fn get_user_id(&self, username: &str) -> ServiceResult<UserIdResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", username))?;

        Ok(UserIdResponse { user_id: user.id })
    }

    /// Get user entity by ID
    pub async fn get_user_entity(&self, user_id: Id) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{CreateGroupRequest, LoginRequest, RegisterRequest};
    use crate::services::GroupService;
    use crate::memory::in_memory_context;
    use crate::services::{AuthService, TokenService, TokenStatus};
    use social_common::JwtService;

    async fn register(ctx: &ServiceContext, username: &str) -> (Id, String) {
        let auth = AuthService::new(ctx)
            .register(RegisterRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "password123".to_string(),
            })
            .await
            .unwrap();
        (auth.user.id, auth.token)
    }

    #[tokio::test]
    async fn test_search_excludes_searcher_and_ignores_case() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let (alice, _) = register(&ctx, "alice").await;
        register(&ctx, "alicia").await;
        register(&ctx, "bob").await;

        let found = UserService::new(&ctx).search_user("ALI", alice).await.unwrap();
        let names: Vec<_> = found.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["alicia"]);
    }

    #[tokio::test]
    async fn test_update_rejects_taken_username() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let (alice, _) = register(&ctx, "alice").await;
        register(&ctx, "bob").await;

        let err = UserService::new(&ctx)
            .update_user_details(
                alice,
                UpdateUserRequest {
                    username: Some("bob".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_update_bio_and_username() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let (alice, _) = register(&ctx, "alice").await;

        let updated = UserService::new(&ctx)
            .update_user_details(
                alice,
                UpdateUserRequest {
                    username: Some("alice2".to_string()),
                    bio: Some("hello".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.username, "alice2");
        assert_eq!(updated.bio, "hello");

        let id = UserService::new(&ctx).get_user_id("alice2").await.unwrap();
        assert_eq!(id.user_id, alice);
        let missing = UserService::new(&ctx).get_user_id("alice").await.unwrap_err();
        assert_eq!(missing.status_code(), 404);
    }

    #[tokio::test]
    async fn test_delete_user_revokes_sessions() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let (alice, token) = register(&ctx, "alice").await;

        UserService::new(&ctx).delete_user(alice).await.unwrap();

        assert_eq!(
            TokenService::new(&ctx).confirm_token(&token).await,
            TokenStatus::Invalid
        );
        let err = UserService::new(&ctx).load_user(alice).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    async fn login(ctx: &ServiceContext, username: &str, password: &str) -> bool {
        AuthService::new(ctx)
            .login(LoginRequest {
                username: Some(username.to_string()),
                email: None,
                password: password.to_string(),
                remember: false,
            })
            .await
            .is_ok()
    }

    #[tokio::test]
    async fn test_update_profile_and_password_together() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let (alice, _) = register(&ctx, "alice").await;

        UserService::new(&ctx)
            .update_user_details(
                alice,
                UpdateUserRequest {
                    username: Some("alice2".to_string()),
                    password: Some("new-password".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(login(&ctx, "alice2", "new-password").await);
        assert!(!login(&ctx, "alice2", "password123").await);
    }

    #[tokio::test]
    async fn test_rejected_update_keeps_password() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let (alice, _) = register(&ctx, "alice").await;
        register(&ctx, "bob").await;

        let err = UserService::new(&ctx)
            .update_user_details(
                alice,
                UpdateUserRequest {
                    username: Some("bob".to_string()),
                    password: Some("new-password".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert!(login(&ctx, "alice", "password123").await);
    }

    #[tokio::test]
    async fn test_sole_admin_cannot_delete_account() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let (alice, _) = register(&ctx, "alice").await;
        let groups = GroupService::new(&ctx);
        let group = groups
            .create_group(
                CreateGroupRequest {
                    title: "club".to_string(),
                    description: String::new(),
                    private: false,
                },
                alice,
            )
            .await
            .unwrap();

        let err = UserService::new(&ctx).delete_user(alice).await.unwrap_err();
        assert_eq!(err.error_code(), "LAST_ADMIN");
        assert!(UserService::new(&ctx).load_user(alice).await.is_ok());

        groups.delete_group(group.id).await.unwrap();
        UserService::new(&ctx).delete_user(alice).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_avatar() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let (alice, _) = register(&ctx, "alice").await;

        let user = UserService::new(&ctx)
            .update_avatar(alice, "https://cdn.example.com/a.png")
            .await
            .unwrap();
        assert_eq!(user.avatar_url.as_deref(), Some("https://cdn.example.com/a.png"));
    }
}
