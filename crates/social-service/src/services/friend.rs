//! Friend service
//!
//! Friend relations are stored once per pair with the requester first.
//! An invite stays pending until the addressee accepts or declines it.

use social_core::{DomainError, Friendship, FriendshipState, Id};
use tracing::{info, instrument, warn};

use crate::dto::{FriendshipResponse, PublicUserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Friend service
pub struct FriendService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FriendService<'a> {
    /// Create a new FriendService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Befriend directly, skipping the invite step
    #[instrument(skip(self))]
    pub async fn add_friend(&self, user_id: Id, friend_id: Id) -> ServiceResult<FriendshipResponse> {
        self.relate(user_id, friend_id, FriendshipState::Accepted).await
    }

    /// Send a pending invite from `user_id` to `friend_id`
    #[instrument(skip(self))]
    pub async fn invite_friend(
        &self,
        user_id: Id,
        friend_id: Id,
    ) -> ServiceResult<FriendshipResponse> {
        self.relate(user_id, friend_id, FriendshipState::Pending).await
    }

    /// Answer the invite `friend_id` sent to `user_id`
    ///
    /// Accepting marks the relation accepted; declining removes it.
    #[instrument(skip(self))]
    pub async fn respond_to_invite(
        &self,
        user_id: Id,
        friend_id: Id,
        accepted: bool,
    ) -> ServiceResult<Option<FriendshipResponse>> {
        let invite = self
            .ctx
            .friendship_repo()
            .find_between(user_id, friend_id)
            .await?
            .filter(|f| f.state == FriendshipState::Pending && f.addressee_id == user_id)
            .ok_or(DomainError::FriendInviteNotFound)?;

        if accepted {
            self.ctx
                .friendship_repo()
                .accept(invite.requester_id, invite.addressee_id)
                .await?;
            info!(user_id = %user_id, friend_id = %friend_id, "Friend invite accepted");

            let friendship = Friendship {
                state: FriendshipState::Accepted,
                ..invite
            };
            Ok(Some(FriendshipResponse::seen_by(&friendship, user_id)))
        } else {
            self.ctx
                .friendship_repo()
                .delete(user_id, friend_id)
                .await?;
            info!(user_id = %user_id, friend_id = %friend_id, "Friend invite declined");
            Ok(None)
        }
    }

    /// Users with a pending invite addressed to `user_id`
    #[instrument(skip(self))]
    pub async fn load_invites(&self, user_id: Id) -> ServiceResult<Vec<PublicUserResponse>> {
        let invites = self.ctx.friendship_repo().find_pending_for(user_id).await?;
        let ids: Vec<Id> = invites.iter().map(|f| f.requester_id).collect();
        self.public_profiles(&ids).await
    }

    /// Accepted friends of `user_id`, in either direction
    #[instrument(skip(self))]
    pub async fn load_friends(&self, user_id: Id) -> ServiceResult<Vec<PublicUserResponse>> {
        let friendships = self.ctx.friendship_repo().find_accepted_for(user_id).await?;
        let ids: Vec<Id> = friendships.iter().map(|f| f.other(user_id)).collect();
        self.public_profiles(&ids).await
    }

    async fn relate(
        &self,
        user_id: Id,
        friend_id: Id,
        state: FriendshipState,
    ) -> ServiceResult<FriendshipResponse> {
        if user_id == friend_id {
            return Err(DomainError::CannotFriendSelf.into());
        }

        // The friend must exist; the requester is the authenticated caller
        if self.ctx.user_repo().find_by_id(friend_id).await?.is_none() {
            return Err(DomainError::UserNotFound(friend_id).into());
        }

        if self
            .ctx
            .friendship_repo()
            .find_between(user_id, friend_id)
            .await?
            .is_some()
        {
            return Err(DomainError::FriendshipExists.into());
        }

        let friendship = Friendship::new(user_id, friend_id, state);
        self.ctx.friendship_repo().create(&friendship).await?;
        info!(user_id = %user_id, friend_id = %friend_id, state = state.as_str(), "Friend relation created");

        Ok(FriendshipResponse::seen_by(&friendship, user_id))
    }

    async fn public_profiles(&self, ids: &[Id]) -> ServiceResult<Vec<PublicUserResponse>> {
        let users = self.ctx.user_repo().find_by_ids(ids).await?;
        if users.len() < ids.len() {
            warn!(
                expected = ids.len(),
                found = users.len(),
                "Skipping friend relations that point at deleted users"
            );
        }
        Ok(users.into_iter().map(PublicUserResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::in_memory_context;
    use social_common::JwtService;
    use social_core::NewUser;

    async fn user(ctx: &ServiceContext, name: &str) -> Id {
        ctx.user_repo()
            .create(&NewUser {
                username: name.to_string(),
                email: format!("{name}@example.com"),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_invite_accept_flow() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let alice = user(&ctx, "alice").await;
        let bob = user(&ctx, "bob").await;
        let friends = FriendService::new(&ctx);

        let invite = friends.invite_friend(alice, bob).await.unwrap();
        assert_eq!(invite.state, "pending");

        let invites = friends.load_invites(bob).await.unwrap();
        assert_eq!(invites.len(), 1);
        assert_eq!(invites[0].id, alice);

        // Only the addressee can answer
        let err = friends.respond_to_invite(alice, bob, true).await.unwrap_err();
        assert_eq!(err.status_code(), 404);

        let accepted = friends.respond_to_invite(bob, alice, true).await.unwrap();
        assert_eq!(accepted.map(|f| f.state).as_deref(), Some("accepted"));

        let alice_friends = friends.load_friends(alice).await.unwrap();
        assert_eq!(alice_friends[0].id, bob);
        assert!(friends.load_invites(bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decline_removes_invite() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let alice = user(&ctx, "alice").await;
        let bob = user(&ctx, "bob").await;
        let friends = FriendService::new(&ctx);

        friends.invite_friend(alice, bob).await.unwrap();
        assert!(friends.respond_to_invite(bob, alice, false).await.unwrap().is_none());
        assert!(friends.load_friends(bob).await.unwrap().is_empty());

        // A fresh invite is possible again
        friends.invite_friend(bob, alice).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_friend_conflicts_and_self() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let alice = user(&ctx, "alice").await;
        let bob = user(&ctx, "bob").await;
        let friends = FriendService::new(&ctx);

        friends.add_friend(alice, bob).await.unwrap();
        assert_eq!(friends.add_friend(bob, alice).await.unwrap_err().status_code(), 409);
        assert_eq!(friends.invite_friend(alice, bob).await.unwrap_err().status_code(), 409);
        assert_eq!(friends.add_friend(alice, alice).await.unwrap_err().status_code(), 400);
    }
}
