//! Group service
//!
//! Groups, their member rosters and pending join requests. Every group
//! keeps at least one admin, and a private group is entered only through
//! an accepted join request.

use std::collections::HashMap;

use social_core::{
    DomainError, Group, GroupMember, Id, JoinRequest, MemberRole, NewGroup, User,
};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    CreateGroupRequest, GroupResponse, GroupSearchResponse, GroupWithCountsResponse,
    JoinRequestResponse, MemberResponse, PostResponse, PostView, UpdateGroupRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Maximum number of groups returned by a search
pub const GROUP_SEARCH_LIMIT: i64 = 25;

/// Maximum number of posts returned for one group
pub const GROUP_POSTS_LIMIT: i64 = 50;

/// Group service
pub struct GroupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GroupService<'a> {
    /// Create a new GroupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Groups a user belongs to, most recently joined first
    #[instrument(skip(self))]
    pub async fn get_users_groups(&self, user_id: Id) -> ServiceResult<Vec<GroupResponse>> {
        let groups = self.ctx.group_repo().find_by_user(user_id).await?;
        Ok(groups.into_iter().map(GroupResponse::from).collect())
    }

    /// Group details with member count and admin ids
    #[instrument(skip(self))]
    pub async fn load_group(&self, group_id: Id) -> ServiceResult<GroupWithCountsResponse> {
        let group = self.get_group_entity(group_id).await?;
        let member_count = self.ctx.group_repo().member_count(group_id).await?;
        let admin_ids = self.ctx.member_repo().admin_ids(group_id).await?;

        Ok(GroupWithCountsResponse {
            group: GroupResponse::from(group),
            member_count,
            admin_ids,
        })
    }

    /// Create a group; the creator becomes its first admin
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_group(
        &self,
        request: CreateGroupRequest,
        user_id: Id,
    ) -> ServiceResult<GroupResponse> {
        request.validate()?;
        self.get_user(user_id).await?;

        let group = self
            .ctx
            .group_repo()
            .create_with_admin(
                &NewGroup {
                    title: request.title,
                    description: request.description,
                    private: request.private,
                },
                user_id,
            )
            .await?;

        info!(group_id = %group.id, user_id = %user_id, private = group.private, "Group created");

        Ok(GroupResponse::from(group))
    }

    /// Delete a group with everything posted in it
    #[instrument(skip(self))]
    pub async fn delete_group(&self, group_id: Id) -> ServiceResult<()> {
        self.ctx.group_repo().delete(group_id).await?;
        info!(group_id = %group_id, "Group deleted");
        Ok(())
    }

    /// Replace title, description and privacy
    #[instrument(skip(self, request))]
    pub async fn edit_group(
        &self,
        group_id: Id,
        request: UpdateGroupRequest,
    ) -> ServiceResult<GroupResponse> {
        request.validate()?;

        let mut group = self.get_group_entity(group_id).await?;
        group.edit(request.title, request.description, request.private);
        self.ctx.group_repo().update(&group).await?;

        info!(group_id = %group_id, "Group updated");
        Ok(GroupResponse::from(group))
    }

    /// Join a public group
    #[instrument(skip(self))]
    pub async fn join_group(&self, group_id: Id, user_id: Id) -> ServiceResult<MemberResponse> {
        let group = self.get_group_entity(group_id).await?;
        if group.private {
            return Err(DomainError::PrivateGroup.into());
        }

        let user = self.get_user(user_id).await?;
        let member = GroupMember::new(group_id, user_id, MemberRole::Member);
        self.ctx.member_repo().create(&member).await?;

        info!(group_id = %group_id, user_id = %user_id, "Joined group");
        Ok(member_response(&member, &user))
    }

    /// Leave a group; the last admin has to promote someone first
    #[instrument(skip(self))]
    pub async fn leave_group(&self, group_id: Id, user_id: Id) -> ServiceResult<()> {
        let member = self.get_member(group_id, user_id).await?;
        if member.is_admin() {
            self.ensure_not_last_admin(group_id, user_id).await?;
        }

        self.ctx.member_repo().delete(group_id, user_id).await?;
        info!(group_id = %group_id, user_id = %user_id, "Left group");
        Ok(())
    }

    /// Groups whose title contains `term`, flagged with the searcher's membership
    #[instrument(skip(self))]
    pub async fn search_groups(
        &self,
        term: &str,
        user_id: Id,
    ) -> ServiceResult<Vec<GroupSearchResponse>> {
        let groups = self
            .ctx
            .group_repo()
            .search(term.trim(), GROUP_SEARCH_LIMIT)
            .await?;

        let mut results = Vec::with_capacity(groups.len());
        for group in groups {
            let is_member = self.ctx.member_repo().is_member(group.id, user_id).await?;
            results.push(GroupSearchResponse {
                group: GroupResponse::from(group),
                is_member,
            });
        }
        Ok(results)
    }

    /// Newest posts of a group; private groups only show them to members
    #[instrument(skip(self))]
    pub async fn load_group_posts(
        &self,
        group_id: Id,
        user_id: Id,
    ) -> ServiceResult<Vec<PostResponse>> {
        let group = self.get_group_entity(group_id).await?;
        if group.private && !self.ctx.member_repo().is_member(group_id, user_id).await? {
            return Err(DomainError::NotGroupMember.into());
        }

        let posts = self
            .ctx
            .post_repo()
            .find_by_group(group_id, GROUP_POSTS_LIMIT)
            .await?;

        Ok(posts
            .iter()
            .map(|post| {
                PostResponse::from(PostView {
                    post,
                    viewer: Some(user_id),
                })
            })
            .collect())
    }

    /// Member roster with usernames
    #[instrument(skip(self))]
    pub async fn load_group_members(&self, group_id: Id) -> ServiceResult<Vec<MemberResponse>> {
        self.get_group_entity(group_id).await?;

        let members = self.ctx.member_repo().find_by_group(group_id).await?;
        let ids: Vec<Id> = members.iter().map(|m| m.user_id).collect();
        let users = self.users_by_id(&ids).await?;

        Ok(members
            .iter()
            .filter_map(|m| match users.get(&m.user_id) {
                Some(user) => Some(member_response(m, user)),
                None => {
                    warn!(group_id = %group_id, user_id = %m.user_id, "Skipping member without a user");
                    None
                }
            })
            .collect())
    }

    /// Give a member the admin role
    #[instrument(skip(self))]
    pub async fn promote_member(
        &self,
        group_id: Id,
        user_id: Id,
        promote_id: Id,
    ) -> ServiceResult<MemberResponse> {
        self.set_role(group_id, user_id, promote_id, MemberRole::Admin)
            .await
    }

    /// Take the admin role away, unless it is the group's last admin
    #[instrument(skip(self))]
    pub async fn demote_member(
        &self,
        group_id: Id,
        user_id: Id,
        demote_id: Id,
    ) -> ServiceResult<MemberResponse> {
        let target = self.get_member(group_id, demote_id).await?;
        if target.is_admin() {
            self.ensure_not_last_admin(group_id, demote_id).await?;
        }
        self.set_role(group_id, user_id, demote_id, MemberRole::Member)
            .await
    }

    /// Pending join requests, oldest first
    #[instrument(skip(self))]
    pub async fn load_join_request(&self, group_id: Id) -> ServiceResult<Vec<JoinRequestResponse>> {
        self.get_group_entity(group_id).await?;

        let requests = self.ctx.join_request_repo().find_by_group(group_id).await?;
        let ids: Vec<Id> = requests.iter().map(|r| r.user_id).collect();
        let users = self.users_by_id(&ids).await?;

        Ok(requests
            .iter()
            .filter_map(|r| {
                let user = users.get(&r.user_id);
                if user.is_none() {
                    warn!(group_id = %group_id, user_id = %r.user_id, "Skipping join request without a user");
                }
                user.map(|u| join_request_response(r, u))
            })
            .collect())
    }

    /// Ask to be let into a group
    #[instrument(skip(self))]
    pub async fn request_group_invite(
        &self,
        group_id: Id,
        user_id: Id,
    ) -> ServiceResult<JoinRequestResponse> {
        self.get_group_entity(group_id).await?;
        if self.ctx.member_repo().is_member(group_id, user_id).await? {
            return Err(DomainError::AlreadyMember.into());
        }

        let user = self.get_user(user_id).await?;
        self.ctx.join_request_repo().create(group_id, user_id).await?;

        let request = self
            .ctx
            .join_request_repo()
            .find(group_id, user_id)
            .await?
            .ok_or(DomainError::JoinRequestNotFound)?;

        info!(group_id = %group_id, user_id = %user_id, "Join request sent");
        Ok(join_request_response(&request, &user))
    }

    /// Turn a pending request into a membership
    #[instrument(skip(self))]
    pub async fn accept_join_request(
        &self,
        group_id: Id,
        user_id: Id,
    ) -> ServiceResult<MemberResponse> {
        let user = self.get_user(user_id).await?;
        self.ctx.join_request_repo().delete(group_id, user_id).await?;

        let member = GroupMember::new(group_id, user_id, MemberRole::Member);
        self.ctx.member_repo().create(&member).await?;

        info!(group_id = %group_id, user_id = %user_id, "Join request accepted");
        Ok(member_response(&member, &user))
    }

    /// Drop a pending request
    #[instrument(skip(self))]
    pub async fn decline_join_request(&self, group_id: Id, user_id: Id) -> ServiceResult<()> {
        self.ctx.join_request_repo().delete(group_id, user_id).await?;
        info!(group_id = %group_id, user_id = %user_id, "Join request declined");
        Ok(())
    }

    /// Get group entity by ID
    pub async fn get_group_entity(&self, group_id: Id) -> ServiceResult<Group> {
        Ok(self
            .ctx
            .group_repo()
            .find_by_id(group_id)
            .await?
            .ok_or(DomainError::GroupNotFound(group_id))?)
    }

    async fn set_role(
        &self,
        group_id: Id,
        user_id: Id,
        target_id: Id,
        role: MemberRole,
    ) -> ServiceResult<MemberResponse> {
        let mut member = self.get_member(group_id, target_id).await?;
        let user = self.get_user(target_id).await?;

        if member.role != role {
            self.ctx
                .member_repo()
                .set_role(group_id, target_id, role)
                .await?;
            member.role = role;
        }

        info!(
            group_id = %group_id,
            by = %user_id,
            target = %target_id,
            role = role.as_str(),
            "Member role changed"
        );
        Ok(member_response(&member, &user))
    }

    async fn ensure_not_last_admin(&self, group_id: Id, user_id: Id) -> ServiceResult<()> {
        let admins = self.ctx.member_repo().admin_ids(group_id).await?;
        if admins.iter().all(|id| *id == user_id) {
            return Err(DomainError::LastAdmin.into());
        }
        Ok(())
    }

    async fn get_member(&self, group_id: Id, user_id: Id) -> ServiceResult<GroupMember> {
        Ok(self
            .ctx
            .member_repo()
            .find(group_id, user_id)
            .await?
            .ok_or(DomainError::MemberNotFound)?)
    }

    async fn get_user(&self, user_id: Id) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }

    async fn users_by_id(&self, ids: &[Id]) -> ServiceResult<HashMap<Id, User>> {
        let users = self.ctx.user_repo().find_by_ids(ids).await?;
        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}

fn member_response(member: &GroupMember, user: &User) -> MemberResponse {
    MemberResponse {
        user_id: member.user_id,
        username: user.username.clone(),
        role: member.role.as_str().to_string(),
        joined_at: member.joined_at,
    }
}

fn join_request_response(request: &JoinRequest, user: &User) -> JoinRequestResponse {
    JoinRequestResponse {
        group_id: request.group_id,
        user_id: request.user_id,
        username: user.username.clone(),
        requested_at: request.requested_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::in_memory_context;
    use social_common::JwtService;
    use social_core::NewUser;

    fn ctx() -> ServiceContext {
        in_memory_context(JwtService::new("secret", 3600, 7200))
    }

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

    fn group_request(title: &str, private: bool) -> CreateGroupRequest {
        CreateGroupRequest {
            title: title.to_string(),
            description: "a group".to_string(),
            private,
        }
    }

    #[tokio::test]
    async fn test_creator_is_admin() {
        let ctx = ctx();
        let alice = user(&ctx, "alice").await;
        let groups = GroupService::new(&ctx);

        let group = groups.create_group(group_request("Hikers", false), alice).await.unwrap();
        assert!(!group.private);

        let loaded = groups.load_group(group.id).await.unwrap();
        assert_eq!(loaded.member_count, 1);
        assert_eq!(loaded.admin_ids, vec![alice]);

        let mine = groups.get_users_groups(alice).await.unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn test_private_group_needs_join_request() {
        let ctx = ctx();
        let alice = user(&ctx, "alice").await;
        let bob = user(&ctx, "bob").await;
        let groups = GroupService::new(&ctx);
        let group = groups.create_group(group_request("Secret", true), alice).await.unwrap();

        let err = groups.join_group(group.id, bob).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        let err = groups.load_group_posts(group.id, bob).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        groups.request_group_invite(group.id, bob).await.unwrap();
        let dup = groups.request_group_invite(group.id, bob).await.unwrap_err();
        assert_eq!(dup.status_code(), 409);

        let pending = groups.load_join_request(group.id).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].username, "bob");

        let member = groups.accept_join_request(group.id, bob).await.unwrap();
        assert_eq!(member.role, "member");
        assert!(groups.load_join_request(group.id).await.unwrap().is_empty());
        assert!(groups.load_group_posts(group.id, bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_last_admin_cannot_leave_or_be_demoted() {
        let ctx = ctx();
        let alice = user(&ctx, "alice").await;
        let bob = user(&ctx, "bob").await;
        let groups = GroupService::new(&ctx);
        let group = groups.create_group(group_request("Hikers", false), alice).await.unwrap();
        groups.join_group(group.id, bob).await.unwrap();

        assert_eq!(groups.leave_group(group.id, alice).await.unwrap_err().status_code(), 409);
        assert_eq!(
            groups.demote_member(group.id, alice, alice).await.unwrap_err().status_code(),
            409
        );

        let promoted = groups.promote_member(group.id, alice, bob).await.unwrap();
        assert_eq!(promoted.role, "admin");

        groups.leave_group(group.id, alice).await.unwrap();
        let loaded = groups.load_group(group.id).await.unwrap();
        assert_eq!(loaded.admin_ids, vec![bob]);
    }

    #[tokio::test]
    async fn test_search_flags_membership() {
        let ctx = ctx();
        let alice = user(&ctx, "alice").await;
        let bob = user(&ctx, "bob").await;
        let groups = GroupService::new(&ctx);
        groups.create_group(group_request("Rust Users", false), alice).await.unwrap();
        groups.create_group(group_request("rustaceans", false), bob).await.unwrap();
        groups.create_group(group_request("Gophers", false), bob).await.unwrap();

        let found = groups.search_groups("rust", alice).await.unwrap();
        assert_eq!(found.len(), 2);
        let membership: Vec<(String, bool)> = found
            .into_iter()
            .map(|g| (g.group.title, g.is_member))
            .collect();
        assert!(membership.contains(&("Rust Users".to_string(), true)));
        assert!(membership.contains(&("rustaceans".to_string(), false)));
    }

    #[tokio::test]
    async fn test_edit_and_delete_group() {
        let ctx = ctx();
        let alice = user(&ctx, "alice").await;
        let groups = GroupService::new(&ctx);
        let group = groups.create_group(group_request("Hikers", false), alice).await.unwrap();

        let edited = groups
            .edit_group(
                group.id,
                UpdateGroupRequest {
                    title: "Hikers UK".to_string(),
                    description: "Weekend walks".to_string(),
                    private: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.title, "Hikers UK");
        assert!(edited.private);

        groups.delete_group(group.id).await.unwrap();
        assert_eq!(groups.load_group(group.id).await.unwrap_err().status_code(), 404);
        assert!(groups.get_users_groups(alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_members_listing() {
        let ctx = ctx();
        let alice = user(&ctx, "alice").await;
        let bob = user(&ctx, "bob").await;
        let groups = GroupService::new(&ctx);
        let group = groups.create_group(group_request("Hikers", false), alice).await.unwrap();
        groups.join_group(group.id, bob).await.unwrap();
        assert_eq!(groups.join_group(group.id, bob).await.unwrap_err().status_code(), 409);

        let members = groups.load_group_members(group.id).await.unwrap();
        let names: Vec<_> = members.iter().map(|m| m.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }
}
