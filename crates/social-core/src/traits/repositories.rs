//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Identifiers are assigned by storage, so
//! `create` methods take an insert record and return the stored entity.

use async_trait::async_trait;

use crate::entities::{
    Comment, Friendship, Group, GroupMember, JoinRequest, MemberRole, Notification, Post, User,
};
use crate::error::DomainError;
use crate::value_objects::{FeedFilter, Id};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Insert records
// ============================================================================

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewGroup {
    pub title: String,
    pub description: String,
    pub private: bool,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub group_id: Id,
    pub author_id: Id,
    pub title: String,
    pub content: String,
    pub location: String,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: Id,
    pub author_id: Id,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub notified_id: Id,
    pub subject_id: Id,
    pub group_id: Id,
    pub description: String,
    pub kind: String,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Load several users at once (missing ids are skipped)
    async fn find_by_ids(&self, ids: &[Id]) -> RepoResult<Vec<User>>;

    /// Case-insensitive substring search on username
    async fn search(&self, term: &str, exclude: Id, limit: i64) -> RepoResult<Vec<User>>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Update profile fields
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Soft delete a user and drop their group memberships
    async fn delete(&self, id: Id) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Id) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Id, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Friendship Repository
// ============================================================================

#[async_trait]
pub trait FriendshipRepository: Send + Sync {
    /// Relation between two users in either direction
    async fn find_between(&self, a: Id, b: Id) -> RepoResult<Option<Friendship>>;

    /// Store a new relation
    async fn create(&self, friendship: &Friendship) -> RepoResult<()>;

    /// Mark the pending invite from `requester_id` to `addressee_id` accepted
    async fn accept(&self, requester_id: Id, addressee_id: Id) -> RepoResult<()>;

    /// Remove the relation in either direction
    async fn delete(&self, a: Id, b: Id) -> RepoResult<()>;

    /// Pending invites addressed to a user
    async fn find_pending_for(&self, user_id: Id) -> RepoResult<Vec<Friendship>>;

    /// Accepted relations involving a user
    async fn find_accepted_for(&self, user_id: Id) -> RepoResult<Vec<Friendship>>;
}

// ============================================================================
// Group Repository
// ============================================================================

#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find group by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Group>>;

    /// List all groups a user is a member of
    async fn find_by_user(&self, user_id: Id) -> RepoResult<Vec<Group>>;

    /// Case-insensitive substring search on title
    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<Group>>;

    /// Create a group with `admin_id` as its first admin, in one unit of work
    async fn create_with_admin(&self, group: &NewGroup, admin_id: Id) -> RepoResult<Group>;

    /// Update an existing group
    async fn update(&self, group: &Group) -> RepoResult<()>;

    /// Delete a group with its memberships, requests and posts
    async fn delete(&self, id: Id) -> RepoResult<()>;

    /// Number of members whose account is not deleted
    async fn member_count(&self, group_id: Id) -> RepoResult<i64>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by group and user ID
    async fn find(&self, group_id: Id, user_id: Id) -> RepoResult<Option<GroupMember>>;

    /// List all members in a group
    async fn find_by_group(&self, group_id: Id) -> RepoResult<Vec<GroupMember>>;

    /// Ids of non-deleted users holding the admin role in a group
    async fn admin_ids(&self, group_id: Id) -> RepoResult<Vec<Id>>;

    /// Check if user is a member of group
    async fn is_member(&self, group_id: Id, user_id: Id) -> RepoResult<bool>;

    /// Add member to group
    async fn create(&self, member: &GroupMember) -> RepoResult<()>;

    /// Change a member's role
    async fn set_role(&self, group_id: Id, user_id: Id, role: MemberRole) -> RepoResult<()>;

    /// Remove member from group
    async fn delete(&self, group_id: Id, user_id: Id) -> RepoResult<()>;
}

// ============================================================================
// Join Request Repository
// ============================================================================

#[async_trait]
pub trait JoinRequestRepository: Send + Sync {
    /// Find a pending request
    async fn find(&self, group_id: Id, user_id: Id) -> RepoResult<Option<JoinRequest>>;

    /// Pending requests for a group, oldest first
    async fn find_by_group(&self, group_id: Id) -> RepoResult<Vec<JoinRequest>>;

    /// Record a request
    async fn create(&self, group_id: Id, user_id: Id) -> RepoResult<()>;

    /// Drop a request
    async fn delete(&self, group_id: Id, user_id: Id) -> RepoResult<()>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Post>>;

    /// Posts in a group, newest first
    async fn find_by_group(&self, group_id: Id, limit: i64) -> RepoResult<Vec<Post>>;

    /// Posts matching a feed filter, newest first, restricted to public
    /// groups and groups the filter's viewer belongs to
    async fn find_feed(&self, filter: &FeedFilter, limit: i64) -> RepoResult<Vec<Post>>;

    /// Create a new post
    async fn create(&self, post: &NewPost) -> RepoResult<Post>;

    /// Update title and content
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post with its comments and likes
    async fn delete(&self, id: Id) -> RepoResult<()>;

    /// Add a like; returns false if it already existed
    async fn add_like(&self, post_id: Id, user_id: Id) -> RepoResult<bool>;

    /// Remove a like; returns false if there was none
    async fn remove_like(&self, post_id: Id, user_id: Id) -> RepoResult<bool>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Comment>>;

    /// Comments on a post, oldest first
    async fn find_by_post(&self, post_id: Id) -> RepoResult<Vec<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment>;

    /// Update comment content
    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment
    async fn delete(&self, id: Id) -> RepoResult<()>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Find notification by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Notification>>;

    /// Notifications for a user, newest first
    async fn find_by_user(&self, user_id: Id) -> RepoResult<Vec<Notification>>;

    /// Create a new notification
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification>;

    /// Persist the read flag
    async fn update(&self, notification: &Notification) -> RepoResult<()>;

    /// Delete a notification
    async fn delete(&self, id: Id) -> RepoResult<()>;
}
