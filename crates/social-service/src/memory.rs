//! In-memory stores
//!
//! One [`MemoryStore`] implements every repository trait and the session
//! store, so a whole [`ServiceContext`] can run without PostgreSQL or Redis.
//! Intended for tests and local experiments; nothing is persisted.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, MutexGuard};

use social_common::JwtService;
use social_core::entities::{
    Comment, Friendship, FriendshipState, Group, GroupMember, JoinRequest, MemberRole,
    Notification, Post, User,
};
use social_core::error::DomainError;
use social_core::traits::{
    CommentRepository, FriendshipRepository, GroupRepository, JoinRequestRepository,
    MemberRepository, NewComment, NewGroup, NewNotification, NewPost, NewUser,
    NotificationRepository, PostRepository, RepoResult, Session, SessionStore, UserRepository,
};
use social_core::value_objects::{FeedFilter, Id};

use crate::services::ServiceContext;

struct StoredUser {
    user: User,
    password_hash: String,
    deleted: bool,
}

#[derive(Default)]
struct State {
    last_id: i64,
    users: BTreeMap<Id, StoredUser>,
    friendships: Vec<Friendship>,
    groups: BTreeMap<Id, Group>,
    members: Vec<GroupMember>,
    join_requests: Vec<JoinRequest>,
    posts: BTreeMap<Id, Post>,
    comments: BTreeMap<Id, Comment>,
    notifications: BTreeMap<Id, Notification>,
    sessions: HashMap<String, Session>,
}

impl State {
    fn next_id(&mut self) -> Id {
        self.last_id += 1;
        Id::new(self.last_id)
    }

    fn live_user(&self, id: Id) -> Option<&User> {
        self.users
            .get(&id)
            .filter(|stored| !stored.deleted)
            .map(|stored| &stored.user)
    }

    fn is_deleted(&self, id: Id) -> bool {
        self.users.get(&id).is_some_and(|stored| stored.deleted)
    }

    fn taken(&self, except: Option<Id>, pred: impl Fn(&User) -> bool) -> bool {
        self.users
            .values()
            .any(|s| !s.deleted && Some(s.user.id) != except && pred(&s.user))
    }

    fn check_unique(&self, except: Option<Id>, username: &str, email: &str) -> RepoResult<()> {
        if self.taken(except, |u| u.username == username) {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if self.taken(except, |u| u.email == email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        Ok(())
    }

    fn is_member(&self, group_id: Id, user_id: Id) -> bool {
        self.members
            .iter()
            .any(|m| m.group_id == group_id && m.user_id == user_id)
    }

    fn visible_to(&self, post: &Post, viewer: Option<Id>) -> bool {
        self.groups.get(&post.group_id).is_some_and(|group| {
            !group.private || viewer.is_some_and(|v| self.is_member(group.id, v))
        })
    }

    fn matches(&self, post: &Post, filter: &FeedFilter) -> bool {
        match filter {
            FeedFilter::Time { .. } => true,
            FeedFilter::Category { category, .. } => post.category.eq_ignore_ascii_case(category),
            FeedFilter::User { username, .. } => self
                .live_user(post.author_id)
                .is_some_and(|author| &author.username == username),
            FeedFilter::Group { group_id, .. } => post.group_id == *group_id,
            FeedFilter::Location {
                origin,
                distance_km,
                ..
            } => post
                .geo_point()
                .is_some_and(|point| origin.distance_km(&point) <= *distance_km),
        }
    }

    fn remove_group(&mut self, id: Id) {
        self.members.retain(|m| m.group_id != id);
        self.join_requests.retain(|r| r.group_id != id);
        let posts: Vec<Id> = self
            .posts
            .values()
            .filter(|p| p.group_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in posts {
            self.remove_post(post_id);
        }
    }

    fn remove_post(&mut self, id: Id) {
        self.posts.remove(&id);
        self.comments.retain(|_, c| c.post_id != id);
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, Id)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

fn clamp(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

/// In-memory implementation of every storage port
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the backing store were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn state(&self) -> RepoResult<MutexGuard<'_, State>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("store unavailable".to_string()));
        }
        Ok(self.state.lock())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

/// Build a context whose every port is backed by `store`
pub fn in_memory_context_with(store: Arc<MemoryStore>, jwt_service: JwtService) -> ServiceContext {
    ServiceContext::from_store(store, jwt_service)
}

/// Build a context over a fresh, empty [`MemoryStore`]
pub fn in_memory_context(jwt_service: JwtService) -> ServiceContext {
    in_memory_context_with(Arc::new(MemoryStore::new()), jwt_service)
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<User>> {
        Ok(self.state()?.live_user(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let state = self.state()?;
        Ok(state
            .users
            .values()
            .find(|s| !s.deleted && s.user.username == username)
            .map(|s| s.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let state = self.state()?;
        Ok(state
            .users
            .values()
            .find(|s| !s.deleted && s.user.email == email)
            .map(|s| s.user.clone()))
    }

    async fn find_by_ids(&self, ids: &[Id]) -> RepoResult<Vec<User>> {
        let state = self.state()?;
        let mut users: Vec<User> = ids
            .iter()
            .filter_map(|id| state.live_user(*id).cloned())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users.dedup_by_key(|u| u.id);
        Ok(users)
    }

    async fn search(&self, term: &str, exclude: Id, limit: i64) -> RepoResult<Vec<User>> {
        let state = self.state()?;
        let needle = term.to_lowercase();
        let mut users: Vec<User> = state
            .users
            .values()
            .filter(|s| {
                !s.deleted
                    && s.user.id != exclude
                    && s.user.username.to_lowercase().contains(&needle)
            })
            .map(|s| s.user.clone())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users.truncate(clamp(limit));
        Ok(users)
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self.state()?.taken(None, |u| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.state()?.taken(None, |u| u.email == email))
    }

    async fn create(&self, new: &NewUser) -> RepoResult<User> {
        let mut state = self.state()?;
        state.check_unique(None, &new.username, &new.email)?;

        let user = User::new(state.next_id(), new.username.clone(), new.email.clone());
        state.users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password_hash: new.password_hash.clone(),
                deleted: false,
            },
        );
        Ok(user)
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut state = self.state()?;
        if state.live_user(user.id).is_none() {
            return Err(DomainError::UserNotFound(user.id));
        }
        state.check_unique(Some(user.id), &user.username, &user.email)?;

        if let Some(stored) = state.users.get_mut(&user.id) {
            stored.user = user.clone();
            stored.user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        let mut state = self.state()?;
        match state.users.get_mut(&id) {
            Some(stored) if !stored.deleted => stored.deleted = true,
            _ => return Err(DomainError::UserNotFound(id)),
        }
        state.members.retain(|m| m.user_id != id);
        Ok(())
    }

    async fn get_password_hash(&self, id: Id) -> RepoResult<Option<String>> {
        let state = self.state()?;
        Ok(state
            .users
            .get(&id)
            .filter(|s| !s.deleted)
            .map(|s| s.password_hash.clone()))
    }

    async fn update_password(&self, id: Id, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state()?;
        match state.users.get_mut(&id) {
            Some(stored) if !stored.deleted => {
                stored.password_hash = password_hash.to_string();
                Ok(())
            }
            _ => Err(DomainError::UserNotFound(id)),
        }
    }
}

// ============================================================================
// Friendships
// ============================================================================

#[async_trait]
impl FriendshipRepository for MemoryStore {
    async fn find_between(&self, a: Id, b: Id) -> RepoResult<Option<Friendship>> {
        let state = self.state()?;
        Ok(state.friendships.iter().find(|f| f.connects(a, b)).cloned())
    }

    async fn create(&self, friendship: &Friendship) -> RepoResult<()> {
        let mut state = self.state()?;
        if state
            .friendships
            .iter()
            .any(|f| f.requester_id == friendship.requester_id && f.addressee_id == friendship.addressee_id)
        {
            return Err(DomainError::FriendshipExists);
        }
        state.friendships.push(friendship.clone());
        Ok(())
    }

    async fn accept(&self, requester_id: Id, addressee_id: Id) -> RepoResult<()> {
        let mut state = self.state()?;
        let invite = state.friendships.iter_mut().find(|f| {
            f.requester_id == requester_id
                && f.addressee_id == addressee_id
                && f.state == FriendshipState::Pending
        });
        match invite {
            Some(f) => {
                f.state = FriendshipState::Accepted;
                Ok(())
            }
            None => Err(DomainError::FriendInviteNotFound),
        }
    }

    async fn delete(&self, a: Id, b: Id) -> RepoResult<()> {
        self.state()?.friendships.retain(|f| !f.connects(a, b));
        Ok(())
    }

    async fn find_pending_for(&self, user_id: Id) -> RepoResult<Vec<Friendship>> {
        let state = self.state()?;
        Ok(state
            .friendships
            .iter()
            .rev()
            .filter(|f| f.addressee_id == user_id && f.state == FriendshipState::Pending)
            .cloned()
            .collect())
    }

    async fn find_accepted_for(&self, user_id: Id) -> RepoResult<Vec<Friendship>> {
        let state = self.state()?;
        Ok(state
            .friendships
            .iter()
            .rev()
            .filter(|f| {
                (f.requester_id == user_id || f.addressee_id == user_id)
                    && f.state == FriendshipState::Accepted
            })
            .cloned()
            .collect())
    }
}

// ============================================================================
// Groups, members and join requests
// ============================================================================

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Group>> {
        Ok(self.state()?.groups.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Id) -> RepoResult<Vec<Group>> {
        let state = self.state()?;
        let mut memberships: Vec<&GroupMember> =
            state.members.iter().filter(|m| m.user_id == user_id).collect();
        memberships.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));
        Ok(memberships
            .into_iter()
            .filter_map(|m| state.groups.get(&m.group_id).cloned())
            .collect())
    }

    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<Group>> {
        let state = self.state()?;
        let needle = term.to_lowercase();
        let mut groups: Vec<Group> = state
            .groups
            .values()
            .filter(|g| g.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.title.cmp(&b.title));
        groups.truncate(clamp(limit));
        Ok(groups)
    }

    async fn create_with_admin(&self, new: &NewGroup, admin_id: Id) -> RepoResult<Group> {
        let mut state = self.state()?;
        let group = Group::new(
            state.next_id(),
            new.title.clone(),
            new.description.clone(),
            new.private,
        );
        state.groups.insert(group.id, group.clone());
        state
            .members
            .push(GroupMember::new(group.id, admin_id, MemberRole::Admin));
        Ok(group)
    }

    async fn update(&self, group: &Group) -> RepoResult<()> {
        let mut state = self.state()?;
        match state.groups.get_mut(&group.id) {
            Some(stored) => {
                *stored = group.clone();
                Ok(())
            }
            None => Err(DomainError::GroupNotFound(group.id)),
        }
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        let mut state = self.state()?;
        if state.groups.remove(&id).is_none() {
            return Err(DomainError::GroupNotFound(id));
        }
        state.remove_group(id);
        Ok(())
    }

    async fn member_count(&self, group_id: Id) -> RepoResult<i64> {
        let state = self.state()?;
        let count = state
            .members
            .iter()
            .filter(|m| m.group_id == group_id && !state.is_deleted(m.user_id))
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn find(&self, group_id: Id, user_id: Id) -> RepoResult<Option<GroupMember>> {
        let state = self.state()?;
        Ok(state
            .members
            .iter()
            .find(|m| m.group_id == group_id && m.user_id == user_id)
            .cloned())
    }

    async fn find_by_group(&self, group_id: Id) -> RepoResult<Vec<GroupMember>> {
        let state = self.state()?;
        Ok(state
            .members
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn admin_ids(&self, group_id: Id) -> RepoResult<Vec<Id>> {
        let state = self.state()?;
        Ok(state
            .members
            .iter()
            .filter(|m| m.group_id == group_id && m.is_admin() && !state.is_deleted(m.user_id))
            .map(|m| m.user_id)
            .collect())
    }

    async fn is_member(&self, group_id: Id, user_id: Id) -> RepoResult<bool> {
        Ok(self.state()?.is_member(group_id, user_id))
    }

    async fn create(&self, member: &GroupMember) -> RepoResult<()> {
        let mut state = self.state()?;
        if state.is_member(member.group_id, member.user_id) {
            return Err(DomainError::AlreadyMember);
        }
        state.members.push(member.clone());
        Ok(())
    }

    async fn set_role(&self, group_id: Id, user_id: Id, role: MemberRole) -> RepoResult<()> {
        let mut state = self.state()?;
        match state
            .members
            .iter_mut()
            .find(|m| m.group_id == group_id && m.user_id == user_id)
        {
            Some(member) => {
                member.role = role;
                Ok(())
            }
            None => Err(DomainError::MemberNotFound),
        }
    }

    async fn delete(&self, group_id: Id, user_id: Id) -> RepoResult<()> {
        let mut state = self.state()?;
        let before = state.members.len();
        state
            .members
            .retain(|m| !(m.group_id == group_id && m.user_id == user_id));
        if state.members.len() == before {
            return Err(DomainError::MemberNotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl JoinRequestRepository for MemoryStore {
    async fn find(&self, group_id: Id, user_id: Id) -> RepoResult<Option<JoinRequest>> {
        let state = self.state()?;
        Ok(state
            .join_requests
            .iter()
            .find(|r| r.group_id == group_id && r.user_id == user_id)
            .cloned())
    }

    async fn find_by_group(&self, group_id: Id) -> RepoResult<Vec<JoinRequest>> {
        let state = self.state()?;
        Ok(state
            .join_requests
            .iter()
            .filter(|r| r.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn create(&self, group_id: Id, user_id: Id) -> RepoResult<()> {
        let mut state = self.state()?;
        if state
            .join_requests
            .iter()
            .any(|r| r.group_id == group_id && r.user_id == user_id)
        {
            return Err(DomainError::JoinRequestExists);
        }
        state.join_requests.push(JoinRequest {
            group_id,
            user_id,
            requested_at: Utc::now(),
        });
        Ok(())
    }

    async fn delete(&self, group_id: Id, user_id: Id) -> RepoResult<()> {
        let mut state = self.state()?;
        let before = state.join_requests.len();
        state
            .join_requests
            .retain(|r| !(r.group_id == group_id && r.user_id == user_id));
        if state.join_requests.len() == before {
            return Err(DomainError::JoinRequestNotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Posts and comments
// ============================================================================

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Post>> {
        Ok(self.state()?.posts.get(&id).cloned())
    }

    async fn find_by_group(&self, group_id: Id, limit: i64) -> RepoResult<Vec<Post>> {
        let state = self.state()?;
        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|p| p.group_id == group_id)
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, p.id));
        posts.truncate(clamp(limit));
        Ok(posts)
    }

    async fn find_feed(&self, filter: &FeedFilter, limit: i64) -> RepoResult<Vec<Post>> {
        let state = self.state()?;
        let viewer = filter.viewer();
        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|p| state.visible_to(p, viewer) && state.matches(p, filter))
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, p.id));
        posts.truncate(clamp(limit));
        Ok(posts)
    }

    async fn create(&self, new: &NewPost) -> RepoResult<Post> {
        let mut state = self.state()?;
        let now = Utc::now();
        let post = Post {
            id: state.next_id(),
            group_id: new.group_id,
            author_id: new.author_id,
            title: new.title.clone(),
            content: new.content.clone(),
            location: new.location.clone(),
            category: new.category.clone(),
            liked_by: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: &Post) -> RepoResult<()> {
        let mut state = self.state()?;
        match state.posts.get_mut(&post.id) {
            Some(stored) => {
                stored.title = post.title.clone();
                stored.content = post.content.clone();
                stored.updated_at = Utc::now();
                Ok(())
            }
            None => Err(DomainError::PostNotFound(post.id)),
        }
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        let mut state = self.state()?;
        if !state.posts.contains_key(&id) {
            return Err(DomainError::PostNotFound(id));
        }
        state.remove_post(id);
        Ok(())
    }

    async fn add_like(&self, post_id: Id, user_id: Id) -> RepoResult<bool> {
        let mut state = self.state()?;
        let post = state
            .posts
            .get_mut(&post_id)
            .ok_or(DomainError::PostNotFound(post_id))?;
        if post.is_liked_by(user_id) {
            return Ok(false);
        }
        post.liked_by.push(user_id);
        Ok(true)
    }

    async fn remove_like(&self, post_id: Id, user_id: Id) -> RepoResult<bool> {
        let mut state = self.state()?;
        let Some(post) = state.posts.get_mut(&post_id) else {
            return Ok(false);
        };
        let before = post.liked_by.len();
        post.liked_by.retain(|id| *id != user_id);
        Ok(post.liked_by.len() != before)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Comment>> {
        Ok(self.state()?.comments.get(&id).cloned())
    }

    async fn find_by_post(&self, post_id: Id) -> RepoResult<Vec<Comment>> {
        let state = self.state()?;
        Ok(state
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create(&self, new: &NewComment) -> RepoResult<Comment> {
        let mut state = self.state()?;
        let now = Utc::now();
        let comment = Comment {
            id: state.next_id(),
            post_id: new.post_id,
            author_id: new.author_id,
            content: new.content.clone(),
            created_at: now,
            updated_at: now,
        };
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let mut state = self.state()?;
        match state.comments.get_mut(&comment.id) {
            Some(stored) => {
                stored.content = comment.content.clone();
                stored.updated_at = Utc::now();
                Ok(())
            }
            None => Err(DomainError::CommentNotFound(comment.id)),
        }
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        match self.state()?.comments.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::CommentNotFound(id)),
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Notification>> {
        Ok(self.state()?.notifications.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Id) -> RepoResult<Vec<Notification>> {
        let state = self.state()?;
        let mut notes: Vec<Notification> = state
            .notifications
            .values()
            .filter(|n| n.notified_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut notes, |n| (n.created_at, n.id));
        Ok(notes)
    }

    async fn create(&self, new: &NewNotification) -> RepoResult<Notification> {
        let mut state = self.state()?;
        let note = Notification {
            id: state.next_id(),
            notified_id: new.notified_id,
            subject_id: new.subject_id,
            group_id: new.group_id,
            description: new.description.clone(),
            kind: new.kind.clone(),
            read: false,
            created_at: Utc::now(),
        };
        state.notifications.insert(note.id, note.clone());
        Ok(note)
    }

    async fn update(&self, note: &Notification) -> RepoResult<()> {
        let mut state = self.state()?;
        match state.notifications.get_mut(&note.id) {
            Some(stored) => {
                *stored = note.clone();
                Ok(())
            }
            None => Err(DomainError::NotificationNotFound(note.id)),
        }
    }

    async fn delete(&self, id: Id) -> RepoResult<()> {
        match self.state()?.notifications.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotificationNotFound(id)),
        }
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[async_trait]
impl SessionStore for MemoryStore {
    // Sessions never expire here; tokens still carry their own expiry
    async fn store(&self, session: &Session, _ttl_seconds: u64) -> RepoResult<()> {
        self.state()?
            .sessions
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn get(&self, session_id: &str) -> RepoResult<Option<Session>> {
        Ok(self.state()?.sessions.get(session_id).cloned())
    }

    async fn revoke(&self, session_id: &str) -> RepoResult<bool> {
        Ok(self.state()?.sessions.remove(session_id).is_some())
    }

    async fn revoke_all_for_user(&self, user_id: Id) -> RepoResult<u32> {
        let mut state = self.state()?;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.user_id != user_id);
        Ok(u32::try_from(before - state.sessions.len()).unwrap_or(u32::MAX))
    }
}
