//! Service context - dependency container for services
//!
//! Holds the repositories, the session store and the JWT service, plus the
//! raw pools the readiness probe pings.

use std::sync::Arc;

use social_cache::RedisPool;
use social_common::JwtService;
use social_core::traits::{
    CommentRepository, FriendshipRepository, GroupRepository, JoinRequestRepository,
    MemberRepository, NotificationRepository, PostRepository, SessionStore, UserRepository,
};
use social_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Pools, absent when running against in-memory stores
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    friendship_repo: Arc<dyn FriendshipRepository>,
    group_repo: Arc<dyn GroupRepository>,
    member_repo: Arc<dyn MemberRepository>,
    join_request_repo: Arc<dyn JoinRequestRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    notification_repo: Arc<dyn NotificationRepository>,

    // Token sessions
    session_store: Arc<dyn SessionStore>,
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::default()
    }

    /// Context whose every port is served by one store, with no pools
    pub fn from_store<S>(store: Arc<S>, jwt_service: JwtService) -> Self
    where
        S: UserRepository
            + FriendshipRepository
            + GroupRepository
            + MemberRepository
            + JoinRequestRepository
            + PostRepository
            + CommentRepository
            + NotificationRepository
            + SessionStore
            + 'static,
    {
        Self {
            pool: None,
            redis_pool: None,
            user_repo: store.clone(),
            friendship_repo: store.clone(),
            group_repo: store.clone(),
            member_repo: store.clone(),
            join_request_repo: store.clone(),
            post_repo: store.clone(),
            comment_repo: store.clone(),
            notification_repo: store.clone(),
            session_store: store,
            jwt_service: Arc::new(jwt_service),
        }
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> Option<&RedisPool> {
        self.redis_pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn friendship_repo(&self) -> &dyn FriendshipRepository {
        self.friendship_repo.as_ref()
    }

    pub fn group_repo(&self) -> &dyn GroupRepository {
        self.group_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    pub fn join_request_repo(&self) -> &dyn JoinRequestRepository {
        self.join_request_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    // === Auth ===

    /// Get the session store
    pub fn session_store(&self) -> &dyn SessionStore {
        self.session_store.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.is_some())
            .field("redis_pool", &self.redis_pool.is_some())
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    friendship_repo: Option<Arc<dyn FriendshipRepository>>,
    group_repo: Option<Arc<dyn GroupRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    join_request_repo: Option<Arc<dyn JoinRequestRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    session_store: Option<Arc<dyn SessionStore>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn friendship_repo(mut self, repo: Arc<dyn FriendshipRepository>) -> Self {
        self.friendship_repo = Some(repo);
        self
    }

    pub fn group_repo(mut self, repo: Arc<dyn GroupRepository>) -> Self {
        self.group_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn join_request_repo(mut self, repo: Arc<dyn JoinRequestRepository>) -> Self {
        self.join_request_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            pool: self.pool,
            redis_pool: self.redis_pool,
            user_repo: required(self.user_repo, "user_repo")?,
            friendship_repo: required(self.friendship_repo, "friendship_repo")?,
            group_repo: required(self.group_repo, "group_repo")?,
            member_repo: required(self.member_repo, "member_repo")?,
            join_request_repo: required(self.join_request_repo, "join_request_repo")?,
            post_repo: required(self.post_repo, "post_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            notification_repo: required(self.notification_repo, "notification_repo")?,
            session_store: required(self.session_store, "session_store")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_repositories() {
        let result = ServiceContext::builder()
            .jwt_service(Arc::new(JwtService::new("secret", 60, 120)))
            .build();
        assert!(matches!(result, Err(ServiceError::Validation(msg)) if msg.contains("user_repo")));
    }

    #[test]
    fn test_in_memory_context_has_no_pools() {
        let ctx = crate::memory::in_memory_context(JwtService::new("secret", 60, 120));
        assert!(ctx.pool().is_none());
        assert!(ctx.redis_pool().is_none());
    }
}
