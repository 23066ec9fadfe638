//! Bearer token sessions in Redis.
//!
//! Each session lives under `session:{id}` with the token's lifetime as TTL.
//! A per-user set `user_sessions:{user_id}` tracks the ids so every session
//! of a deleted account can be dropped at once.

use async_trait::async_trait;
use redis::AsyncCommands;

use social_core::error::DomainError;
use social_core::traits::{RepoResult, Session, SessionStore};
use social_core::value_objects::Id;

use crate::pool::{RedisPool, RedisPoolError};

/// Key prefix for sessions
const SESSION_PREFIX: &str = "session:";

/// Key prefix for the per-user session index
const USER_SESSIONS_PREFIX: &str = "user_sessions:";

impl From<RedisPoolError> for DomainError {
    fn from(e: RedisPoolError) -> Self {
        DomainError::CacheError(e.to_string())
    }
}

/// Redis-backed [`SessionStore`]
#[derive(Clone, Debug)]
pub struct RedisSessionStore {
    pool: RedisPool,
}

impl RedisSessionStore {
    /// Create a new session store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_PREFIX}{session_id}")
    }

    fn user_key(user_id: Id) -> String {
        format!("{USER_SESSIONS_PREFIX}{user_id}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn store(&self, session: &Session, ttl_seconds: u64) -> RepoResult<()> {
        self.pool
            .put_json(&Self::key(&session.session_id), session, ttl_seconds)
            .await?;

        let user_key = Self::user_key(session.user_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_key, &session.session_id)
            .await
            .map_err(RedisPoolError::from)?;
        // The index must outlive its longest-lived session
        self.pool.extend_ttl(&user_key, ttl_seconds).await?;

        tracing::debug!(
            session_id = %session.session_id,
            user_id = %session.user_id,
            "Stored session"
        );

        Ok(())
    }

    async fn get(&self, session_id: &str) -> RepoResult<Option<Session>> {
        Ok(self.pool.get_json(&Self::key(session_id)).await?)
    }

    async fn revoke(&self, session_id: &str) -> RepoResult<bool> {
        if let Some(session) = self.get(session_id).await? {
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(Self::user_key(session.user_id), session_id)
                .await
                .map_err(RedisPoolError::from)?;
        }

        let deleted = self.pool.delete(&[Self::key(session_id)]).await? > 0;
        if deleted {
            tracing::debug!(session_id = %session_id, "Revoked session");
        }

        Ok(deleted)
    }

    async fn revoke_all_for_user(&self, user_id: Id) -> RepoResult<u32> {
        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;

        let session_ids: Vec<String> = conn
            .smembers(&user_key)
            .await
            .map_err(RedisPoolError::from)?;

        let keys: Vec<String> = session_ids.iter().map(|id| Self::key(id)).collect();
        let count = self.pool.delete(&keys).await?;
        conn.del::<_, ()>(&user_key)
            .await
            .map_err(RedisPoolError::from)?;

        tracing::info!(user_id = %user_id, count, "Revoked all sessions for user");

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_generation() {
        assert_eq!(RedisSessionStore::key("abc123"), "session:abc123");
        assert_eq!(RedisSessionStore::user_key(Id::new(42)), "user_sessions:42");
    }

    #[test]
    fn test_pool_error_maps_to_cache_error() {
        let err: DomainError = RedisPoolError::InvalidTtl(u64::MAX).into();
        assert!(matches!(err, DomainError::CacheError(_)));
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RedisSessionStore>();
    }
}
