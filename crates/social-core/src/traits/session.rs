//! Session store port - server-side record of issued bearer tokens
//!
//! A token is only honoured while its session exists, which is what lets
//! logout revoke a token before it expires.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::traits::RepoResult;
use crate::value_objects::Id;

/// Stored session data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Session ID carried in the token's claims
    pub session_id: String,
    /// User ID this session belongs to
    pub user_id: Id,
    /// Creation timestamp (Unix epoch seconds)
    pub created_at: i64,
}

impl Session {
    pub fn new(session_id: String, user_id: Id) -> Self {
        Self {
            session_id,
            user_id,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session that expires after `ttl_seconds`
    async fn store(&self, session: &Session, ttl_seconds: u64) -> RepoResult<()>;

    /// Load a live session
    async fn get(&self, session_id: &str) -> RepoResult<Option<Session>>;

    /// Remove a session; returns false if it did not exist
    async fn revoke(&self, session_id: &str) -> RepoResult<bool>;

    /// Remove every session of a user, returning how many were dropped
    async fn revoke_all_for_user(&self, user_id: Id) -> RepoResult<u32>;
}
