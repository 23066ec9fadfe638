//! Friendship database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for friendships table
#[derive(Debug, Clone, FromRow)]
pub struct FriendshipModel {
    pub requester_id: i64,
    pub addressee_id: i64,
    pub state: String,
    pub created_at: DateTime<Utc>,
}
