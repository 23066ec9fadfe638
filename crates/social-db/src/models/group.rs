//! Group, membership and join request database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for groups table
#[derive(Debug, Clone, FromRow)]
pub struct GroupModel {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for group_members table
#[derive(Debug, Clone, FromRow)]
pub struct GroupMemberModel {
    pub group_id: i64,
    pub user_id: i64,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// Database model for group_join_requests table
#[derive(Debug, Clone, FromRow)]
pub struct JoinRequestModel {
    pub group_id: i64,
    pub user_id: i64,
    pub requested_at: DateTime<Utc>,
}
