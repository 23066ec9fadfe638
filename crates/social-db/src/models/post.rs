//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Post row joined with its like set (`ARRAY(SELECT user_id FROM post_likes ...)`)
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub group_id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub location: String,
    pub category: String,
    #[sqlx(default)]
    pub liked_by: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
