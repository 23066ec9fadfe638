//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub notified_id: i64,
    pub subject_id: i64,
    pub group_id: i64,
    pub description: String,
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
