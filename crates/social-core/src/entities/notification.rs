//! Notification entity

use chrono::{DateTime, Utc};

use crate::value_objects::Id;

/// Notification delivered to a user about another user's action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Id,
    pub notified_id: Id,
    pub subject_id: Id,
    pub group_id: Id,
    pub description: String,
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Group id stored when a notification is not tied to a group
    pub const DEFAULT_GROUP_ID: Id = Id::new(69);

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}
