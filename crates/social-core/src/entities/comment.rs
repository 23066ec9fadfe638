//! Comment entity

use chrono::{DateTime, Utc};

use crate::value_objects::Id;

/// A comment on a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Id,
    pub post_id: Id,
    pub author_id: Id,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    #[inline]
    pub fn is_author(&self, user_id: Id) -> bool {
        self.author_id == user_id
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}
