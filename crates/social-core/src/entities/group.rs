//! Group entity and its membership records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Id;

/// A group users can join and post into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Create a new Group
    pub fn new(id: Id, title: String, description: String, private: bool) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description,
            private,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable details
    pub fn edit(&mut self, title: String, description: String, private: bool) {
        self.title = title;
        self.description = description;
        self.private = private;
        self.updated_at = Utc::now();
    }
}

/// Role a member holds inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Member,
    Admin,
}

impl MemberRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }

    /// Parse the stored textual form; unknown values are `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "member" => Some(Self::Member),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Membership of a user in a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    pub group_id: Id,
    pub user_id: Id,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl GroupMember {
    pub fn new(group_id: Id, user_id: Id, role: MemberRole) -> Self {
        Self {
            group_id,
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }
}

/// Pending request to join a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub group_id: Id,
    pub user_id: Id,
    pub requested_at: DateTime<Utc>,
}
