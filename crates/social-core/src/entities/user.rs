//! User entity - a registered account

use chrono::{DateTime, Utc};

use crate::value_objects::Id;

/// User account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Id, username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            bio: String::new(),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the username
    pub fn set_username(&mut self, username: String) {
        self.username = username;
        self.updated_at = Utc::now();
    }

    /// Update the email address
    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Update the profile bio
    pub fn set_bio(&mut self, bio: String) {
        self.bio = bio;
        self.updated_at = Utc::now();
    }

    /// Update the avatar
    pub fn set_avatar(&mut self, avatar_url: Option<String>) {
        self.avatar_url = avatar_url;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(Id::new(1), "alice".to_string(), "alice@example.com".to_string());
        assert!(user.bio.is_empty());
        assert!(user.avatar_url.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_setters_touch_updated_at() {
        let mut user = User::new(Id::new(1), "alice".to_string(), "alice@example.com".to_string());
        let before = user.updated_at;
        user.set_bio("hello".to_string());
        user.set_avatar(Some("https://cdn.example.com/a.png".to_string()));
        assert_eq!(user.bio, "hello");
        assert!(user.updated_at >= before);
    }
}
