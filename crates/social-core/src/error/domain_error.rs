//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Id;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Id),

    #[error("Group not found: {0}")]
    GroupNotFound(Id),

    #[error("Post not found: {0}")]
    PostNotFound(Id),

    #[error("Comment not found: {0}")]
    CommentNotFound(Id),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Id),

    #[error("Member not found in group")]
    MemberNotFound,

    #[error("No pending join request")]
    JoinRequestNotFound,

    #[error("No pending friend invite")]
    FriendInviteNotFound,

    #[error("Post has not been liked by this user")]
    LikeNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Cannot befriend yourself")]
    CannotFriendSelf,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not a member of this group")]
    NotGroupMember,

    #[error("Not post author")]
    NotPostAuthor,

    #[error("Not comment author")]
    NotCommentAuthor,

    #[error("Group is private, request to join instead")]
    PrivateGroup,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Already a member of this group")]
    AlreadyMember,

    #[error("Join request already pending")]
    JoinRequestExists,

    #[error("Users are already friends or have a pending invite")]
    FriendshipExists,

    #[error("Post already liked")]
    AlreadyLiked,

    #[error("A group must keep at least one admin")]
    LastAdmin,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::GroupNotFound(_) => "UNKNOWN_GROUP",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::MemberNotFound => "UNKNOWN_MEMBER",
            Self::JoinRequestNotFound => "UNKNOWN_JOIN_REQUEST",
            Self::FriendInviteNotFound => "UNKNOWN_INVITE",
            Self::LikeNotFound => "UNKNOWN_LIKE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::CannotFriendSelf => "CANNOT_FRIEND_SELF",

            // Authorization
            Self::NotGroupMember => "NOT_GROUP_MEMBER",
            Self::NotPostAuthor => "NOT_POST_AUTHOR",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",
            Self::PrivateGroup => "PRIVATE_GROUP",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::JoinRequestExists => "JOIN_REQUEST_EXISTS",
            Self::FriendshipExists => "FRIENDSHIP_EXISTS",
            Self::AlreadyLiked => "ALREADY_LIKED",
            Self::LastAdmin => "LAST_ADMIN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::GroupNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::MemberNotFound
                | Self::JoinRequestNotFound
                | Self::FriendInviteNotFound
                | Self::LikeNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidUsername(_)
                | Self::CannotFriendSelf
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotGroupMember | Self::NotPostAuthor | Self::NotCommentAuthor | Self::PrivateGroup
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameAlreadyExists
                | Self::EmailAlreadyExists
                | Self::AlreadyMember
                | Self::JoinRequestExists
                | Self::FriendshipExists
                | Self::AlreadyLiked
                | Self::LastAdmin
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::GroupNotFound(Id::new(1));
        assert_eq!(err.code(), "UNKNOWN_GROUP");

        let err = DomainError::LastAdmin;
        assert_eq!(err.code(), "LAST_ADMIN");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::LikeNotFound.is_not_found());
        assert!(DomainError::PrivateGroup.is_authorization());
        assert!(DomainError::AlreadyLiked.is_conflict());
        assert!(DomainError::CannotFriendSelf.is_validation());
        assert!(!DomainError::DatabaseError("x".to_string()).is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::PostNotFound(Id::new(123));
        assert_eq!(err.to_string(), "Post not found: 123");
    }
}
