//! Request DTOs for service operations
//!
//! The API layer builds these from query parameters; services validate them
//! with `validator` before touching storage.

use social_core::Id;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// Login by username or email
#[derive(Debug, Clone, Validate)]
pub struct LoginRequest {
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub password: String,

    /// Issue a long-lived session
    pub remember: bool,
}

// ============================================================================
// User Requests
// ============================================================================

/// Partial profile update; absent fields stay unchanged
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: Option<String>,
}

// ============================================================================
// Group Requests
// ============================================================================

/// Create group request
#[derive(Debug, Clone, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,

    pub private: bool,
}

/// Edit group request; every field is replaced
#[derive(Debug, Clone, Validate)]
pub struct UpdateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,

    pub private: bool,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Validate)]
pub struct CreatePostRequest {
    pub group_id: Id,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,

    /// Free text; a `"lat,lng"` value also geotags the post
    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: String,

    #[validate(length(max = 64, message = "Category must be at most 64 characters"))]
    pub category: String,
}

/// Edit post request
#[derive(Debug, Clone, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,
}

// ============================================================================
// Notification Requests
// ============================================================================

/// Create notification request
#[derive(Debug, Clone, Validate)]
pub struct CreateNotificationRequest {
    pub notified_id: Id,
    pub subject_id: Id,
    pub group_id: Id,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 32, message = "Type must be 1-32 characters"))]
    pub kind: String,
}
