//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use social_core::entities::{Comment, Friendship, Group, Notification, Post, User};
use social_core::Id;

use super::responses::{
    CommentResponse, CurrentUserResponse, FriendshipResponse, GroupResponse, NotificationResponse,
    PostResponse, PublicUserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            avatar_url: user.avatar_url.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            bio: user.bio.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

impl From<User> for PublicUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl FriendshipResponse {
    /// Describe `friendship` from the point of view of `user_id`
    pub fn seen_by(friendship: &Friendship, user_id: Id) -> Self {
        Self {
            user_id,
            friend_id: friendship.other(user_id),
            state: friendship.state.as_str().to_string(),
        }
    }
}

// ============================================================================
// Group Mappers
// ============================================================================

impl From<&Group> for GroupResponse {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id,
            title: group.title.clone(),
            description: group.description.clone(),
            private: group.private,
            created_at: group.created_at,
        }
    }
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self::from(&group)
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

/// A post as seen by a particular viewer
#[derive(Debug, Clone, Copy)]
pub struct PostView<'a> {
    pub post: &'a Post,
    pub viewer: Option<Id>,
}

impl From<PostView<'_>> for PostResponse {
    fn from(view: PostView<'_>) -> Self {
        let post = view.post;
        Self {
            id: post.id,
            group_id: post.group_id,
            author_id: post.author_id,
            title: post.title.clone(),
            content: post.content.clone(),
            location: post.location.clone(),
            category: post.category.clone(),
            likes: post.like_count(),
            liked_by_user: view.viewer.is_some_and(|viewer| post.is_liked_by(viewer)),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            author_id: comment.author_id,
            content: comment.content.clone(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(note: &Notification) -> Self {
        Self {
            id: note.id,
            notified_id: note.notified_id,
            subject_id: note.subject_id,
            group_id: note.group_id,
            description: note.description.clone(),
            kind: note.kind.clone(),
            read: note.read,
            created_at: note.created_at,
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(note: Notification) -> Self {
        Self::from(&note)
    }
}
