//! # social-core
//!
//! Domain layer containing entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, Friendship, FriendshipState, Group, GroupMember, JoinRequest, MemberRole,
    Notification, Post, User,
};
pub use error::DomainError;
pub use traits::{
    CommentRepository, FriendshipRepository, GroupRepository, JoinRequestRepository,
    MemberRepository, NewComment, NewGroup, NewNotification, NewPost, NewUser,
    NotificationRepository, PostRepository, RepoResult, Session, SessionStore, UserRepository,
};
pub use value_objects::{
    FeedFilter, GeoPoint, GeoPointParseError, Id, IdParseError, DEFAULT_FEED_DISTANCE_KM,
};
