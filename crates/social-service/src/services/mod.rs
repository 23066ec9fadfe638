//! Service layer
//!
//! Each service borrows a [`ServiceContext`] and implements one family of
//! operations on top of the repository ports.

pub mod auth;
pub mod authorization;
pub mod comment;
pub mod context;
pub mod error;
pub mod friend;
pub mod group;
pub mod notification;
pub mod post;
pub mod token;
pub mod user;

pub use auth::AuthService;
pub use authorization::AuthorizationService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use friend::FriendService;
pub use group::GroupService;
pub use notification::{NotificationService, DEFAULT_NOTIFICATION_GROUP_ID};
pub use post::PostService;
pub use token::{TokenService, TokenStatus};
pub use user::UserService;
