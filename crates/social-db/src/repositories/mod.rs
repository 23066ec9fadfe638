//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in social-core.

mod comment;
mod error;
mod friendship;
mod group;
mod join_request;
mod member;
mod notification;
mod post;
mod user;

pub use comment::PgCommentRepository;
pub use friendship::PgFriendshipRepository;
pub use group::PgGroupRepository;
pub use join_request::PgJoinRequestRepository;
pub use member::PgMemberRepository;
pub use notification::PgNotificationRepository;
pub use post::PgPostRepository;
pub use user::PgUserRepository;
