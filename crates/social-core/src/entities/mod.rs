//! Domain entities - core business objects

mod comment;
mod friendship;
mod group;
mod notification;
mod post;
mod user;

pub use comment::Comment;
pub use friendship::{Friendship, FriendshipState};
pub use group::{Group, GroupMember, JoinRequest, MemberRole};
pub use notification::Notification;
pub use post::Post;
pub use user::User;
