//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod friendship;
mod group;
mod notification;
mod post;
mod user;

pub use comment::CommentModel;
pub use friendship::FriendshipModel;
pub use group::{GroupMemberModel, GroupModel, JoinRequestModel};
pub use notification::NotificationModel;
pub use post::PostModel;
pub use user::UserModel;
