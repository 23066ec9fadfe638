//! Ports implemented by the infrastructure crates

mod repositories;
mod session;

pub use repositories::{
    CommentRepository, FriendshipRepository, GroupRepository, JoinRequestRepository,
    MemberRepository, NewComment, NewGroup, NewNotification, NewPost, NewUser,
    NotificationRepository, PostRepository, RepoResult, UserRepository,
};
pub use session::{Session, SessionStore};
