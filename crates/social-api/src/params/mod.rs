//! Query parameter schemas, one per endpoint
//!
//! Identifiers that an authorization predicate inspects stay as raw text so
//! the predicate can answer `false` for garbage. Every other identifier is
//! typed, so a non-integer value is rejected with 400 at extraction.

mod comments;
mod friends;
mod groups;
mod notifications;
mod posts;
mod users;

pub use comments::{CommentAuthorParams, CommentParams, CreateCommentParams};
pub use friends::{FriendParams, RespondParams, UserListParams};
pub use groups::{
    CreateGroupParams, DemoteParams, EditGroupParams, GroupAdminParams, GroupMemberParams,
    GroupParams, JoinRequestParams, PromoteParams, SearchGroupsParams,
};
pub use notifications::{CreateNotificationParams, NoteParams, NotificationsParams};
pub use posts::{CreatePostParams, EditPostParams, FeedParams, PostActionParams, PostParams};
pub use users::{
    AvatarParams, DeleteUserParams, LoginParams, RegisterParams, SearchUserParams,
    UpdateUserParams, UserGroupsParams, UserIdParams, UserParams,
};

use serde::{de, Deserialize, Deserializer};

/// Parse `true` / `false`, ignoring ASCII case
pub fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Deserialize a flag that must be spelled `true` or `false`
pub(crate) fn strict_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_bool(&raw).ok_or_else(|| de::Error::custom(format!("expected true or false, got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::Uri};

    #[derive(Debug, Deserialize)]
    struct Flag {
        #[serde(deserialize_with = "strict_bool")]
        private: bool,
    }

    fn flag(query: &str) -> Result<Flag, String> {
        let uri: Uri = format!("/groups?{query}").parse().unwrap();
        Query::<Flag>::try_from_uri(&uri)
            .map(|Query(flag)| flag)
            .map_err(|e| e.body_text())
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool(" True "), Some(true));
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool("1"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_false_is_false() {
        assert!(!flag("private=false").unwrap().private);
        assert!(flag("private=true").unwrap().private);
    }

    #[test]
    fn test_unrecognized_flag_is_rejected() {
        let err = flag("private=yes").unwrap_err();
        assert!(err.contains("expected true or false"));
        assert!(flag("").is_err());
    }
}
