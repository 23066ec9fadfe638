//! Friend endpoint parameters

use serde::Deserialize;
use social_core::Id;
use validator::Validate;

use super::strict_bool;

/// `POST /friends`, `POST /friends/invite`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FriendParams {
    pub user_id: String,
    pub friend_id: Id,
}

/// `POST /friends/respond`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondParams {
    pub user_id: String,
    pub friend_id: Id,
    #[serde(deserialize_with = "strict_bool")]
    pub accepted: bool,
}

/// `GET /friends`, `GET /friends/invites`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    pub user_id: String,
}
