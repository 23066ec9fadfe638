//! Group endpoint parameters

use serde::Deserialize;
use social_core::Id;
use social_service::dto::{CreateGroupRequest, UpdateGroupRequest};
use validator::Validate;

use super::strict_bool;

/// `GET /groups`, `GET /groups/members`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GroupParams {
    pub group_id: Id,
}

/// Admin-only endpoints addressed by group alone
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GroupAdminParams {
    pub group_id: String,
}

/// `POST /groups`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupParams {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "strict_bool")]
    pub private: bool,
    pub user_id: Id,
}

impl CreateGroupParams {
    pub fn into_parts(self) -> (CreateGroupRequest, Id) {
        let request = CreateGroupRequest {
            title: self.title,
            description: self.description,
            private: self.private,
        };
        (request, self.user_id)
    }
}

/// `PUT /groups`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditGroupParams {
    pub group_id: String,
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "strict_bool")]
    pub private: bool,
}

impl EditGroupParams {
    pub fn into_parts(self) -> (String, UpdateGroupRequest) {
        let request = UpdateGroupRequest {
            title: self.title,
            description: self.description,
            private: self.private,
        };
        (self.group_id, request)
    }
}

/// Endpoints where the caller acts on their own membership
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GroupMemberParams {
    pub group_id: Id,
    pub user_id: String,
}

/// `GET /groups/search`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchGroupsParams {
    pub search: String,
    pub user_id: Id,
}

/// `GET /groups/promote`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PromoteParams {
    pub group_id: String,
    pub user_id: Id,
    pub promote_id: Id,
}

/// `GET /groups/demote`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DemoteParams {
    pub group_id: String,
    pub user_id: Id,
    pub demote_id: Id,
}

/// `GET /groups/requests/accept`, `GET /groups/requests/decline`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequestParams {
    pub group_id: String,
    pub user_id: Id,
}
