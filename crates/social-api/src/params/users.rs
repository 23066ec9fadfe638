//! Auth and user endpoint parameters

use serde::Deserialize;
use social_core::Id;
use social_service::dto::{LoginRequest, RegisterRequest, UpdateUserRequest};
use validator::Validate;

use super::strict_bool;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterParams {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterParams> for RegisterRequest {
    fn from(p: RegisterParams) -> Self {
        Self {
            username: p.username,
            email: p.email,
            password: p.password,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginParams {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
    #[serde(deserialize_with = "strict_bool")]
    pub remember: bool,
}

impl From<LoginParams> for LoginRequest {
    fn from(p: LoginParams) -> Self {
        Self {
            username: p.username.filter(|u| !u.trim().is_empty()),
            email: p.email.filter(|e| !e.trim().is_empty()),
            password: p.password,
            remember: p.remember,
        }
    }
}

/// `GET /users`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserParams {
    pub user_id: Id,
}

/// `GET /users/search`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchUserParams {
    pub user_id: Id,
    pub username: String,
}

/// `PUT /users`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserParams {
    pub user_id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserParams {
    /// Split into the raw target id and the profile changes
    pub fn into_parts(self) -> (String, UpdateUserRequest) {
        let request = UpdateUserRequest {
            username: self.username,
            email: self.email,
            bio: self.bio,
            password: self.password,
        };
        (self.user_id, request)
    }
}

/// `DELETE /users`; the id is spelled with a capital `U`
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteUserParams {
    #[serde(rename = "UserId")]
    pub user_id: String,
}

/// `PUT /users/avatar`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AvatarParams {
    pub user_id: String,
    #[validate(length(max = 2048, message = "url must be at most 2048 characters"))]
    pub url: String,
}

/// `GET /users/id`
#[derive(Debug, Deserialize, Validate)]
pub struct UserIdParams {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
}

/// `GET /users/groups`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserGroupsParams {
    pub user_id: Id,
}
