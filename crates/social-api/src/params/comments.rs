//! Comment endpoint parameters

use serde::Deserialize;
use social_core::Id;
use validator::Validate;

/// `POST /comments`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentParams {
    pub post_id: Id,
    pub user_id: String,
    pub content: String,
}

/// `GET /comments`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentParams {
    pub comment_id: Id,
}

/// `PUT /comments`, `DELETE /comments`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthorParams {
    pub comment_id: String,
    pub content: Option<String>,
}
