//! Post and feed endpoint parameters

use serde::Deserialize;
use social_core::{FeedFilter, GeoPoint, Id, DEFAULT_FEED_DISTANCE_KM};
use social_service::dto::{CreatePostRequest, UpdatePostRequest};
use validator::Validate;

use crate::response::{ApiError, ApiResult};

/// `GET /feed`
///
/// Only `userId` is always required; the rest depends on `type`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedParams {
    pub user_id: Id,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub location: Option<String>,
    pub distance: Option<String>,
    pub category: Option<String>,
    pub username: Option<String>,
    pub group_id: Option<String>,
}

impl FeedParams {
    /// Build the filter for `viewer`
    ///
    /// A missing or unrecognized `type` selects the newest posts with no
    /// viewer, so private groups stay hidden.
    pub fn into_filter(self, viewer: Id) -> ApiResult<FeedFilter> {
        let viewer = Some(viewer);
        let kind = self.kind.as_deref().map(str::trim).unwrap_or("Time");

        let filter = match kind {
            "Time" => FeedFilter::Time { viewer },
            "Location" => {
                let raw = required(self.location, "location")?;
                let origin = GeoPoint::parse(&raw)
                    .map_err(|e| ApiError::invalid_request(format!("location: {e}")))?;
                FeedFilter::Location {
                    viewer,
                    origin,
                    distance_km: parse_distance(self.distance.as_deref())?,
                }
            }
            "Category" => FeedFilter::Category {
                viewer,
                category: required(self.category, "category")?,
            },
            "User" => FeedFilter::User {
                viewer,
                username: required(self.username, "username")?,
            },
            "Group" => {
                let raw = required(self.group_id, "groupId")?;
                let group_id = Id::parse(raw.trim())
                    .map_err(|e| ApiError::invalid_request(format!("groupId: {e}")))?;
                FeedFilter::Group { viewer, group_id }
            }
            _ => FeedFilter::Time { viewer: None },
        };

        Ok(filter)
    }
}

fn required(value: Option<String>, name: &str) -> ApiResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::invalid_request(format!("missing field `{name}`")))
}

fn parse_distance(raw: Option<&str>) -> ApiResult<f64> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(DEFAULT_FEED_DISTANCE_KM);
    };

    match raw.parse::<f64>() {
        Ok(km) if km.is_finite() && km >= 0.0 => Ok(km),
        _ => Err(ApiError::invalid_request(format!(
            "distance: expected a non-negative number, got {raw:?}"
        ))),
    }
}

/// `POST /posts`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostParams {
    pub user_id: String,
    pub group_id: Id,
    pub title: String,
    pub post_content: String,
    pub location: String,
    pub category: String,
}

impl CreatePostParams {
    pub fn into_parts(self) -> (String, CreatePostRequest) {
        let request = CreatePostRequest {
            group_id: self.group_id,
            title: self.title,
            content: self.post_content,
            location: self.location,
            category: self.category,
        };
        (self.user_id, request)
    }
}

/// `GET /posts`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostParams {
    pub post_id: Id,
    pub user_id: Id,
}

/// `PUT /posts`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditPostParams {
    pub post_id: Id,
    pub user_id: String,
    pub title: String,
    pub post_content: String,
}

impl EditPostParams {
    pub fn into_parts(self) -> (Id, String, UpdatePostRequest) {
        let request = UpdatePostRequest {
            title: self.title,
            content: self.post_content,
        };
        (self.post_id, self.user_id, request)
    }
}

/// `DELETE /posts`, `GET /posts/like`, `GET /posts/unlike`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostActionParams {
    pub post_id: Id,
    pub user_id: String,
}
