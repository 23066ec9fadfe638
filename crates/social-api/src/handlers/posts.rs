//! Post handlers
//!
//! Endpoints for the feed, posts and likes.

use axum::{extract::State, Json};
use social_service::{
    dto::{PostResponse, PostWithCommentsResponse},
    PostService,
};

use crate::extractors::{Caller, Params};
use crate::params::{CreatePostParams, EditPostParams, FeedParams, PostActionParams, PostParams};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Build a feed for the caller
///
/// GET /api/feed
pub async fn load_feed(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<FeedParams>,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let viewer = caller.user_id(&state).await?;
    let filter = params.into_filter(viewer)?;

    let service = PostService::new(state.service_context());
    Ok(Json(service.load_feed(filter).await?))
}

/// Publish a post into a group
///
/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<CreatePostParams>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let (raw_user_id, request) = params.into_parts();
    let user_id = caller.ensure_is(&state, &raw_user_id).await?;

    let service = PostService::new(state.service_context());
    let response = service.create_post(user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get a post with its comments
///
/// GET /api/posts
pub async fn load_post(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<PostParams>,
) -> ApiResult<Json<PostWithCommentsResponse>> {
    let viewer = caller.user_id(&state).await?;

    let service = PostService::new(state.service_context());
    Ok(Json(service.load_post(params.post_id, viewer).await?))
}

/// Edit a post; author only
///
/// PUT /api/posts
pub async fn edit_post(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<EditPostParams>,
) -> ApiResult<Json<PostResponse>> {
    let (post_id, raw_user_id, request) = params.into_parts();
    let user_id = caller.ensure_is(&state, &raw_user_id).await?;

    let service = PostService::new(state.service_context());
    Ok(Json(service.edit_post(post_id, user_id, request).await?))
}

/// Delete a post; author only
///
/// DELETE /api/posts
pub async fn remove_post(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<PostActionParams>,
) -> ApiResult<NoContent> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = PostService::new(state.service_context());
    service.remove_post(params.post_id, user_id).await?;
    Ok(NoContent)
}

/// Like a post
///
/// GET /api/posts/like
pub async fn like_post(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<PostActionParams>,
) -> ApiResult<Json<PostResponse>> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = PostService::new(state.service_context());
    Ok(Json(service.like_post(params.post_id, user_id).await?))
}

/// Remove a like
///
/// GET /api/posts/unlike
pub async fn unlike_post(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<PostActionParams>,
) -> ApiResult<Json<PostResponse>> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = PostService::new(state.service_context());
    Ok(Json(service.unlike_post(params.post_id, user_id).await?))
}
