//! Comment handlers

use axum::{extract::State, Json};
use social_service::{dto::CommentResponse, CommentService};

use crate::extractors::{Caller, Params};
use crate::params::{CommentAuthorParams, CommentParams, CreateCommentParams};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Comment on a post
///
/// POST /api/comments
pub async fn create_comment(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<CreateCommentParams>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = CommentService::new(state.service_context());
    let response = service
        .create_comment(params.post_id, user_id, &params.content)
        .await?;
    Ok(Created(Json(response)))
}

/// Get a comment
///
/// GET /api/comments
pub async fn load_comment(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<CommentParams>,
) -> ApiResult<Json<CommentResponse>> {
    caller.authenticate(&state).await?;

    let service = CommentService::new(state.service_context());
    Ok(Json(service.load_comment(params.comment_id).await?))
}

/// Edit a comment; author only
///
/// PUT /api/comments
pub async fn update_comment(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<CommentAuthorParams>,
) -> ApiResult<Json<CommentResponse>> {
    let comment_id = caller
        .ensure_comment_author(&state, &params.comment_id)
        .await?;

    let service = CommentService::new(state.service_context());
    let response = service
        .update_comment(comment_id, params.content.as_deref())
        .await?;
    Ok(Json(response))
}

/// Delete a comment; author only
///
/// DELETE /api/comments
pub async fn delete_comment(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<CommentAuthorParams>,
) -> ApiResult<NoContent> {
    let comment_id = caller
        .ensure_comment_author(&state, &params.comment_id)
        .await?;

    let service = CommentService::new(state.service_context());
    service.delete_comment(comment_id).await?;
    Ok(NoContent)
}
