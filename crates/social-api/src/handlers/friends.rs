//! Friend handlers
//!
//! Every endpoint acts on behalf of the caller named by `userId`.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use social_service::{
    dto::{FriendshipResponse, PublicUserResponse},
    FriendService,
};

use crate::extractors::{Caller, Params};
use crate::params::{FriendParams, RespondParams, UserListParams};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Befriend directly
///
/// POST /api/friends
pub async fn add_friend(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<FriendParams>,
) -> ApiResult<Created<Json<FriendshipResponse>>> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = FriendService::new(state.service_context());
    let response = service.add_friend(user_id, params.friend_id).await?;
    Ok(Created(Json(response)))
}

/// Send a friend invite
///
/// POST /api/friends/invite
pub async fn invite_friend(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<FriendParams>,
) -> ApiResult<Created<Json<FriendshipResponse>>> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = FriendService::new(state.service_context());
    let response = service.invite_friend(user_id, params.friend_id).await?;
    Ok(Created(Json(response)))
}

/// Accept or decline a pending invite
///
/// POST /api/friends/respond
pub async fn respond_to_invite(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<RespondParams>,
) -> ApiResult<Response> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = FriendService::new(state.service_context());
    let response = service
        .respond_to_invite(user_id, params.friend_id, params.accepted)
        .await?;

    Ok(match response {
        Some(friendship) => Json(friendship).into_response(),
        None => NoContent.into_response(),
    })
}

/// Pending invites addressed to the caller
///
/// GET /api/friends/invites
pub async fn load_invites(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<UserListParams>,
) -> ApiResult<Json<Vec<PublicUserResponse>>> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = FriendService::new(state.service_context());
    Ok(Json(service.load_invites(user_id).await?))
}

/// The caller's friends
///
/// GET /api/friends
pub async fn load_friends(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<UserListParams>,
) -> ApiResult<Json<Vec<PublicUserResponse>>> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = FriendService::new(state.service_context());
    Ok(Json(service.load_friends(user_id).await?))
}
