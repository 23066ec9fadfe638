//! User handlers
//!
//! Endpoints for profiles and user lookup.

use axum::{extract::State, Json};
use social_service::{
    dto::{CurrentUserResponse, GroupResponse, PublicUserResponse, UserIdResponse},
    GroupService, UserService,
};

use crate::extractors::{Caller, Params};
use crate::params::{
    AvatarParams, DeleteUserParams, SearchUserParams, UpdateUserParams, UserGroupsParams,
    UserIdParams, UserParams,
};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Get a user's public profile
///
/// GET /api/users
pub async fn load_user(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<UserParams>,
) -> ApiResult<Json<PublicUserResponse>> {
    caller.authenticate(&state).await?;

    let service = UserService::new(state.service_context());
    let response = service.load_user(params.user_id).await?;
    Ok(Json(response))
}

/// Search users by name
///
/// GET /api/users/search
pub async fn search_user(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<SearchUserParams>,
) -> ApiResult<Json<Vec<PublicUserResponse>>> {
    caller.authenticate(&state).await?;

    let service = UserService::new(state.service_context());
    let response = service
        .search_user(&params.username, params.user_id)
        .await?;
    Ok(Json(response))
}

/// Update the caller's profile
///
/// PUT /api/users
pub async fn update_user(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<UpdateUserParams>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let (raw_user_id, request) = params.into_parts();
    let user_id = caller.ensure_is(&state, &raw_user_id).await?;

    let service = UserService::new(state.service_context());
    let response = service.update_user_details(user_id, request).await?;
    Ok(Json(response))
}

/// Delete the caller's account
///
/// DELETE /api/users
pub async fn delete_user(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<DeleteUserParams>,
) -> ApiResult<NoContent> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = UserService::new(state.service_context());
    service.delete_user(user_id).await?;
    Ok(NoContent)
}

/// Set or clear the caller's avatar
///
/// PUT /api/users/avatar
pub async fn update_avatar(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<AvatarParams>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = UserService::new(state.service_context());
    let response = service.update_avatar(user_id, &params.url).await?;
    Ok(Json(response))
}

/// Resolve a username to its id
///
/// GET /api/users/id
pub async fn load_user_id(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<UserIdParams>,
) -> ApiResult<Json<UserIdResponse>> {
    caller.authenticate(&state).await?;

    let service = UserService::new(state.service_context());
    let response = service.get_user_id(params.username.trim()).await?;
    Ok(Json(response))
}

/// Groups a user belongs to
///
/// GET /api/users/groups
pub async fn load_user_groups(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<UserGroupsParams>,
) -> ApiResult<Json<Vec<GroupResponse>>> {
    caller.authenticate(&state).await?;

    let service = GroupService::new(state.service_context());
    let response = service.get_users_groups(params.user_id).await?;
    Ok(Json(response))
}
