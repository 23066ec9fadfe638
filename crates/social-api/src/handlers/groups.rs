//! Group handlers
//!
//! Endpoints for groups, membership and join requests.

use axum::{extract::State, Json};
use social_service::{
    dto::{
        GroupResponse, GroupSearchResponse, GroupWithCountsResponse, JoinRequestResponse,
        MemberResponse, PostResponse,
    },
    GroupService,
};

use crate::extractors::{Caller, Params};
use crate::params::{
    CreateGroupParams, DemoteParams, EditGroupParams, GroupAdminParams, GroupMemberParams,
    GroupParams, JoinRequestParams, PromoteParams, SearchGroupsParams,
};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Get a group with its member count and admins
///
/// GET /api/groups
pub async fn load_group(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<GroupParams>,
) -> ApiResult<Json<GroupWithCountsResponse>> {
    caller.authenticate(&state).await?;

    let service = GroupService::new(state.service_context());
    Ok(Json(service.load_group(params.group_id).await?))
}

/// Create a group
///
/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<CreateGroupParams>,
) -> ApiResult<Created<Json<GroupResponse>>> {
    caller.authenticate(&state).await?;
    let (request, user_id) = params.into_parts();

    let service = GroupService::new(state.service_context());
    let response = service.create_group(request, user_id).await?;
    Ok(Created(Json(response)))
}

/// Edit a group; admins only
///
/// PUT /api/groups
pub async fn edit_group(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<EditGroupParams>,
) -> ApiResult<Json<GroupResponse>> {
    let (raw_group_id, request) = params.into_parts();
    let group_id = caller.ensure_group_admin(&state, &raw_group_id).await?;

    let service = GroupService::new(state.service_context());
    Ok(Json(service.edit_group(group_id, request).await?))
}

/// Delete a group; admins only
///
/// DELETE /api/groups
pub async fn delete_group(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<GroupAdminParams>,
) -> ApiResult<NoContent> {
    let group_id = caller.ensure_group_admin(&state, &params.group_id).await?;

    let service = GroupService::new(state.service_context());
    service.delete_group(group_id).await?;
    Ok(NoContent)
}

/// Join a public group
///
/// GET /api/groups/join
pub async fn join_group(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<GroupMemberParams>,
) -> ApiResult<Json<MemberResponse>> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = GroupService::new(state.service_context());
    Ok(Json(service.join_group(params.group_id, user_id).await?))
}

/// Leave a group
///
/// GET /api/groups/leave
pub async fn leave_group(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<GroupMemberParams>,
) -> ApiResult<NoContent> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = GroupService::new(state.service_context());
    service.leave_group(params.group_id, user_id).await?;
    Ok(NoContent)
}

/// Search groups by title
///
/// GET /api/groups/search
pub async fn search_groups(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<SearchGroupsParams>,
) -> ApiResult<Json<Vec<GroupSearchResponse>>> {
    caller.authenticate(&state).await?;

    let service = GroupService::new(state.service_context());
    let response = service.search_groups(&params.search, params.user_id).await?;
    Ok(Json(response))
}

/// Newest posts of a group
///
/// GET /api/groups/posts
pub async fn load_group_posts(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<GroupMemberParams>,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = GroupService::new(state.service_context());
    Ok(Json(service.load_group_posts(params.group_id, user_id).await?))
}

/// Members of a group
///
/// GET /api/groups/members
pub async fn load_group_members(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<GroupParams>,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    caller.authenticate(&state).await?;

    let service = GroupService::new(state.service_context());
    Ok(Json(service.load_group_members(params.group_id).await?))
}

/// Make a member an admin; admins only
///
/// GET /api/groups/promote
pub async fn promote_member(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<PromoteParams>,
) -> ApiResult<Json<MemberResponse>> {
    let group_id = caller.ensure_group_admin(&state, &params.group_id).await?;

    let service = GroupService::new(state.service_context());
    let response = service
        .promote_member(group_id, params.user_id, params.promote_id)
        .await?;
    Ok(Json(response))
}

/// Return an admin to plain membership; admins only
///
/// GET /api/groups/demote
pub async fn demote_member(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<DemoteParams>,
) -> ApiResult<Json<MemberResponse>> {
    let group_id = caller.ensure_group_admin(&state, &params.group_id).await?;

    let service = GroupService::new(state.service_context());
    let response = service
        .demote_member(group_id, params.user_id, params.demote_id)
        .await?;
    Ok(Json(response))
}

/// Pending join requests; admins only
///
/// GET /api/groups/requests
pub async fn load_join_requests(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<GroupAdminParams>,
) -> ApiResult<Json<Vec<JoinRequestResponse>>> {
    let group_id = caller.ensure_group_admin(&state, &params.group_id).await?;

    let service = GroupService::new(state.service_context());
    Ok(Json(service.load_join_request(group_id).await?))
}

/// Ask to join a group
///
/// GET /api/groups/requests/new
pub async fn request_group_invite(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<GroupMemberParams>,
) -> ApiResult<Created<Json<JoinRequestResponse>>> {
    let user_id = caller.ensure_is(&state, &params.user_id).await?;

    let service = GroupService::new(state.service_context());
    let response = service.request_group_invite(params.group_id, user_id).await?;
    Ok(Created(Json(response)))
}

/// Admit the requesting user; admins only
///
/// GET /api/groups/requests/accept
pub async fn accept_join_request(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<JoinRequestParams>,
) -> ApiResult<Json<MemberResponse>> {
    let group_id = caller.ensure_group_admin(&state, &params.group_id).await?;

    let service = GroupService::new(state.service_context());
    let response = service.accept_join_request(group_id, params.user_id).await?;
    Ok(Json(response))
}

/// Drop a join request; admins only
///
/// GET /api/groups/requests/decline
pub async fn decline_join_request(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<JoinRequestParams>,
) -> ApiResult<NoContent> {
    let group_id = caller.ensure_group_admin(&state, &params.group_id).await?;

    let service = GroupService::new(state.service_context());
    service.decline_join_request(group_id, params.user_id).await?;
    Ok(NoContent)
}
