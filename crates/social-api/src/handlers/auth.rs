//! Authentication handlers
//!
//! Endpoints for registration, login and logout.

use axum::{extract::State, Json};
use social_service::{dto::AuthResponse, AuthService};

use crate::extractors::{Caller, Params};
use crate::params::{LoginParams, RegisterParams};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new user
///
/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    Params(params): Params<RegisterParams>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(params.into()).await?;
    Ok(Created(Json(response)))
}

/// Login with username or email
///
/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    Params(params): Params<LoginParams>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(params.into()).await?;
    Ok(Json(response))
}

/// Logout (revoke the presented session)
///
/// POST /api/users/logout
pub async fn logout(State(state): State<AppState>, caller: Caller) -> ApiResult<NoContent> {
    caller.authenticate(&state).await?;
    let token = caller.token().ok_or(ApiError::InvalidToken)?;

    let service = AuthService::new(state.service_context());
    service.logout(token).await?;
    Ok(NoContent)
}
