//! Notification handlers
//!
//! All endpoints need a valid token and nothing more.

use axum::{extract::State, Json};
use social_service::{dto::NotificationResponse, NotificationService};

use crate::extractors::{Caller, Params};
use crate::params::{CreateNotificationParams, NoteParams, NotificationsParams};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a notification
///
/// POST /api/notifications
pub async fn create_note(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<CreateNotificationParams>,
) -> ApiResult<Created<Json<NotificationResponse>>> {
    caller.authenticate(&state).await?;

    let service = NotificationService::new(state.service_context());
    let response = service.create_note(params.into()).await?;
    Ok(Created(Json(response)))
}

/// Get a notification
///
/// GET /api/notifications
pub async fn load_notification(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<NoteParams>,
) -> ApiResult<Json<NotificationResponse>> {
    caller.authenticate(&state).await?;

    let service = NotificationService::new(state.service_context());
    Ok(Json(service.load_notification(params.note_id).await?))
}

/// Mark a notification read
///
/// PUT /api/notifications
pub async fn update_notification(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<NoteParams>,
) -> ApiResult<Json<NotificationResponse>> {
    caller.authenticate(&state).await?;

    let service = NotificationService::new(state.service_context());
    Ok(Json(service.update_notification(params.note_id).await?))
}

/// Delete a notification
///
/// DELETE /api/notifications
pub async fn delete_notification(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<NoteParams>,
) -> ApiResult<NoContent> {
    caller.authenticate(&state).await?;

    let service = NotificationService::new(state.service_context());
    service.delete_notification(params.note_id).await?;
    Ok(NoContent)
}

/// A user's notifications, newest first
///
/// GET /api/notifications/list
pub async fn load_notifications(
    State(state): State<AppState>,
    caller: Caller,
    Params(params): Params<NotificationsParams>,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    caller.authenticate(&state).await?;

    let service = NotificationService::new(state.service_context());
    Ok(Json(service.load_notifications(params.user_id).await?))
}
