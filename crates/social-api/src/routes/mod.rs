//! Route definitions
//!
//! All API routes organized by resource and mounted under /api.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{auth, comments, friends, groups, health, notifications, posts, users};
use crate::state::AppState;

/// Create the API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(friend_routes())
        .merge(group_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .merge(notification_routes())
}

/// Account and profile routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(auth::register))
        .route("/users/login", post(auth::login))
        .route("/users/logout", post(auth::logout))
        .route(
            "/users",
            get(users::load_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/search", get(users::search_user))
        .route("/users/avatar", put(users::update_avatar))
        .route("/users/id", get(users::load_user_id))
        .route("/users/groups", get(users::load_user_groups))
}

/// Friend routes
fn friend_routes() -> Router<AppState> {
    Router::new()
        .route("/friends", get(friends::load_friends).post(friends::add_friend))
        .route("/friends/invite", post(friends::invite_friend))
        .route("/friends/invites", get(friends::load_invites))
        .route("/friends/respond", post(friends::respond_to_invite))
}

/// Group routes
fn group_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/groups",
            get(groups::load_group)
                .post(groups::create_group)
                .put(groups::edit_group)
                .delete(groups::delete_group),
        )
        // Membership
        .route("/groups/join", get(groups::join_group))
        .route("/groups/leave", get(groups::leave_group))
        .route("/groups/search", get(groups::search_groups))
        .route("/groups/posts", get(groups::load_group_posts))
        .route("/groups/members", get(groups::load_group_members))
        .route("/groups/promote", get(groups::promote_member))
        .route("/groups/demote", get(groups::demote_member))
        // Join requests
        .route("/groups/requests", get(groups::load_join_requests))
        .route("/groups/requests/new", get(groups::request_group_invite))
        .route("/groups/requests/accept", get(groups::accept_join_request))
        .route("/groups/requests/decline", get(groups::decline_join_request))
}

/// Feed and post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/feed", get(posts::load_feed))
        .route(
            "/posts",
            get(posts::load_post)
                .post(posts::create_post)
                .put(posts::edit_post)
                .delete(posts::remove_post),
        )
        .route("/posts/like", get(posts::like_post))
        .route("/posts/unlike", get(posts::unlike_post))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/comments",
        get(comments::load_comment)
            .post(comments::create_comment)
            .put(comments::update_comment)
            .delete(comments::delete_comment),
    )
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(notifications::load_notification)
                .post(notifications::create_note)
                .put(notifications::update_notification)
                .delete(notifications::delete_notification),
        )
        .route("/notifications/list", get(notifications::load_notifications))
}
