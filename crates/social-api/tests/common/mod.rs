//! Test helpers for API tests
//!
//! Builds the full application over an in-memory store and drives it with
//! `tower::ServiceExt::oneshot`, so no PostgreSQL or Redis is needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use social_api::{create_app, AppState};
use social_common::{AppConfig, JwtService};
use social_service::{in_memory_context_with, MemoryStore};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "api-test-secret";
pub const PASSWORD: &str = "password123";

/// A registered account
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub token: String,
}

/// The application under test with direct access to its store
pub struct TestApp {
    app: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let jwt = JwtService::new(TEST_SECRET, 3600, 7200);
        let ctx = in_memory_context_with(Arc::clone(&store), jwt);
        let state = AppState::new(ctx, AppConfig::with_jwt_secret(TEST_SECRET));

        Self {
            app: create_app(state),
            store,
        }
    }

    /// Send a request and decode the JSON body (`Null` when empty)
    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = self
            .app
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, token).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token).await
    }

    /// Register `username` and return its id and token
    pub async fn register(&self, username: &str) -> TestUser {
        let uri = format!(
            "/api/users/register?username={username}&email={username}@example.com&password={PASSWORD}"
        );
        let (status, body) = self.post(&uri, None).await;
        assert_eq!(status, StatusCode::CREATED, "register {username}: {body}");

        TestUser {
            id: body["user"]["id"].as_i64().unwrap(),
            username: username.to_string(),
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Create a group owned by `owner` and return its id
    pub async fn create_group(&self, owner: &TestUser, title: &str, private: bool) -> i64 {
        let title = title.replace(' ', "%20");
        let uri = format!(
            "/api/groups?title={title}&description=about&private={private}&userId={}",
            owner.id
        );
        let (status, body) = self.post(&uri, Some(&owner.token)).await;
        assert_eq!(status, StatusCode::CREATED, "create group: {body}");
        body["id"].as_i64().unwrap()
    }

    /// Publish a post and return its id
    pub async fn create_post(&self, author: &TestUser, group_id: i64, location: &str) -> i64 {
        let uri = format!(
            "/api/posts?userId={}&groupId={group_id}&title=Hello&postContent=First&location={location}&category=news",
            author.id
        );
        let (status, body) = self.post(&uri, Some(&author.token)).await;
        assert_eq!(status, StatusCode::CREATED, "create post: {body}");
        body["id"].as_i64().unwrap()
    }
}

/// Assert the boundary 401 body
pub fn assert_invalid_token(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, &serde_json::json!({ "reason": "Invalid token" }));
}

/// Assert the boundary 400 body
pub fn assert_invalid_request(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["reason"], "Invalid Request");
    assert!(body["detail"].is_string());
}
