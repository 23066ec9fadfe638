//! # social-api
//!
//! REST API server built with Axum. Every endpoint reads its parameters
//! from the query string and authenticates through a bearer token.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod params;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
