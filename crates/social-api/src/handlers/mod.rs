//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod auth;
pub mod comments;
pub mod friends;
pub mod groups;
pub mod health;
pub mod notifications;
pub mod posts;
pub mod users;
