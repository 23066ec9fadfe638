//! # social-service
//!
//! Application layer: the token service, the authorization predicates and
//! one service per resource family, plus the DTOs they exchange with the API.

pub mod dto;
pub mod memory;
pub mod services;

pub use memory::{in_memory_context, in_memory_context_with, MemoryStore};
pub use services::{
    AuthService, AuthorizationService, CommentService, FriendService, GroupService,
    NotificationService, PostService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, TokenService, TokenStatus, UserService, DEFAULT_NOTIFICATION_GROUP_ID,
};
