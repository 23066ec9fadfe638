//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for service inputs
//! - Response DTOs for serializing API outputs (camelCase)
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateGroupRequest, CreateNotificationRequest, CreatePostRequest, LoginRequest,
    RegisterRequest, UpdateGroupRequest, UpdatePostRequest, UpdateUserRequest,
};

pub use responses::{
    AuthResponse, CommentResponse, CurrentUserResponse, FriendshipResponse, GroupResponse,
    GroupSearchResponse, GroupWithCountsResponse, HealthChecks, HealthResponse,
    JoinRequestResponse, MemberResponse, NotificationResponse, PostResponse,
    PostWithCommentsResponse, PublicUserResponse, ReadinessResponse, UserIdResponse,
};

pub use mappers::PostView;
