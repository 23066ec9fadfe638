//! # social-db
//!
//! Database layer implementing the social-core repository traits with PostgreSQL via SQLx.
//!
//! - Connection pool management and runtime migrations
//! - Database models with SQLx `FromRow` derives
//! - Model -> entity mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use social_db::{create_pool, run_migrations, PgUserRepository, PoolOptions};
//!
//! let pool = create_pool(&config.database, &PoolOptions::default()).await?;
//! run_migrations(&pool, &config.migrations.dir).await?;
//! let users = PgUserRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolOptions};
pub use repositories::{
    PgCommentRepository, PgFriendshipRepository, PgGroupRepository, PgJoinRequestRepository,
    PgMemberRepository, PgNotificationRepository, PgPostRepository, PgUserRepository,
};
