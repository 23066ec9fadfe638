//! # social-cache
//!
//! Redis layer holding the server-side sessions behind issued bearer tokens.
//!
//! ## Example
//!
//! ```ignore
//! use social_cache::{RedisPool, RedisSessionStore};
//!
//! let pool = RedisPool::from_config(&config.redis)?;
//! let sessions = RedisSessionStore::new(pool.clone());
//!
//! sessions.store(&Session::new(sid, user_id), 86_400).await?;
//! ```

pub mod pool;
pub mod session;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use session::RedisSessionStore;
