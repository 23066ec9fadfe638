//! Redis connection pool using deadpool-redis.
//!
//! Everything the session store writes expires, so the JSON helpers here
//! always take a TTL.

use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;

/// Pool settings derived from the application's Redis config
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    /// Connection URL, e.g. `redis://localhost:6379`
    pub url: String,
    pub max_connections: usize,
}

impl From<&social_common::RedisConfig> for RedisPoolConfig {
    fn from(config: &social_common::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: usize::try_from(config.max_connections).unwrap_or(usize::MAX),
        }
    }
}

/// Error type for Redis pool operations
#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Failed to create Redis pool: {0}")]
    CreatePool(String),

    #[error("Failed to get connection from pool: {0}")]
    GetConnection(#[from] deadpool_redis::PoolError),

    #[error("Redis command error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TTL out of range: {0}")]
    InvalidTtl(u64),
}

/// Result type for Redis pool operations
pub type RedisResult<T> = Result<T, RedisPoolError>;

fn ttl_arg(ttl_seconds: u64) -> RedisResult<i64> {
    i64::try_from(ttl_seconds).map_err(|_| RedisPoolError::InvalidTtl(ttl_seconds))
}

/// Managed Redis connection pool
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisPool")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}

impl RedisPool {
    /// Build the pool; connections are opened lazily on first use
    pub fn new(config: &RedisPoolConfig) -> RedisResult<Self> {
        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?;

        // Never log credentials
        let host = config.url.rsplit('@').next().unwrap_or_default();
        tracing::info!(
            host = %host,
            max_connections = config.max_connections,
            "Redis pool created"
        );

        Ok(Self { pool })
    }

    pub fn from_config(config: &social_common::RedisConfig) -> RedisResult<Self> {
        Self::new(&RedisPoolConfig::from(config))
    }

    /// Check out a connection
    pub async fn get(&self) -> RedisResult<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }

    /// Ping Redis; used by the readiness probe
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.get().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    /// Store `value` as JSON under `key`, expiring after `ttl_seconds`
    pub async fn put_json<V: serde::Serialize>(
        &self,
        key: &str,
        value: &V,
        ttl_seconds: u64,
    ) -> RedisResult<()> {
        let payload = serde_json::to_string(value)?;
        let mut conn = self.get().await?;
        conn.set_ex::<_, _, ()>(key, payload, ttl_seconds).await?;
        Ok(())
    }

    /// Read a JSON value; a missing or expired key is `None`
    pub async fn get_json<V: serde::de::DeserializeOwned>(&self, key: &str) -> RedisResult<Option<V>> {
        let mut conn = self.get().await?;
        let payload: Option<String> = conn.get(key).await?;
        Ok(payload.map(|p| serde_json::from_str(&p)).transpose()?)
    }

    /// Delete keys, returning how many existed
    pub async fn delete(&self, keys: &[String]) -> RedisResult<u32> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.get().await?;
        let deleted: u32 = conn.del(keys).await?;
        Ok(deleted)
    }

    /// Raise a key's TTL to `ttl_seconds`; never shortens it
    pub async fn extend_ttl(&self, key: &str, ttl_seconds: u64) -> RedisResult<()> {
        let ttl = ttl_arg(ttl_seconds)?;
        let mut conn = self.get().await?;
        let remaining: i64 = conn.ttl(key).await?;
        if remaining < ttl {
            conn.expire::<_, ()>(key, ttl).await?;
        }
        Ok(())
    }
}
