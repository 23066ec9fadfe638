//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::sync::Arc;

use axum::Router;
use social_cache::{RedisPool, RedisSessionStore};
use social_common::{AppConfig, AppError, JwtService};
use social_db::{
    create_pool, run_migrations, PgCommentRepository, PgFriendshipRepository, PgGroupRepository,
    PgJoinRequestRepository, PgMemberRepository, PgNotificationRepository, PgPostRepository,
    PgUserRepository, PoolOptions,
};
use social_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_edge_middleware, apply_middleware};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes get request IDs and tracing but skip CORS and the rate limiter.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let api = apply_middleware(create_router(), &config.http);
    let api = apply_edge_middleware(
        api,
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes(), &config.http);

    api.merge(health).with_state(state)
}

/// Connect to PostgreSQL and Redis and assemble the service context
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database, &PoolOptions::default())
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.migrations.run_on_startup {
        run_migrations(&pool, &config.migrations.dir)
            .await
            .map_err(|e| AppError::Database(format!("migrations failed: {e}")))?;
    }

    info!("Connecting to Redis...");
    let redis_pool =
        RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis pool created");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.remember_token_expiry,
    ));

    let service_context = ServiceContext::builder()
        .pool(pool.clone())
        .redis_pool(redis_pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .friendship_repo(Arc::new(PgFriendshipRepository::new(pool.clone())))
        .group_repo(Arc::new(PgGroupRepository::new(pool.clone())))
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .join_request_repo(Arc::new(PgJoinRequestRepository::new(pool.clone())))
        .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool)))
        .session_store(Arc::new(RedisSessionStore::new(redis_pool)))
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until it fails
pub async fn run_server(app: Router, address: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, &address).await
}
