//! PostgreSQL implementation of JoinRequestRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::JoinRequest;
use social_core::error::DomainError;
use social_core::traits::{JoinRequestRepository, RepoResult};
use social_core::value_objects::Id;

use crate::models::JoinRequestModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of JoinRequestRepository
#[derive(Clone)]
pub struct PgJoinRequestRepository {
    pool: PgPool,
}

impl PgJoinRequestRepository {
    /// Create a new PgJoinRequestRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JoinRequestRepository for PgJoinRequestRepository {
    #[instrument(skip(self))]
    async fn find(&self, group_id: Id, user_id: Id) -> RepoResult<Option<JoinRequest>> {
        let result = sqlx::query_as::<_, JoinRequestModel>(
            r"
            SELECT group_id, user_id, requested_at
            FROM group_join_requests
            WHERE group_id = $1 AND user_id = $2
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(JoinRequest::from))
    }

    #[instrument(skip(self))]
    async fn find_by_group(&self, group_id: Id) -> RepoResult<Vec<JoinRequest>> {
        let results = sqlx::query_as::<_, JoinRequestModel>(
            r"
            SELECT group_id, user_id, requested_at
            FROM group_join_requests
            WHERE group_id = $1
            ORDER BY requested_at
            ",
        )
        .bind(group_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(JoinRequest::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, group_id: Id, user_id: Id) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO group_join_requests (group_id, user_id) VALUES ($1, $2)
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::JoinRequestExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, group_id: Id, user_id: Id) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM group_join_requests WHERE group_id = $1 AND user_id = $2
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::JoinRequestNotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgJoinRequestRepository>();
    }
}
