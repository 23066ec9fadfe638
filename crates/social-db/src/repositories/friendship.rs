//! PostgreSQL implementation of FriendshipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{instrument, warn};

use social_core::entities::{Friendship, FriendshipState};
use social_core::error::DomainError;
use social_core::traits::{FriendshipRepository, RepoResult};
use social_core::value_objects::Id;

use crate::models::FriendshipModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of FriendshipRepository
#[derive(Clone)]
pub struct PgFriendshipRepository {
    pool: PgPool,
}

impl PgFriendshipRepository {
    /// Create a new PgFriendshipRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Convert rows, dropping any whose state column is unreadable
fn into_friendships(rows: Vec<FriendshipModel>) -> Vec<Friendship> {
    rows.into_iter()
        .filter_map(|row| match Friendship::try_from(row) {
            Ok(f) => Some(f),
            Err(e) => {
                warn!(error = %e, "Skipping malformed friendship row");
                None
            }
        })
        .collect()
}

#[async_trait]
impl FriendshipRepository for PgFriendshipRepository {
    #[instrument(skip(self))]
    async fn find_between(&self, a: Id, b: Id) -> RepoResult<Option<Friendship>> {
        let result = sqlx::query_as::<_, FriendshipModel>(
            r"
            SELECT requester_id, addressee_id, state, created_at
            FROM friendships
            WHERE (requester_id = $1 AND addressee_id = $2)
               OR (requester_id = $2 AND addressee_id = $1)
            LIMIT 1
            ",
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Friendship::try_from).transpose()
    }

    #[instrument(skip(self, friendship), fields(requester = %friendship.requester_id, addressee = %friendship.addressee_id))]
    async fn create(&self, friendship: &Friendship) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO friendships (requester_id, addressee_id, state, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(friendship.requester_id.into_inner())
        .bind(friendship.addressee_id.into_inner())
        .bind(friendship.state.as_str())
        .bind(friendship.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::FriendshipExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn accept(&self, requester_id: Id, addressee_id: Id) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE friendships
            SET state = $3
            WHERE requester_id = $1 AND addressee_id = $2 AND state = $4
            ",
        )
        .bind(requester_id.into_inner())
        .bind(addressee_id.into_inner())
        .bind(FriendshipState::Accepted.as_str())
        .bind(FriendshipState::Pending.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FriendInviteNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, a: Id, b: Id) -> RepoResult<()> {
        sqlx::query(
            r"
            DELETE FROM friendships
            WHERE (requester_id = $1 AND addressee_id = $2)
               OR (requester_id = $2 AND addressee_id = $1)
            ",
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_pending_for(&self, user_id: Id) -> RepoResult<Vec<Friendship>> {
        let rows = sqlx::query_as::<_, FriendshipModel>(
            r"
            SELECT requester_id, addressee_id, state, created_at
            FROM friendships
            WHERE addressee_id = $1 AND state = $2
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .bind(FriendshipState::Pending.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(into_friendships(rows))
    }

    #[instrument(skip(self))]
    async fn find_accepted_for(&self, user_id: Id) -> RepoResult<Vec<Friendship>> {
        let rows = sqlx::query_as::<_, FriendshipModel>(
            r"
            SELECT requester_id, addressee_id, state, created_at
            FROM friendships
            WHERE (requester_id = $1 OR addressee_id = $1) AND state = $2
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .bind(FriendshipState::Accepted.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(into_friendships(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgFriendshipRepository>();
    }
}
