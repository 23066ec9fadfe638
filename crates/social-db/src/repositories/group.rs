//! PostgreSQL implementation of GroupRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{Group, MemberRole};
use social_core::error::DomainError;
use social_core::traits::{GroupRepository, NewGroup, RepoResult};
use social_core::value_objects::Id;

use crate::models::GroupModel;

use super::error::map_db_error;

/// PostgreSQL implementation of GroupRepository
#[derive(Clone)]
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    /// Create a new PgGroupRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Group>> {
        let result = sqlx::query_as::<_, GroupModel>(
            r"
            SELECT id, title, description, private, created_at, updated_at
            FROM groups
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Id) -> RepoResult<Vec<Group>> {
        let results = sqlx::query_as::<_, GroupModel>(
            r"
            SELECT g.id, g.title, g.description, g.private, g.created_at, g.updated_at
            FROM groups g
            INNER JOIN group_members m ON m.group_id = g.id
            WHERE m.user_id = $1
            ORDER BY m.joined_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Group::from).collect())
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<Group>> {
        let results = sqlx::query_as::<_, GroupModel>(
            r"
            SELECT id, title, description, private, created_at, updated_at
            FROM groups
            WHERE title ILIKE '%' || $1 || '%'
            ORDER BY title
            LIMIT $2
            ",
        )
        .bind(term)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Group::from).collect())
    }

    #[instrument(skip(self, group), fields(title = %group.title))]
    async fn create_with_admin(&self, group: &NewGroup, admin_id: Id) -> RepoResult<Group> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, GroupModel>(
            r"
            INSERT INTO groups (title, description, private)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, private, created_at, updated_at
            ",
        )
        .bind(&group.title)
        .bind(&group.description)
        .bind(group.private)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO group_members (group_id, user_id, role)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(model.id)
        .bind(admin_id.into_inner())
        .bind(MemberRole::Admin.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Group::from(model))
    }

    #[instrument(skip(self, group), fields(group_id = %group.id))]
    async fn update(&self, group: &Group) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE groups
            SET title = $2, description = $3, private = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(group.id.into_inner())
        .bind(&group.title)
        .bind(&group.description)
        .bind(group.private)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GroupNotFound(group.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> RepoResult<()> {
        // Memberships, join requests and posts cascade
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GroupNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn member_count(&self, group_id: Id) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM group_members m
            INNER JOIN users u ON u.id = m.user_id
            WHERE m.group_id = $1 AND u.deleted_at IS NULL
            ",
        )
        .bind(group_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
