//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{instrument, warn};

use social_core::entities::{GroupMember, MemberRole};
use social_core::error::DomainError;
use social_core::traits::{MemberRepository, RepoResult};
use social_core::value_objects::Id;

use crate::models::GroupMemberModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find(&self, group_id: Id, user_id: Id) -> RepoResult<Option<GroupMember>> {
        let result = sqlx::query_as::<_, GroupMemberModel>(
            r"
            SELECT group_id, user_id, role, joined_at
            FROM group_members
            WHERE group_id = $1 AND user_id = $2
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(GroupMember::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_group(&self, group_id: Id) -> RepoResult<Vec<GroupMember>> {
        let rows = sqlx::query_as::<_, GroupMemberModel>(
            r"
            SELECT group_id, user_id, role, joined_at
            FROM group_members
            WHERE group_id = $1
            ORDER BY joined_at
            ",
        )
        .bind(group_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        // One bad role value must not hide the rest of the roster
        Ok(rows
            .into_iter()
            .filter_map(|row| match GroupMember::try_from(row) {
                Ok(member) => Some(member),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed member row");
                    None
                }
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn admin_ids(&self, group_id: Id) -> RepoResult<Vec<Id>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT m.user_id
            FROM group_members m
            INNER JOIN users u ON u.id = m.user_id
            WHERE m.group_id = $1 AND m.role = $2 AND u.deleted_at IS NULL
            ORDER BY m.joined_at
            ",
        )
        .bind(group_id.into_inner())
        .bind(MemberRole::Admin.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Id::new).collect())
    }

    #[instrument(skip(self))]
    async fn is_member(&self, group_id: Id, user_id: Id) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM group_members WHERE group_id = $1 AND user_id = $2)
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, member), fields(group_id = %member.group_id, user_id = %member.user_id))]
    async fn create(&self, member: &GroupMember) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO group_members (group_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(member.group_id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(member.role.as_str())
        .bind(member.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_role(&self, group_id: Id, user_id: Id, role: MemberRole) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE group_members SET role = $3 WHERE group_id = $1 AND user_id = $2
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, group_id: Id, user_id: Id) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM group_members WHERE group_id = $1 AND user_id = $2
            ",
        )
        .bind(group_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound);
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
        assert_send_sync::<PgMemberRepository>();
    }
}
