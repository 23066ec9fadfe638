//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Notification;
use social_core::error::DomainError;
use social_core::traits::{NewNotification, NotificationRepository, RepoResult};
use social_core::value_objects::Id;

use crate::models::NotificationModel;

use super::error::map_db_error;

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Notification>> {
        let result = sqlx::query_as::<_, NotificationModel>(
            r"
            SELECT id, notified_id, subject_id, group_id, description, kind, read, created_at
            FROM notifications
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Notification::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Id) -> RepoResult<Vec<Notification>> {
        let results = sqlx::query_as::<_, NotificationModel>(
            r"
            SELECT id, notified_id, subject_id, group_id, description, kind, read, created_at
            FROM notifications
            WHERE notified_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Notification::from).collect())
    }

    #[instrument(skip(self, notification), fields(notified_id = %notification.notified_id))]
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification> {
        let model = sqlx::query_as::<_, NotificationModel>(
            r"
            INSERT INTO notifications (notified_id, subject_id, group_id, description, kind)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, notified_id, subject_id, group_id, description, kind, read, created_at
            ",
        )
        .bind(notification.notified_id.into_inner())
        .bind(notification.subject_id.into_inner())
        .bind(notification.group_id.into_inner())
        .bind(&notification.description)
        .bind(&notification.kind)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Notification::from(model))
    }

    #[instrument(skip(self, notification), fields(notification_id = %notification.id))]
    async fn update(&self, notification: &Notification) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE notifications
            SET subject_id = $2, group_id = $3, description = $4, kind = $5, read = $6
            WHERE id = $1
            ",
        )
        .bind(notification.id.into_inner())
        .bind(notification.subject_id.into_inner())
        .bind(notification.group_id.into_inner())
        .bind(&notification.description)
        .bind(&notification.kind)
        .bind(notification.read)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotificationNotFound(notification.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotificationNotFound(id));
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
        assert_send_sync::<PgNotificationRepository>();
    }
}
