//! Notification service

use social_core::{DomainError, Id, NewNotification, Notification};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateNotificationRequest, NotificationResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Group id recorded when a notification is created without one
pub const DEFAULT_NOTIFICATION_GROUP_ID: Id = Id::new(69);

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(notified_id = %request.notified_id, kind = %request.kind))]
    pub async fn create_note(
        &self,
        request: CreateNotificationRequest,
    ) -> ServiceResult<NotificationResponse> {
        request.validate()?;

        let note = self
            .ctx
            .notification_repo()
            .create(&NewNotification {
                notified_id: request.notified_id,
                subject_id: request.subject_id,
                group_id: request.group_id,
                description: request.description,
                kind: request.kind,
            })
            .await?;

        info!(notification_id = %note.id, "Notification created");
        Ok(NotificationResponse::from(note))
    }

    #[instrument(skip(self))]
    pub async fn load_notification(&self, note_id: Id) -> ServiceResult<NotificationResponse> {
        let note = self.get_notification_entity(note_id).await?;
        Ok(NotificationResponse::from(note))
    }

    /// Mark a notification read
    #[instrument(skip(self))]
    pub async fn update_notification(&self, note_id: Id) -> ServiceResult<NotificationResponse> {
        let mut note = self.get_notification_entity(note_id).await?;
        if !note.read {
            note.mark_read();
            self.ctx.notification_repo().update(&note).await?;
        }
        Ok(NotificationResponse::from(note))
    }

    #[instrument(skip(self))]
    pub async fn delete_notification(&self, note_id: Id) -> ServiceResult<()> {
        self.ctx.notification_repo().delete(note_id).await?;
        info!(notification_id = %note_id, "Notification deleted");
        Ok(())
    }

    /// Notifications addressed to a user, newest first
    #[instrument(skip(self))]
    pub async fn load_notifications(
        &self,
        user_id: Id,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let notes = self.ctx.notification_repo().find_by_user(user_id).await?;
        Ok(notes.into_iter().map(NotificationResponse::from).collect())
    }

    /// Get notification entity by ID
    pub async fn get_notification_entity(&self, note_id: Id) -> ServiceResult<Notification> {
        Ok(self
            .ctx
            .notification_repo()
            .find_by_id(note_id)
            .await?
            .ok_or(DomainError::NotificationNotFound(note_id))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::in_memory_context;
    use social_common::JwtService;

    fn note_for(user: i64, kind: &str) -> CreateNotificationRequest {
        CreateNotificationRequest {
            notified_id: Id::new(user),
            subject_id: Id::new(9),
            group_id: DEFAULT_NOTIFICATION_GROUP_ID,
            description: "bob liked your post".to_string(),
            kind: kind.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_read_and_list() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let notes = NotificationService::new(&ctx);

        let first = notes.create_note(note_for(1, "like")).await.unwrap();
        let second = notes.create_note(note_for(1, "comment")).await.unwrap();
        notes.create_note(note_for(2, "like")).await.unwrap();
        assert!(!first.read);
        assert_eq!(first.group_id, Id::new(69));

        let read = notes.update_notification(first.id).await.unwrap();
        assert!(read.read);
        assert!(notes.load_notification(first.id).await.unwrap().read);

        let listed = notes.load_notifications(Id::new(1)).await.unwrap();
        let ids: Vec<Id> = listed.iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&first.id) && ids.contains(&second.id));
    }

    #[tokio::test]
    async fn test_delete_missing_notification() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let err = NotificationService::new(&ctx)
            .delete_notification(Id::new(77))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_empty_type_rejected() {
        let ctx = in_memory_context(JwtService::new("secret", 3600, 7200));
        let err = NotificationService::new(&ctx)
            .create_note(note_for(1, ""))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
