//! Notification model -> entity

use social_core::entities::Notification;
use social_core::value_objects::Id;

use crate::models::NotificationModel;

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: Id::new(model.id),
            notified_id: Id::new(model.notified_id),
            subject_id: Id::new(model.subject_id),
            group_id: Id::new(model.group_id),
            description: model.description,
            kind: model.kind,
            read: model.read,
            created_at: model.created_at,
        }
    }
}
