//! Notification endpoint parameters

use serde::Deserialize;
use social_core::Id;
use social_service::{dto::CreateNotificationRequest, DEFAULT_NOTIFICATION_GROUP_ID};
use validator::Validate;

/// `POST /notifications`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationParams {
    pub notified_id: Id,
    pub subject_id: Id,
    pub group_id: Option<Id>,
    pub desc: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<CreateNotificationParams> for CreateNotificationRequest {
    fn from(p: CreateNotificationParams) -> Self {
        Self {
            notified_id: p.notified_id,
            subject_id: p.subject_id,
            group_id: p.group_id.unwrap_or(DEFAULT_NOTIFICATION_GROUP_ID),
            description: p.desc,
            kind: p.kind,
        }
    }
}

/// `GET`, `PUT` and `DELETE /notifications`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoteParams {
    pub note_id: Id,
}

/// `GET /notifications/list`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsParams {
    pub user_id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_defaults() {
        let params = CreateNotificationParams {
            notified_id: Id::new(2),
            subject_id: Id::new(3),
            group_id: None,
            desc: "bob liked your post".to_string(),
            kind: "like".to_string(),
        };
        let request = CreateNotificationRequest::from(params);
        assert_eq!(request.group_id, Id::new(69));
        assert_eq!(request.description, "bob liked your post");
    }
}
