//! Group, membership and join request models -> entities

use social_core::entities::{Group, GroupMember, JoinRequest, MemberRole};
use social_core::error::DomainError;
use social_core::value_objects::Id;

use crate::models::{GroupMemberModel, GroupModel, JoinRequestModel};

impl From<GroupModel> for Group {
    fn from(model: GroupModel) -> Self {
        Group {
            id: Id::new(model.id),
            title: model.title,
            description: model.description,
            private: model.private,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl TryFrom<GroupMemberModel> for GroupMember {
    type Error = DomainError;

    fn try_from(model: GroupMemberModel) -> Result<Self, Self::Error> {
        let role = MemberRole::parse(&model.role).ok_or_else(|| {
            DomainError::DatabaseError(format!(
                "unknown role '{}' for member {} of group {}",
                model.role, model.user_id, model.group_id
            ))
        })?;

        Ok(GroupMember {
            group_id: Id::new(model.group_id),
            user_id: Id::new(model.user_id),
            role,
            joined_at: model.joined_at,
        })
    }
}

impl From<JoinRequestModel> for JoinRequest {
    fn from(model: JoinRequestModel) -> Self {
        JoinRequest {
            group_id: Id::new(model.group_id),
            user_id: Id::new(model.user_id),
            requested_at: model.requested_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn member_row(role: &str) -> GroupMemberModel {
        GroupMemberModel {
            group_id: 1,
            user_id: 2,
            role: role.to_string(),
            joined_at: Utc::now(),
        }
    }

    #[test]
    fn test_member_role_mapping() {
        let member = GroupMember::try_from(member_row("admin")).unwrap();
        assert!(member.is_admin());
        assert_eq!(member.user_id, Id::new(2));
    }

    #[test]
    fn test_unknown_role_is_an_error() {
        let err = GroupMember::try_from(member_row("moderator")).unwrap_err();
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}
