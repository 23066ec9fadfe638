//! Friendship model -> entity

use social_core::entities::{Friendship, FriendshipState};
use social_core::error::DomainError;
use social_core::value_objects::Id;

use crate::models::FriendshipModel;

impl TryFrom<FriendshipModel> for Friendship {
    type Error = DomainError;

    fn try_from(model: FriendshipModel) -> Result<Self, Self::Error> {
        let state = FriendshipState::parse(&model.state).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown friendship state '{}'", model.state))
        })?;

        Ok(Friendship {
            requester_id: Id::new(model.requester_id),
            addressee_id: Id::new(model.addressee_id),
            state,
            created_at: model.created_at,
        })
    }
}
