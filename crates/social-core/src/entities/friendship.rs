//! Friendship entity - a directed invite that becomes mutual once accepted

use chrono::{DateTime, Utc};

use crate::value_objects::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FriendshipState {
    Pending,
    Accepted,
}

impl FriendshipState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            _ => None,
        }
    }
}

/// Relation between two users. `requester_id` sent the invite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friendship {
    pub requester_id: Id,
    pub addressee_id: Id,
    pub state: FriendshipState,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    pub fn new(requester_id: Id, addressee_id: Id, state: FriendshipState) -> Self {
        Self {
            requester_id,
            addressee_id,
            state,
            created_at: Utc::now(),
        }
    }

    /// Whether the relation connects the two users, in either direction
    pub fn connects(&self, a: Id, b: Id) -> bool {
        (self.requester_id == a && self.addressee_id == b)
            || (self.requester_id == b && self.addressee_id == a)
    }

    /// The other side of the relation, seen from `user_id`
    pub fn other(&self, user_id: Id) -> Id {
        if self.requester_id == user_id {
            self.addressee_id
        } else {
            self.requester_id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connects_both_directions() {
        let f = Friendship::new(Id::new(1), Id::new(2), FriendshipState::Pending);
        assert!(f.connects(Id::new(1), Id::new(2)));
        assert!(f.connects(Id::new(2), Id::new(1)));
        assert!(!f.connects(Id::new(1), Id::new(3)));
        assert_eq!(f.other(Id::new(2)), Id::new(1));
    }

    #[test]
    fn test_state_text() {
        assert_eq!(FriendshipState::parse("accepted"), Some(FriendshipState::Accepted));
        assert_eq!(FriendshipState::parse("blocked"), None);
    }
}
