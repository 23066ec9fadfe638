//! User model -> entity

use social_core::entities::User;
use social_core::value_objects::Id;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Id::new(model.id),
            username: model.username,
            email: model.email,
            bio: model.bio,
            avatar_url: model.avatar_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
