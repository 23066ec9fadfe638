//! Post model -> entity

use social_core::entities::Post;
use social_core::value_objects::Id;

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Id::new(model.id),
            group_id: Id::new(model.group_id),
            author_id: Id::new(model.author_id),
            title: model.title,
            content: model.content,
            location: model.location,
            category: model.category,
            liked_by: model.liked_by.into_iter().map(Id::new).collect(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
