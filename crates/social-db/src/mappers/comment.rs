//! Comment model -> entity

use social_core::entities::Comment;
use social_core::value_objects::Id;

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Id::new(model.id),
            post_id: Id::new(model.post_id),
            author_id: Id::new(model.author_id),
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
