//! Comment service

use social_core::{Comment, DomainError, Id, NewComment};
use tracing::{info, instrument};

use crate::dto::CommentResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::post::PostService;

/// Longest comment body accepted
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a post the user can see
    #[instrument(skip(self, content))]
    pub async fn create_comment(
        &self,
        post_id: Id,
        user_id: Id,
        content: &str,
    ) -> ServiceResult<CommentResponse> {
        let content = checked_content(content)?;
        PostService::new(self.ctx).visible_post(post_id, user_id).await?;

        let comment = self
            .ctx
            .comment_repo()
            .create(&NewComment {
                post_id,
                author_id: user_id,
                content,
            })
            .await?;

        info!(comment_id = %comment.id, post_id = %post_id, "Comment created");
        Ok(CommentResponse::from(comment))
    }

    #[instrument(skip(self))]
    pub async fn load_comment(&self, comment_id: Id) -> ServiceResult<CommentResponse> {
        let comment = self.get_comment_entity(comment_id).await?;
        Ok(CommentResponse::from(comment))
    }

    /// Replace the body; `None` leaves the comment as it is
    #[instrument(skip(self, content))]
    pub async fn update_comment(
        &self,
        comment_id: Id,
        content: Option<&str>,
    ) -> ServiceResult<CommentResponse> {
        let mut comment = self.get_comment_entity(comment_id).await?;

        if let Some(content) = content {
            comment.set_content(checked_content(content)?);
            self.ctx.comment_repo().update(&comment).await?;
            info!(comment_id = %comment_id, "Comment updated");
        }

        Ok(CommentResponse::from(comment))
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(&self, comment_id: Id) -> ServiceResult<()> {
        self.ctx.comment_repo().delete(comment_id).await?;
        info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }

    /// Get comment entity by ID
    pub async fn get_comment_entity(&self, comment_id: Id) -> ServiceResult<Comment> {
        Ok(self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?)
    }
}

fn checked_content(content: &str) -> ServiceResult<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ServiceError::validation("Comment cannot be empty"));
    }
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(ServiceError::validation(format!(
            "Comment must be at most {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(content.to_string())
}
