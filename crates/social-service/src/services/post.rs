//! Post service
//!
//! Feeds, post CRUD and likes. Posts in a private group are only visible
//! to that group's members.

use social_core::{DomainError, FeedFilter, Id, NewPost, Post};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::{
    CommentResponse, CreatePostRequest, PostResponse, PostView, PostWithCommentsResponse,
    UpdatePostRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Maximum number of posts in one feed page
pub const FEED_LIMIT: i64 = 50;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Newest posts matching `filter` that its viewer may see
    #[instrument(skip(self), fields(kind = filter.kind()))]
    pub async fn load_feed(&self, filter: FeedFilter) -> ServiceResult<Vec<PostResponse>> {
        let posts = self.ctx.post_repo().find_feed(&filter, FEED_LIMIT).await?;
        debug!(count = posts.len(), "Feed loaded");

        let viewer = filter.viewer();
        Ok(posts
            .iter()
            .map(|post| PostResponse::from(PostView { post, viewer }))
            .collect())
    }

    /// Publish a post into a group the author belongs to
    #[instrument(skip(self, request), fields(group_id = %request.group_id))]
    pub async fn create_post(
        &self,
        user_id: Id,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        request.validate()?;

        if self.ctx.group_repo().find_by_id(request.group_id).await?.is_none() {
            return Err(DomainError::GroupNotFound(request.group_id).into());
        }
        if !self
            .ctx
            .member_repo()
            .is_member(request.group_id, user_id)
            .await?
        {
            return Err(DomainError::NotGroupMember.into());
        }

        let post = self
            .ctx
            .post_repo()
            .create(&NewPost {
                group_id: request.group_id,
                author_id: user_id,
                title: request.title,
                content: request.content,
                location: request.location.trim().to_string(),
                category: request.category.trim().to_string(),
            })
            .await?;

        info!(post_id = %post.id, user_id = %user_id, geotagged = post.geo_point().is_some(), "Post created");

        Ok(PostResponse::from(PostView {
            post: &post,
            viewer: Some(user_id),
        }))
    }

    /// A post with its comments, as seen by `user_id`
    #[instrument(skip(self))]
    pub async fn load_post(
        &self,
        post_id: Id,
        user_id: Id,
    ) -> ServiceResult<PostWithCommentsResponse> {
        let post = self.visible_post(post_id, user_id).await?;
        let comments = self.ctx.comment_repo().find_by_post(post_id).await?;

        Ok(PostWithCommentsResponse {
            post: PostResponse::from(PostView {
                post: &post,
                viewer: Some(user_id),
            }),
            comments: comments.into_iter().map(CommentResponse::from).collect(),
        })
    }

    /// Replace title and content; author only
    #[instrument(skip(self, request))]
    pub async fn edit_post(
        &self,
        post_id: Id,
        user_id: Id,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        request.validate()?;

        let mut post = self.authored_post(post_id, user_id).await?;
        post.edit(request.title, request.content);
        self.ctx.post_repo().update(&post).await?;

        info!(post_id = %post_id, "Post edited");
        Ok(PostResponse::from(PostView {
            post: &post,
            viewer: Some(user_id),
        }))
    }

    /// Delete a post with its comments and likes; author only
    #[instrument(skip(self))]
    pub async fn remove_post(&self, post_id: Id, user_id: Id) -> ServiceResult<()> {
        self.authored_post(post_id, user_id).await?;
        self.ctx.post_repo().delete(post_id).await?;

        info!(post_id = %post_id, "Post removed");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn like_post(&self, post_id: Id, user_id: Id) -> ServiceResult<PostResponse> {
        let mut post = self.visible_post(post_id, user_id).await?;

        if !self.ctx.post_repo().add_like(post_id, user_id).await? {
            return Err(DomainError::AlreadyLiked.into());
        }
        post.liked_by.push(user_id);

        Ok(PostResponse::from(PostView {
            post: &post,
            viewer: Some(user_id),
        }))
    }

    #[instrument(skip(self))]
    pub async fn unlike_post(&self, post_id: Id, user_id: Id) -> ServiceResult<PostResponse> {
        let mut post = self.get_post_entity(post_id).await?;

        if !self.ctx.post_repo().remove_like(post_id, user_id).await? {
            return Err(DomainError::LikeNotFound.into());
        }
        post.liked_by.retain(|id| *id != user_id);

        Ok(PostResponse::from(PostView {
            post: &post,
            viewer: Some(user_id),
        }))
    }

    /// Get post entity by ID
    pub async fn get_post_entity(&self, post_id: Id) -> ServiceResult<Post> {
        Ok(self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?)
    }

    pub(crate) async fn visible_post(&self, post_id: Id, user_id: Id) -> ServiceResult<Post> {
        let post = self.get_post_entity(post_id).await?;
        let group = self
            .ctx
            .group_repo()
            .find_by_id(post.group_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        if group.private && !self.ctx.member_repo().is_member(group.id, user_id).await? {
            return Err(DomainError::NotGroupMember.into());
        }
        Ok(post)
    }

    async fn authored_post(&self, post_id: Id, user_id: Id) -> ServiceResult<Post> {
        let post = self.get_post_entity(post_id).await?;
        if !post.is_author(user_id) {
            return Err(DomainError::NotPostAuthor.into());
        }
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::CreateGroupRequest;
    use crate::memory::in_memory_context;
    use crate::services::GroupService;
    use social_common::JwtService;
    use social_core::{GeoPoint, NewUser};

    fn ctx() -> ServiceContext {
        in_memory_context(JwtService::new("secret", 3600, 7200))
    }

    async fn user(ctx: &ServiceContext, name: &str) -> Id {
        ctx.user_repo()
            .create(&NewUser {
                username: name.to_string(),
                email: format!("{name}@example.com"),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    async fn group(ctx: &ServiceContext, owner: Id, private: bool) -> Id {
        GroupService::new(ctx)
            .create_group(
                CreateGroupRequest {
                    title: "group".to_string(),
                    description: String::new(),
                    private,
                },
                owner,
            )
            .await
            .unwrap()
            .id
    }

    fn post_request(group_id: Id, location: &str, category: &str) -> CreatePostRequest {
        CreatePostRequest {
            group_id,
            title: "title".to_string(),
            content: "content".to_string(),
            location: location.to_string(),
            category: category.to_string(),
        }
    }

    #[tokio::test]
    async fn test_posting_requires_membership() {
        let ctx = ctx();
        let alice = user(&ctx, "alice").await;
        let bob = user(&ctx, "bob").await;
        let group_id = group(&ctx, alice, false).await;
        let posts = PostService::new(&ctx);

        let err = posts
            .create_post(bob, post_request(group_id, "", "misc"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        let post = posts
            .create_post(alice, post_request(group_id, "", "misc"))
            .await
            .unwrap();
        assert_eq!(post.author_id, alice);
        assert_eq!(post.likes, 0);
    }

    #[tokio::test]
    async fn test_feed_filters() {
        let ctx = ctx();
        let alice = user(&ctx, "alice").await;
        let bob = user(&ctx, "bob").await;
        let public = group(&ctx, alice, false).await;
        let private = group(&ctx, alice, true).await;
        let posts = PostService::new(&ctx);

        posts
            .create_post(alice, post_request(public, "51.5007,-0.1246", "music"))
            .await
            .unwrap();
        posts
            .create_post(alice, post_request(public, "48.8584,2.2945", "food"))
            .await
            .unwrap();
        posts
            .create_post(alice, post_request(private, "51.5010,-0.1250", "music"))
            .await
            .unwrap();

        let time = posts.load_feed(FeedFilter::Time { viewer: Some(bob) }).await.unwrap();
        assert_eq!(time.len(), 2);
        assert!(time[0].id > time[1].id);

        let music = posts
            .load_feed(FeedFilter::Category {
                viewer: Some(alice),
                category: "MUSIC".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(music.len(), 2);

        let near_london = posts
            .load_feed(FeedFilter::Location {
                viewer: Some(bob),
                origin: GeoPoint::parse("51.5,-0.12").unwrap(),
                distance_km: 10.0,
            })
            .await
            .unwrap();
        assert_eq!(near_london.len(), 1);

        let by_user = posts
            .load_feed(FeedFilter::User {
                viewer: None,
                username: "alice".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(by_user.len(), 2);

        let in_group = posts
            .load_feed(FeedFilter::Group {
                viewer: Some(alice),
                group_id: private,
            })
            .await
            .unwrap();
        assert_eq!(in_group.len(), 1);
    }

    #[tokio::test]
    async fn test_like_and_unlike() {
        let ctx = ctx();
        let alice = user(&ctx, "alice").await;
        let group_id = group(&ctx, alice, false).await;
        let posts = PostService::new(&ctx);
        let post = posts
            .create_post(alice, post_request(group_id, "", "misc"))
            .await
            .unwrap();

        let liked = posts.like_post(post.id, alice).await.unwrap();
        assert_eq!(liked.likes, 1);
        assert!(liked.liked_by_user);
        assert_eq!(posts.like_post(post.id, alice).await.unwrap_err().status_code(), 409);

        let unliked = posts.unlike_post(post.id, alice).await.unwrap();
        assert_eq!(unliked.likes, 0);
        assert_eq!(posts.unlike_post(post.id, alice).await.unwrap_err().status_code(), 404);
    }

    #[tokio::test]
    async fn test_only_author_edits_and_removes() {
        let ctx = ctx();
        let alice = user(&ctx, "alice").await;
        let bob = user(&ctx, "bob").await;
        let group_id = group(&ctx, alice, false).await;
        let posts = PostService::new(&ctx);
        let post = posts
            .create_post(alice, post_request(group_id, "", "misc"))
            .await
            .unwrap();

        let update = UpdatePostRequest {
            title: "new".to_string(),
            content: "body".to_string(),
        };
        assert_eq!(
            posts.edit_post(post.id, bob, update.clone()).await.unwrap_err().status_code(),
            403
        );
        let edited = posts.edit_post(post.id, alice, update).await.unwrap();
        assert_eq!(edited.title, "new");

        assert_eq!(posts.remove_post(post.id, bob).await.unwrap_err().status_code(), 403);
        posts.remove_post(post.id, alice).await.unwrap();
        assert_eq!(posts.load_post(post.id, alice).await.unwrap_err().status_code(), 404);
    }

    #[tokio::test]
    async fn test_private_post_hidden_from_strangers() {
        let ctx = ctx();
        let alice = user(&ctx, "alice").await;
        let bob = user(&ctx, "bob").await;
        let private = group(&ctx, alice, true).await;
        let posts = PostService::new(&ctx);
        let post = posts
            .create_post(alice, post_request(private, "", "misc"))
            .await
            .unwrap();

        assert_eq!(posts.load_post(post.id, bob).await.unwrap_err().status_code(), 403);
        let seen = posts.load_post(post.id, alice).await.unwrap();
        assert!(seen.comments.is_empty());
    }
}
