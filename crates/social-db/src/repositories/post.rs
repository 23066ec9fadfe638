//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Post;
use social_core::error::DomainError;
use social_core::traits::{NewPost, PostRepository, RepoResult};
use social_core::value_objects::{FeedFilter, GeoPoint, Id};

use crate::models::PostModel;

use super::error::map_db_error;

/// Columns of a post row plus its like set
const POST_COLUMNS: &str = r"
    p.id, p.group_id, p.author_id, p.title, p.content, p.location, p.category,
    ARRAY(SELECT l.user_id FROM post_likes l WHERE l.post_id = p.id ORDER BY l.created_at) AS liked_by,
    p.created_at, p.updated_at
";

/// How many geotagged posts a location feed scans before distance filtering
const LOCATION_SCAN_WINDOW: i64 = 1000;

/// Feed query: `$1` is the viewer (nullable), `$2` the limit, `$3` the
/// variant-specific argument used by `extra`.
fn feed_sql(extra: &str) -> String {
    format!(
        r"
        SELECT {POST_COLUMNS}
        FROM posts p
        INNER JOIN groups g ON g.id = p.group_id
        WHERE (
            g.private = FALSE
            OR EXISTS (SELECT 1 FROM group_members m WHERE m.group_id = g.id AND m.user_id = $1)
        )
        {extra}
        ORDER BY p.created_at DESC, p.id DESC
        LIMIT $2
        "
    )
}

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.id = $1");
        let result = sqlx::query_as::<_, PostModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn find_by_group(&self, group_id: Id, limit: i64) -> RepoResult<Vec<Post>> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts p WHERE p.group_id = $1 \
             ORDER BY p.created_at DESC, p.id DESC LIMIT $2"
        );
        let results = sqlx::query_as::<_, PostModel>(&sql)
            .bind(group_id.into_inner())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self), fields(kind = filter.kind()))]
    async fn find_feed(&self, filter: &FeedFilter, limit: i64) -> RepoResult<Vec<Post>> {
        let viewer = filter.viewer().map(Id::into_inner);

        let rows = match filter {
            FeedFilter::Time { .. } => {
                let sql = feed_sql("");
                sqlx::query_as::<_, PostModel>(&sql)
                    .bind(viewer)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await
            }
            FeedFilter::Category { category, .. } => {
                let sql = feed_sql("AND LOWER(p.category) = LOWER($3)");
                sqlx::query_as::<_, PostModel>(&sql)
                    .bind(viewer)
                    .bind(limit)
                    .bind(category.as_str())
                    .fetch_all(&self.pool)
                    .await
            }
            FeedFilter::User { username, .. } => {
                let sql = feed_sql(
                    "AND p.author_id = (SELECT u.id FROM users u WHERE u.username = $3 AND u.deleted_at IS NULL)",
                );
                sqlx::query_as::<_, PostModel>(&sql)
                    .bind(viewer)
                    .bind(limit)
                    .bind(username.as_str())
                    .fetch_all(&self.pool)
                    .await
            }
            FeedFilter::Group { group_id, .. } => {
                let sql = feed_sql("AND p.group_id = $3");
                sqlx::query_as::<_, PostModel>(&sql)
                    .bind(viewer)
                    .bind(limit)
                    .bind(group_id.into_inner())
                    .fetch_all(&self.pool)
                    .await
            }
            FeedFilter::Location { .. } => {
                let sql = feed_sql("AND p.latitude IS NOT NULL AND p.longitude IS NOT NULL");
                sqlx::query_as::<_, PostModel>(&sql)
                    .bind(viewer)
                    .bind(LOCATION_SCAN_WINDOW)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(map_db_error)?;

        let posts = rows.into_iter().map(Post::from);

        Ok(match filter {
            FeedFilter::Location {
                origin,
                distance_km,
                ..
            } => posts
                .filter(|post| {
                    post.geo_point()
                        .is_some_and(|point| origin.distance_km(&point) <= *distance_km)
                })
                .take(usize::try_from(limit).unwrap_or(0))
                .collect(),
            _ => posts.collect(),
        })
    }

    #[instrument(skip(self, post), fields(group_id = %post.group_id, author_id = %post.author_id))]
    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let point = GeoPoint::parse(&post.location).ok();

        let model = sqlx::query_as::<_, PostModel>(
            r"
            INSERT INTO posts (group_id, author_id, title, content, location, latitude, longitude, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, group_id, author_id, title, content, location, category,
                      ARRAY[]::BIGINT[] AS liked_by, created_at, updated_at
            ",
        )
        .bind(post.group_id.into_inner())
        .bind(post.author_id.into_inner())
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.location)
        .bind(point.map(|p| p.lat))
        .bind(point.map(|p| p.lng))
        .bind(&post.category)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Post::from(model))
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts SET title = $2, content = $3, updated_at = NOW() WHERE id = $1
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.title)
        .bind(&post.content)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> RepoResult<()> {
        // Comments and likes cascade
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_like(&self, post_id: Id, user_id: Id) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn remove_like(&self, post_id: Id, user_id: Id) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPostRepository>();
    }

    #[test]
    fn test_feed_sql_places_extra_clause() {
        let sql = feed_sql("AND p.group_id = $3");
        assert!(sql.contains("AND p.group_id = $3"));
        assert!(sql.contains("LIMIT $2"));
        assert!(sql.contains("m.user_id = $1"));
    }
}
