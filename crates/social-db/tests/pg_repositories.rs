//! Repository tests against a live PostgreSQL
//!
//! These tests require a reachable database in `DATABASE_URL`; they return
//! early when it is not set.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p social-db --test pg_repositories

use social_common::DatabaseConfig;
use social_core::entities::{Friendship, FriendshipState, GroupMember, MemberRole};
use social_core::error::DomainError;
use social_core::traits::{
    FriendshipRepository, GroupRepository, MemberRepository, NewGroup, NewPost, NewUser,
    PostRepository, UserRepository,
};
use social_core::value_objects::{FeedFilter, GeoPoint};
use social_db::{
    create_pool, run_migrations, PgFriendshipRepository, PgGroupRepository, PgMemberRepository,
    PgPool, PgPostRepository, PgUserRepository, PoolOptions,
};

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let config = DatabaseConfig {
        url,
        max_connections: 2,
        min_connections: 0,
    };
    let pool = create_pool(&config, &PoolOptions::default())
        .await
        .expect("Failed to connect");
    run_migrations(&pool, concat!(env!("CARGO_MANIFEST_DIR"), "/migrations"))
        .await
        .expect("Failed to migrate");
    Some(pool)
}

fn unique(prefix: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &suffix[..12])
}

async fn new_user(repo: &PgUserRepository) -> social_core::User {
    let username = unique("user");
    repo.create(&NewUser {
        email: format!("{username}@example.com"),
        username,
        password_hash: "hash".to_string(),
    })
    .await
    .expect("Failed to create user")
}

#[tokio::test]
async fn test_user_uniqueness_and_soft_delete() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserRepository::new(pool);

    let user = new_user(&users).await;
    assert!(users.username_exists(&user.username).await.unwrap());

    let duplicate = users
        .create(&NewUser {
            username: user.username.clone(),
            email: format!("other_{}", user.email),
            password_hash: "hash".to_string(),
        })
        .await;
    assert!(matches!(duplicate, Err(DomainError::UsernameAlreadyExists)));

    users.delete(user.id).await.unwrap();
    assert!(users.find_by_id(user.id).await.unwrap().is_none());
    assert!(!users.username_exists(&user.username).await.unwrap());
}

#[tokio::test]
async fn test_friendship_lifecycle() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserRepository::new(pool.clone());
    let friendships = PgFriendshipRepository::new(pool);

    let a = new_user(&users).await;
    let b = new_user(&users).await;

    friendships
        .create(&Friendship::new(a.id, b.id, FriendshipState::Pending))
        .await
        .unwrap();
    assert_eq!(friendships.find_pending_for(b.id).await.unwrap().len(), 1);

    friendships.accept(a.id, b.id).await.unwrap();
    let found = friendships.find_between(b.id, a.id).await.unwrap().unwrap();
    assert_eq!(found.state, FriendshipState::Accepted);
    assert_eq!(friendships.find_accepted_for(a.id).await.unwrap().len(), 1);

    friendships.delete(b.id, a.id).await.unwrap();
    assert!(friendships.find_between(a.id, b.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_private_group_posts_hidden_from_strangers() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserRepository::new(pool.clone());
    let groups = PgGroupRepository::new(pool.clone());
    let members = PgMemberRepository::new(pool.clone());
    let posts = PgPostRepository::new(pool);

    let author = new_user(&users).await;
    let stranger = new_user(&users).await;
    let group = groups
        .create_with_admin(
            &NewGroup {
                title: unique("group"),
                description: String::new(),
                private: true,
            },
            author.id,
        )
        .await
        .unwrap();
    assert_eq!(members.admin_ids(group.id).await.unwrap(), vec![author.id]);

    let post = posts
        .create(&NewPost {
            group_id: group.id,
            author_id: author.id,
            title: "secret".to_string(),
            content: "members only".to_string(),
            location: "51.5074,-0.1278".to_string(),
            category: "news".to_string(),
        })
        .await
        .unwrap();

    let as_member = posts
        .find_feed(
            &FeedFilter::Group {
                viewer: Some(author.id),
                group_id: group.id,
            },
            50,
        )
        .await
        .unwrap();
    assert_eq!(as_member.len(), 1);

    let as_stranger = posts
        .find_feed(
            &FeedFilter::Group {
                viewer: Some(stranger.id),
                group_id: group.id,
            },
            50,
        )
        .await
        .unwrap();
    assert!(as_stranger.is_empty());

    let nearby = posts
        .find_feed(
            &FeedFilter::Location {
                viewer: Some(author.id),
                origin: GeoPoint::parse("51.5080,-0.1280").unwrap(),
                distance_km: 1.0,
            },
            50,
        )
        .await
        .unwrap();
    assert!(nearby.iter().any(|p| p.id == post.id));

    assert!(posts.add_like(post.id, author.id).await.unwrap());
    assert!(!posts.add_like(post.id, author.id).await.unwrap());
    let liked = posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(liked.liked_by, vec![author.id]);
    assert!(posts.remove_like(post.id, author.id).await.unwrap());
    assert!(!posts.remove_like(post.id, author.id).await.unwrap());

    groups.delete(group.id).await.unwrap();
    assert!(posts.find_by_id(post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_deleted_user_drops_memberships() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserRepository::new(pool.clone());
    let groups = PgGroupRepository::new(pool.clone());
    let members = PgMemberRepository::new(pool);

    let owner = new_user(&users).await;
    let other = new_user(&users).await;
    let group = groups
        .create_with_admin(
            &NewGroup {
                title: unique("group"),
                description: String::new(),
                private: false,
            },
            owner.id,
        )
        .await
        .unwrap();
    members
        .create(&GroupMember::new(group.id, other.id, MemberRole::Admin))
        .await
        .unwrap();
    assert_eq!(groups.member_count(group.id).await.unwrap(), 2);

    users.delete(other.id).await.unwrap();
    assert_eq!(groups.member_count(group.id).await.unwrap(), 1);
    assert_eq!(members.admin_ids(group.id).await.unwrap(), vec![owner.id]);
    assert!(!members.is_member(group.id, other.id).await.unwrap());
}

#[tokio::test]
async fn test_group_with_unknown_admin_is_not_created() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let groups = PgGroupRepository::new(pool);
    let title = unique("ghost");

    let result = groups
        .create_with_admin(
            &NewGroup {
                title: title.clone(),
                description: String::new(),
                private: false,
            },
            social_core::value_objects::Id::new(i64::MAX),
        )
        .await;
    assert!(result.is_err());
    assert!(groups.search(&title, 10).await.unwrap().is_empty());
}
