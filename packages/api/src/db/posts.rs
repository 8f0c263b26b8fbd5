//! Post queries. Every listing is newest first.

use sqlx::PgPool;
use uuid::Uuid;

use super::users;
use crate::error::ApiError;
use crate::models::{Post, PostWithAuthor};

/// The most recent posts from everyone.
pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<PostWithAuthor>, ApiError> {
    let posts: Vec<Post> =
        sqlx::query_as("SELECT * FROM posts ORDER BY created_at DESC, id LIMIT $1")
            .bind(limit)
            .fetch_all(pool)
            .await?;

    with_authors(pool, posts).await
}

/// The most recent posts written by `author_id`.
pub async fn list_by_author(
    pool: &PgPool,
    author_id: Uuid,
    limit: i64,
) -> Result<Vec<PostWithAuthor>, ApiError> {
    let posts: Vec<Post> = sqlx::query_as(
        "SELECT * FROM posts WHERE author_id = $1 ORDER BY created_at DESC, id LIMIT $2",
    )
    .bind(author_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    with_authors(pool, posts).await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<PostWithAuthor>, ApiError> {
    let post: Option<Post> = sqlx::query_as("SELECT * FROM posts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(post) = post else {
        return Ok(None);
    };

    Ok(with_authors(pool, vec![post]).await?.pop())
}

pub async fn insert(pool: &PgPool, author_id: Uuid, content: &str) -> Result<Post, ApiError> {
    let post: Post = sqlx::query_as(
        "INSERT INTO posts (content, author_id) VALUES ($1, $2) RETURNING *",
    )
    .bind(content)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

async fn with_authors(pool: &PgPool, posts: Vec<Post>) -> Result<Vec<PostWithAuthor>, ApiError> {
    let mut author_ids: Vec<Uuid> = posts.iter().map(|post| post.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors = users::find_by_ids(pool, &author_ids).await?;
    PostWithAuthor::pair_all(posts, &authors)
}
