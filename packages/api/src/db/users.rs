//! User queries.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{find_profile, User};

/// Profile fields reported by an OAuth provider after sign-in.
#[derive(Debug, Clone)]
pub struct OAuthProfile {
    pub provider: &'static str,
    pub provider_id: String,
    pub email: String,
    pub username: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Insert the user, or refresh their profile if they signed in before.
pub async fn upsert_oauth(pool: &PgPool, profile: &OAuthProfile) -> Result<User, ApiError> {
    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (email, username, name, avatar_url, provider, provider_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (provider, provider_id)
        DO UPDATE SET
            email = EXCLUDED.email,
            username = EXCLUDED.username,
            name = EXCLUDED.name,
            avatar_url = EXCLUDED.avatar_url,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(&profile.email)
    .bind(&profile.username)
    .bind(&profile.name)
    .bind(&profile.avatar_url)
    .bind(profile.provider)
    .bind(&profile.provider_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<User>, ApiError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let users = sqlx::query_as("SELECT * FROM users WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await?;
    Ok(users)
}

/// Find the user whose client-facing username is `username`.
///
/// The query narrows the table to users whose stored username or email local part
/// matches; [`find_profile`] then applies the same rule as
/// [`crate::models::client_username`], preferring an explicit username.
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, ApiError> {
    if username.is_empty() {
        return Ok(None);
    }

    let candidates: Vec<User> = sqlx::query_as(
        r#"
        SELECT * FROM users
        WHERE username = $1
           OR (COALESCE(username, '') = ''
               AND position('@' in email) > 0
               AND split_part(email, '@', 1) = $1)
        ORDER BY created_at
        "#,
    )
    .bind(username)
    .fetch_all(pool)
    .await?;

    Ok(find_profile(candidates, username))
}
