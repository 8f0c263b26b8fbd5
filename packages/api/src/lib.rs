//! # API crate: shared fullstack server functions for Chirp
//!
//! Defines every Dioxus server function that the web frontend calls, along with the
//! modules they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` | OAuth (GitHub, Google) sign-in flow and session helpers |
//! | [`db`] | `server` | PostgreSQL pool (lazy `OnceCell` singleton), post and user queries |
//! | [`error`] | none | [`ApiError`] and its conversion into `ServerFnError` |
//! | [`models`] | none | `Post`, `User` and the client-safe projection `ClientUser` |
//! | [`settings`] | `server` | Layered server configuration |
//! | [`validation`] | none | Emoji-only content rules and the field-error transport |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with full server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub that simply
//! forwards the call over HTTP.
//!
//! - **Posts**: `get_all_posts`, `get_post_by_id`, `get_posts_by_user_id`, `create_post`
//! - **Profiles**: `get_user_by_username`
//! - **Authentication**: `get_current_user`, `get_login_url`, `logout`

use dioxus::prelude::*;

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
#[cfg(feature = "server")]
pub mod settings;
pub mod validation;

pub use error::ApiError;
pub use models::{ClientUser, Post, PostWithAuthor};
pub use validation::FieldErrors;

/// The feed: newest posts from everyone, each with its author.
#[cfg(feature = "server")]
#[get("/api/posts")]
pub async fn get_all_posts() -> Result<Vec<PostWithAuthor>, ServerFnError> {
    let pool = db::get_pool().await?;
    let page_size = settings::settings()?.feed.page_size;

    Ok(db::posts::list_recent(pool, page_size).await?)
}

#[cfg(not(feature = "server"))]
#[get("/api/posts")]
pub async fn get_all_posts() -> Result<Vec<PostWithAuthor>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// A single post with its author.
#[cfg(feature = "server")]
#[get("/api/posts/:id")]
pub async fn get_post_by_id(id: String) -> Result<PostWithAuthor, ServerFnError> {
    let post_id = models::parse_post_id(&id)?;
    let pool = db::get_pool().await?;

    let post = db::posts::find_by_id(pool, post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(models::POST_NOT_FOUND.to_string()))?;

    Ok(post)
}

#[cfg(not(feature = "server"))]
#[get("/api/posts/:id")]
pub async fn get_post_by_id(id: String) -> Result<PostWithAuthor, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Newest posts written by one user.
#[cfg(feature = "server")]
#[get("/api/users/:user_id/posts")]
pub async fn get_posts_by_user_id(user_id: String) -> Result<Vec<PostWithAuthor>, ServerFnError> {
    let Some(author_id) = models::parse_author_id(&user_id) else {
        return Ok(Vec::new());
    };

    let pool = db::get_pool().await?;
    let page_size = settings::settings()?.feed.page_size;

    Ok(db::posts::list_by_author(pool, author_id, page_size).await?)
}

#[cfg(not(feature = "server"))]
#[get("/api/users/:user_id/posts")]
pub async fn get_posts_by_user_id(user_id: String) -> Result<Vec<PostWithAuthor>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Publish a post as the signed-in user.
///
/// Invalid content fails with an encoded [`FieldErrors`] message; see
/// [`FieldErrors::decode`].
#[cfg(feature = "server")]
#[post("/api/posts", session: tower_sessions::Session)]
pub async fn create_post(content: String) -> Result<Post, ServerFnError> {
    let author_id = auth::require_user_id(&session).await?;

    if let Err(errors) = validation::validate_post_content(&content) {
        tracing::warn!(%author_id, "Rejected post: {:?}", errors.field_errors);
        return Err(ApiError::from(errors).into());
    }

    let pool = db::get_pool().await?;
    let post = db::posts::insert(pool, author_id, &content).await?;
    tracing::info!(post_id = %post.id, %author_id, "Created post");

    Ok(post)
}

#[cfg(not(feature = "server"))]
#[post("/api/posts")]
pub async fn create_post(content: String) -> Result<Post, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Public profile for a username.
#[cfg(feature = "server")]
#[get("/api/profile/:username")]
pub async fn get_user_by_username(username: String) -> Result<ClientUser, ServerFnError> {
    let pool = db::get_pool().await?;

    let user = db::users::find_by_username(pool, &username)
        .await?
        .ok_or_else(|| ApiError::NotFound(models::USER_NOT_FOUND.to_string()))?;

    Ok(user.to_client())
}

#[cfg(not(feature = "server"))]
#[get("/api/profile/:username")]
pub async fn get_user_by_username(username: String) -> Result<ClientUser, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<ClientUser>, ServerFnError> {
    let Some(user_id) = auth::current_user_id(&session).await? else {
        return Ok(None);
    };

    let pool = db::get_pool().await?;
    let user = db::users::find_by_id(pool, user_id).await?;

    Ok(user.map(|u| u.to_client()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<ClientUser>, ServerFnError> {
    Ok(None)
}

/// Get the OAuth login URL for a provider.
#[cfg(feature = "server")]
#[get("/api/auth/login/:provider")]
pub async fn get_login_url(provider: String) -> Result<String, ServerFnError> {
    let Some(provider) = auth::Provider::from_name(&provider) else {
        return Err(ServerFnError::new(format!("Unknown provider: {}", provider)));
    };

    let flow = auth::OAuthFlow::new(provider)?;
    Ok(flow.generate_auth_url().await?)
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/login/:provider")]
pub async fn get_login_url(provider: String) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session.flush().await.map_err(ApiError::from)?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}
