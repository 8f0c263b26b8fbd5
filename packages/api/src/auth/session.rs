//! Session helpers.

use tower_sessions::Session;
use uuid::Uuid;

use crate::error::ApiError;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// The signed-in user's id, if any.
pub async fn current_user_id(session: &Session) -> Result<Option<Uuid>, ApiError> {
    let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await?;

    Ok(user_id.and_then(|id| match Uuid::parse_str(&id) {
        Ok(uuid) => Some(uuid),
        Err(e) => {
            tracing::warn!("Ignoring malformed session user id {id:?}: {e}");
            None
        }
    }))
}

/// Like [`current_user_id`], but signed-out callers get [`ApiError::Unauthorized`].
pub async fn require_user_id(session: &Session) -> Result<Uuid, ApiError> {
    current_user_id(session)
        .await?
        .ok_or(ApiError::Unauthorized)
}

/// Bind `user_id` to the session and persist it.
pub async fn sign_in(session: &Session, user_id: Uuid) -> Result<(), ApiError> {
    session
        .insert(SESSION_USER_ID_KEY, user_id.to_string())
        .await?;
    session.save().await?;
    Ok(())
}
