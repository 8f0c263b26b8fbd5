//! Errors raised while serving Chirp's server functions.

use dioxus::prelude::ServerFnError;
use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("Not authenticated")]
    Unauthorized,

    /// Rendered as an encoded [`FieldErrors`] payload so the client can decode it.
    #[error("{0}")]
    Validation(FieldErrors),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[cfg(feature = "server")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[cfg(feature = "server")]
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<ApiError> for ServerFnError {
    fn from(err: ApiError) -> Self {
        let message = match err {
            #[cfg(feature = "server")]
            ApiError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            #[cfg(feature = "server")]
            ApiError::Session(ref e) => {
                tracing::error!("Session error: {:?}", e);
                "Session error".to_string()
            }
            ApiError::Internal(ref msg) | ApiError::Config(ref msg) => {
                tracing::error!("{}", msg);
                err.to_string()
            }
            _ => err.to_string(),
        };
        ServerFnError::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ONLY_EMOJIS;

    #[test]
    fn test_validation_error_message_carries_field_errors() {
        let mut errors = FieldErrors::new();
        errors.add("content", ONLY_EMOJIS);

        let message = ApiError::from(errors.clone()).to_string();
        assert_eq!(FieldErrors::decode(&message), Some(errors));
    }

    #[test]
    fn test_not_found_message() {
        let err = ApiError::NotFound("Post not found".to_string());
        assert_eq!(err.to_string(), "Post not found");
        assert_eq!(ApiError::Unauthorized.to_string(), "Not authenticated");
    }
}
