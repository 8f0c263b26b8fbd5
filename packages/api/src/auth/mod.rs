//! Authentication through third-party OAuth providers.

#[cfg(feature = "server")]
mod config;
#[cfg(feature = "server")]
mod github;
#[cfg(feature = "server")]
mod google;
#[cfg(feature = "server")]
mod oauth;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use config::OAuthConfig;
#[cfg(feature = "server")]
pub use oauth::{OAuthFlow, Provider};
#[cfg(feature = "server")]
pub use session::{current_user_id, require_user_id, sign_in, SESSION_USER_ID_KEY};
