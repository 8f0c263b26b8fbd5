//! OAuth configuration from environment variables.
//!
//! Each provider reads `<PROVIDER>_CLIENT_ID` and `<PROVIDER>_CLIENT_SECRET`.
//! `AUTH_REDIRECT_BASE` is the public origin the provider redirects back to
//! (default `http://localhost:8080`); callbacks land on `/auth/<provider>/callback`.

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use super::oauth::Provider;
use crate::error::ApiError;

const DEFAULT_REDIRECT_BASE: &str = "http://localhost:8080";

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
}

impl OAuthConfig {
    /// Build the config for `provider` from environment variables.
    pub fn for_provider(provider: Provider) -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let prefix = provider.name().to_uppercase();
        let client_id = required_var(&format!("{prefix}_CLIENT_ID"))?;
        let client_secret = required_var(&format!("{prefix}_CLIENT_SECRET"))?;
        let redirect_base = std::env::var("AUTH_REDIRECT_BASE")
            .unwrap_or_else(|_| DEFAULT_REDIRECT_BASE.to_string());

        Ok(Self {
            client_id: ClientId::new(client_id),
            client_secret: ClientSecret::new(client_secret),
            auth_url: AuthUrl::new(provider.auth_url().to_string()).map_err(invalid_url)?,
            token_url: TokenUrl::new(provider.token_url().to_string()).map_err(invalid_url)?,
            redirect_url: RedirectUrl::new(callback_url(&redirect_base, provider))
                .map_err(invalid_url)?,
        })
    }
}

/// Where `provider` sends the user back to after authorization.
pub fn callback_url(redirect_base: &str, provider: Provider) -> String {
    format!(
        "{}/auth/{}/callback",
        redirect_base.trim_end_matches('/'),
        provider.name()
    )
}

fn required_var(key: &str) -> Result<String, ApiError> {
    std::env::var(key).map_err(|_| ApiError::Config(format!("{key} not set")))
}

fn invalid_url(e: oauth2::url::ParseError) -> ApiError {
    ApiError::Config(format!("Invalid OAuth URL: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_url() {
        assert_eq!(
            callback_url("http://localhost:8080", Provider::GitHub),
            "http://localhost:8080/auth/github/callback"
        );
        assert_eq!(
            callback_url("https://chirp.example.com/", Provider::Google),
            "https://chirp.example.com/auth/google/callback"
        );
    }
}
