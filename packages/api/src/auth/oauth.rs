//! # OAuth 2.0 Authorization Code flow with PKCE
//!
//! One flow serves every supported [`Provider`]; only the endpoints, scopes and the
//! profile fetch differ.
//!
//! 1. **[`generate_auth_url`](OAuthFlow::generate_auth_url)**: builds the provider's
//!    authorization URL with a random PKCE challenge and persists the CSRF state and
//!    verifier in `oauth_states` with a 10-minute expiry.
//!
//! 2. **[`exchange_code`](OAuthFlow::exchange_code)**: called by the
//!    `/auth/{provider}/callback` route in the `web` crate. It:
//!    - retrieves and atomically deletes the matching `oauth_states` row (validating
//!      CSRF state and expiry in one query),
//!    - exchanges the authorization code + PKCE verifier for an access token,
//!    - fetches the provider profile ([`super::github`], [`super::google`]),
//!    - upserts the user keyed on `provider` + `provider_id`.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, Scope, TokenResponse,
};

use super::config::OAuthConfig;
use super::{github, google};
use crate::db::{get_pool, users};
use crate::error::ApiError;
use crate::models::User;

/// Supported sign-in providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    GitHub,
    Google,
}

impl Provider {
    /// Parse the provider segment of a login or callback route.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "github" => Some(Provider::GitHub),
            "google" => Some(Provider::Google),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Provider::GitHub => "github",
            Provider::Google => "google",
        }
    }

    pub(super) fn auth_url(self) -> &'static str {
        match self {
            Provider::GitHub => "https://github.com/login/oauth/authorize",
            Provider::Google => "https://accounts.google.com/o/oauth2/v2/auth",
        }
    }

    pub(super) fn token_url(self) -> &'static str {
        match self {
            Provider::GitHub => "https://github.com/login/oauth/access_token",
            Provider::Google => "https://oauth2.googleapis.com/token",
        }
    }

    fn scopes(self) -> &'static [&'static str] {
        match self {
            Provider::GitHub => &["user:email", "read:user"],
            Provider::Google => &["openid", "email", "profile"],
        }
    }
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// OAuth handler for a single provider.
pub struct OAuthFlow {
    provider: Provider,
    config: OAuthConfig,
}

impl OAuthFlow {
    pub fn new(provider: Provider) -> Result<Self, ApiError> {
        let config = OAuthConfig::for_provider(provider)?;
        Ok(Self { provider, config })
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }

    /// Generate the authorization URL and remember its state and PKCE verifier.
    pub async fn generate_auth_url(&self) -> Result<String, ApiError> {
        let client = self.create_client();
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut request = client.authorize_url(CsrfToken::new_random);
        for scope in self.provider.scopes() {
            request = request.add_scope(Scope::new(scope.to_string()));
        }
        let (auth_url, csrf_state) = request.set_pkce_challenge(pkce_challenge).url();

        let pool = get_pool().await?;
        sqlx::query(
            r#"
            INSERT INTO oauth_states (state, provider, pkce_verifier, expires_at)
            VALUES ($1, $2, $3, NOW() + INTERVAL '10 minutes')
            "#,
        )
        .bind(csrf_state.secret())
        .bind(self.provider.name())
        .bind(pkce_verifier.secret())
        .execute(pool)
        .await?;

        Ok(auth_url.to_string())
    }

    /// Exchange an authorization code for a token and sign the user up or in.
    pub async fn exchange_code(&self, code: &str, state: &str) -> Result<User, ApiError> {
        let pool = get_pool().await?;

        let row: Option<(String,)> = sqlx::query_as(
            r#"
            DELETE FROM oauth_states
            WHERE state = $1 AND provider = $2 AND expires_at > NOW()
            RETURNING pkce_verifier
            "#,
        )
        .bind(state)
        .bind(self.provider.name())
        .fetch_optional(pool)
        .await?;

        let Some((pkce_verifier,)) = row else {
            return Err(ApiError::Unauthorized);
        };

        // Token endpoints must not follow redirects
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        let token = self
            .create_client()
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier))
            .request_async(&http_client)
            .await
            .map_err(|e| ApiError::Internal(format!("Token exchange failed: {e}")))?;

        let access_token = token.access_token().secret();
        let api_client = reqwest::Client::new();
        let profile = match self.provider {
            Provider::GitHub => github::fetch_profile(&api_client, access_token).await?,
            Provider::Google => google::fetch_profile(&api_client, access_token).await?,
        };

        users::upsert_oauth(pool, &profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_names_round_trip() {
        for provider in [Provider::GitHub, Provider::Google] {
            assert_eq!(Provider::from_name(provider.name()), Some(provider));
        }
        assert_eq!(Provider::from_name("gitlab"), None);
        assert_eq!(Provider::from_name("GitHub"), None);
    }
}
