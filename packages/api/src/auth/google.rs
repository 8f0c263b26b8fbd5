//! Google profile lookup via the userinfo endpoint.
//!
//! Google accounts have no handle, so the profile carries no username and the
//! client projection falls back to the email's local part.

use reqwest::Client;
use serde::Deserialize;

use crate::db::users::OAuthProfile;
use crate::error::ApiError;

/// Google user info from API.
#[derive(Debug, Deserialize)]
struct GoogleUser {
    id: String,
    email: String,
    name: Option<String>,
    picture: Option<String>,
}

impl From<GoogleUser> for OAuthProfile {
    fn from(user: GoogleUser) -> Self {
        OAuthProfile {
            provider: "google",
            provider_id: user.id,
            email: user.email,
            username: None,
            name: user.name,
            avatar_url: user.picture,
        }
    }
}

pub(super) async fn fetch_profile(
    client: &Client,
    access_token: &str,
) -> Result<OAuthProfile, ApiError> {
    let google_user: GoogleUser = client
        .get("https://www.googleapis.com/oauth2/v2/userinfo")
        .bearer_auth(access_token)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| ApiError::Internal(format!("Google userinfo request failed: {e}")))?
        .json()
        .await
        .map_err(|e| ApiError::Internal(format!("Unexpected Google userinfo response: {e}")))?;

    Ok(google_user.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_userinfo_to_profile() {
        let user: GoogleUser = serde_json::from_str(
            r#"{
                "id": "1087",
                "email": "abc@example.com",
                "verified_email": true,
                "picture": "https://lh3.example.com/a.png"
            }"#,
        )
        .unwrap();

        let profile = OAuthProfile::from(user);
        assert_eq!(profile.provider, "google");
        assert_eq!(profile.provider_id, "1087");
        assert_eq!(profile.username, None);
        assert_eq!(profile.name, None);
        assert_eq!(profile.avatar_url.as_deref(), Some("https://lh3.example.com/a.png"));
    }
}
