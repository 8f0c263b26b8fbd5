//! GitHub profile lookup.
//!
//! `GET /user` gives the id, `login` (kept as the Chirp username), display name and
//! avatar. The email is often hidden there, in which case `GET /user/emails` is asked
//! for the primary verified address.

use reqwest::Client;
use serde::Deserialize;

use crate::db::users::OAuthProfile;
use crate::error::ApiError;

/// GitHub user info from API.
#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: i64,
    login: String,
    email: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
}

/// GitHub email info from API.
#[derive(Debug, Deserialize)]
struct GitHubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

pub(super) async fn fetch_profile(
    client: &Client,
    access_token: &str,
) -> Result<OAuthProfile, ApiError> {
    let github_user: GitHubUser = get_json(client, "https://api.github.com/user", access_token).await?;

    let email = match github_user.email {
        Some(email) => email,
        None => {
            let emails: Vec<GitHubEmail> =
                get_json(client, "https://api.github.com/user/emails", access_token).await?;
            primary_verified_email(emails)
                .ok_or_else(|| ApiError::Internal("No verified primary email found".to_string()))?
        }
    };

    Ok(OAuthProfile {
        provider: "github",
        provider_id: github_user.id.to_string(),
        email,
        username: Some(github_user.login),
        name: github_user.name,
        avatar_url: github_user.avatar_url,
    })
}

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    url: &str,
    access_token: &str,
) -> Result<T, ApiError> {
    client
        .get(url)
        .bearer_auth(access_token)
        .header("User-Agent", "Chirp")
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| ApiError::Internal(format!("GitHub API request failed: {e}")))?
        .json()
        .await
        .map_err(|e| ApiError::Internal(format!("Unexpected GitHub API response: {e}")))
}

fn primary_verified_email(emails: Vec<GitHubEmail>) -> Option<String> {
    emails
        .into_iter()
        .find(|e| e.primary && e.verified)
        .map(|e| e.email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_verified_email() {
        let emails: Vec<GitHubEmail> = serde_json::from_str(
            r#"[
                {"email": "old@example.com", "primary": false, "verified": true},
                {"email": "unverified@example.com", "primary": true, "verified": false},
                {"email": "main@example.com", "primary": true, "verified": true}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            primary_verified_email(emails).as_deref(),
            Some("main@example.com")
        );
    }

    #[test]
    fn test_no_primary_verified_email() {
        let emails = vec![GitHubEmail {
            email: "a@example.com".to_string(),
            primary: true,
            verified: false,
        }];
        assert_eq!(primary_verified_email(emails), None);
    }
}
