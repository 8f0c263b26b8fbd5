//! # User record and its client projection
//!
//! ## [`User`]
//!
//! The complete row from the `users` table, written by the OAuth callbacks. Identity
//! comes from the provider (`provider` + `provider_id`); `email`, `username`, `name`
//! and `avatar_url` are refreshed on every sign-in. GitHub supplies a `login` that is
//! stored as the username, Google does not.
//!
//! ## [`ClientUser`]
//!
//! The only shape of a user that ever leaves the server: `id`, `username` and
//! `profile_picture`. It is derived by [`User::to_client`] on every read and never
//! stored.
//!
//! The username policy lives in [`client_username`]: an explicit, non-empty username
//! wins; otherwise the local part of the email address is used. Profile lookups by
//! username follow the same rule on the SQL side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shown when the provider gave us no avatar.
pub const DEFAULT_PROFILE_PICTURE: &str = "https://www.gravatar.com/avatar/?d=mp&s=128";

pub const USER_NOT_FOUND: &str = "User not found";

/// Full user record from the database.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub provider: String,
    pub provider_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Strip the record down to what the client may see.
    pub fn to_client(&self) -> ClientUser {
        ClientUser {
            id: self.id.to_string(),
            username: client_username(self.username.as_deref(), &self.email),
            profile_picture: self
                .avatar_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_PROFILE_PICTURE.to_string()),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientUser {
    pub id: String,
    pub username: String,
    pub profile_picture: String,
}

/// Username shown for a user: the explicit one, else the email's local part.
///
/// An email without `@` yields an empty username.
pub fn client_username(username: Option<&str>, email: &str) -> String {
    match username {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => email
            .split_once('@')
            .map(|(local, _)| local.to_string())
            .unwrap_or_default(),
    }
}

/// Choose the profile addressed by `username` among `candidates`.
///
/// Only users whose projected username is `username` qualify. A stored username beats
/// an email local part that happens to match; otherwise the earliest candidate wins.
/// An empty `username` never matches.
pub fn find_profile(candidates: Vec<User>, username: &str) -> Option<User> {
    if username.is_empty() {
        return None;
    }

    candidates
        .into_iter()
        .filter(|user| client_username(user.username.as_deref(), &user.email) == username)
        .min_by_key(|user| user.username.as_deref() != Some(username))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: Option<&str>, email: &str, avatar_url: Option<&str>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::nil(),
            email: email.to_string(),
            username: username.map(str::to_string),
            name: None,
            avatar_url: avatar_url.map(str::to_string),
            provider: "github".to_string(),
            provider_id: "42".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_explicit_username_is_kept() {
        for name in ["octocat", "a", "Theo_123"] {
            let client = user(Some(name), "someone@example.com", None).to_client();
            assert_eq!(client.username, name);
        }
    }

    #[test]
    fn test_username_falls_back_to_email_local_part() {
        let client = user(None, "abc@example.com", None).to_client();
        assert_eq!(client.username, "abc");

        let client = user(Some(""), "abc@example.com", None).to_client();
        assert_eq!(client.username, "abc");
    }

    #[test]
    fn test_email_without_at_gives_empty_username() {
        assert_eq!(client_username(None, "not-an-email"), "");
        assert_eq!(client_username(None, ""), "");
    }

    #[test]
    fn test_projection_fields() {
        let record = user(
            Some("octocat"),
            "octo@example.com",
            Some("https://avatars.example.com/1.png"),
        );
        let client = record.to_client();
        assert_eq!(
            client,
            ClientUser {
                id: Uuid::nil().to_string(),
                username: "octocat".to_string(),
                profile_picture: "https://avatars.example.com/1.png".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_avatar_uses_default() {
        assert_eq!(
            user(Some("x"), "x@example.com", None).to_client().profile_picture,
            DEFAULT_PROFILE_PICTURE
        );
        assert_eq!(
            user(Some("x"), "x@example.com", Some("")).to_client().profile_picture,
            DEFAULT_PROFILE_PICTURE
        );
    }

    #[test]
    fn test_profile_lookup_prefers_explicit_username() {
        let by_email = user(None, "theo@example.com", None);
        let mut by_name = user(Some("theo"), "t.browne@example.com", None);
        by_name.id = Uuid::from_u128(2);

        let found = find_profile(vec![by_email.clone(), by_name.clone()], "theo");
        assert_eq!(found, Some(by_name));

        let found = find_profile(vec![by_email.clone()], "theo");
        assert_eq!(found, Some(by_email));
    }

    #[test]
    fn test_profile_lookup_ignores_shadowed_email() {
        // the local part matches but the user goes by another name
        let renamed = user(Some("octocat"), "theo@example.com", None);
        assert_eq!(find_profile(vec![renamed], "theo"), None);
    }

    #[test]
    fn test_empty_username_matches_nobody() {
        let no_at = user(None, "not-an-email", None);
        assert_eq!(find_profile(vec![no_at], ""), None);
        assert_eq!(find_profile(Vec::new(), ""), None);
    }
}
