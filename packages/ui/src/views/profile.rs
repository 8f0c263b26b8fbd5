use dioxus::prelude::*;

use crate::{LoadingPage, PageLayout, ProfileFeed};

/// Username addressed by a profile slug: `@octocat` and `octocat` both name `octocat`.
/// Only the first `@` is dropped.
pub fn username_from_slug(slug: &str) -> String {
    slug.replacen('@', "", 1)
}

/// Public profile: avatar and handle above the user's posts.
#[component]
pub fn ProfileView(username: String) -> Element {
    let mut username_signal = use_signal(|| username.clone());
    if *username_signal.peek() != username {
        username_signal.set(username.clone());
    }

    let profile = use_resource(move || {
        let username = username_signal();
        async move { api::get_user_by_username(username).await }
    });

    let user = match profile() {
        None => return rsx! { LoadingPage {} },
        Some(Err(e)) => {
            tracing::debug!("Profile lookup for {} failed: {}", username_signal.peek(), e);
            return rsx! {
                document::Title { "User not found" }
                PageLayout {
                    div { class: "feed-message", "User not found" }
                }
            };
        }
        Some(Ok(user)) => user,
    };

    rsx! {
        document::Title { "{user.username}" }
        PageLayout {
            div {
                class: "profile-banner",
                img {
                    class: "avatar profile-avatar",
                    src: "{user.profile_picture}",
                    alt: "@{user.username}'s profile picture",
                    width: 128,
                    height: 128,
                }
            }
            div { class: "profile-spacer" }
            div {
                class: "profile-handle",
                "@{user.username}"
            }
            ProfileFeed { user_id: user.id.clone() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_from_slug() {
        assert_eq!(username_from_slug("@octocat"), "octocat");
        assert_eq!(username_from_slug("octocat"), "octocat");
        assert_eq!(username_from_slug("@"), "");
        assert_eq!(username_from_slug("@@octocat"), "@octocat");
        assert_eq!(username_from_slug("octo@cat"), "octocat");
    }
}
