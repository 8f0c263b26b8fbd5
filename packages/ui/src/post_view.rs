use api::{ClientUser, Post};
use chrono::Utc;
use dioxus::prelude::*;

use crate::relative_time::from_now;

/// Route of a user's profile page.
pub fn profile_href(username: &str) -> String {
    format!("/@{username}")
}

/// Route of a single post page.
pub fn post_href(post: &Post) -> String {
    format!("/post/{}", post.id)
}

/// A post card: author avatar, handle, age and content.
#[component]
pub fn PostView(post: Post, author: ClientUser) -> Element {
    let profile = profile_href(&author.username);
    let age = from_now(post.created_at, Utc::now());

    rsx! {
        div {
            class: "post-card",
            Link {
                to: profile.clone(),
                img {
                    class: "avatar",
                    src: "{author.profile_picture}",
                    alt: "@{author.username}'s profile picture",
                    width: 48,
                    height: 48,
                }
            }
            div {
                class: "post-body",
                div {
                    class: "post-meta",
                    Link {
                        to: profile,
                        span { class: "post-handle", "@{author.username}" }
                    }
                    Link {
                        to: post_href(&post),
                        span { "· {age}" }
                    }
                }
                Link {
                    to: post_href(&post),
                    class: "post-content",
                    "{post.content}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hrefs() {
        let post = Post {
            id: "00000000-0000-0000-0000-000000000007".parse().unwrap(),
            content: "🦀".to_string(),
            author_id: "00000000-0000-0000-0000-000000000001".parse().unwrap(),
            created_at: Utc::now(),
        };
        assert_eq!(post_href(&post), "/post/00000000-0000-0000-0000-000000000007");
        assert_eq!(profile_href("octocat"), "/@octocat");
    }
}
