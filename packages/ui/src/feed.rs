use api::PostWithAuthor;
use dioxus::prelude::*;

use crate::{LoadingPage, PostView};

/// Generation counter for the home feed. Bumping it makes [`Feed`] refetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedVersion(pub u64);

impl FeedVersion {
    /// Mark the cached feed as stale.
    pub fn invalidate(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// The feed version provided by the home page.
pub fn use_feed_version() -> Signal<FeedVersion> {
    use_context::<Signal<FeedVersion>>()
}

/// Everyone's latest posts.
#[component]
pub fn Feed() -> Element {
    let feed_version = use_feed_version();

    let posts = use_resource(move || {
        // Subscribe so invalidation restarts the fetch
        let _version = feed_version();
        async move { api::get_all_posts().await }
    });

    match posts() {
        None => rsx! { LoadingPage {} },
        Some(Err(e)) => {
            tracing::warn!("Failed to load feed: {e}");
            rsx! { div { class: "feed-message", "Something went wrong" } }
        }
        Some(Ok(posts)) => rsx! { PostList { posts } },
    }
}

/// Posts written by one user, shown under their profile header.
#[component]
pub fn ProfileFeed(user_id: String) -> Element {
    let mut user_signal = use_signal(|| user_id.clone());
    if *user_signal.peek() != user_id {
        user_signal.set(user_id.clone());
    }

    let posts = use_resource(move || {
        let user_id = user_signal();
        async move { api::get_posts_by_user_id(user_id).await }
    });

    match posts() {
        None => rsx! { LoadingPage {} },
        Some(Ok(posts)) if !posts.is_empty() => rsx! { PostList { posts } },
        _ => rsx! { div { class: "feed-message", "User has not posted" } },
    }
}

#[component]
fn PostList(posts: Vec<PostWithAuthor>) -> Element {
    rsx! {
        div {
            class: "post-list",
            for entry in posts {
                PostView {
                    key: "{entry.post.id}",
                    post: entry.post.clone(),
                    author: entry.author.clone(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_bumps_version() {
        let mut version = FeedVersion::default();
        version.invalidate();
        version.invalidate();
        assert_eq!(version, FeedVersion(2));

        let mut last = FeedVersion(u64::MAX);
        last.invalidate();
        assert_eq!(last, FeedVersion(0));
    }
}
