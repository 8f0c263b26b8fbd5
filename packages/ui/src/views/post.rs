use dioxus::prelude::*;

use crate::{LoadingPage, PageLayout, PostView};

/// A single post on its own page.
#[component]
pub fn PostDetailView(id: String) -> Element {
    let mut id_signal = use_signal(|| id.clone());
    if *id_signal.peek() != id {
        id_signal.set(id.clone());
    }

    let post = use_resource(move || {
        let id = id_signal();
        async move { api::get_post_by_id(id).await }
    });

    match post() {
        None => rsx! { LoadingPage {} },
        Some(Err(_)) => rsx! {
            document::Title { "Post not found" }
            PageLayout {
                div { class: "feed-message", "Post not found" }
            }
        },
        Some(Ok(entry)) => rsx! {
            document::Title { "{entry.post.content} - {entry.author.username}" }
            PageLayout {
                PostView { post: entry.post.clone(), author: entry.author.clone() }
            }
        },
    }
}
