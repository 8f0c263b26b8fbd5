use dioxus::prelude::*;
use ui::views::{username_from_slug, ProfileView};

/// `/@octocat`; the leading `@` is optional.
#[component]
pub fn Profile(slug: String) -> Element {
    rsx! { ProfileView { username: username_from_slug(&slug) } }
}
