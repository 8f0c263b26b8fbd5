use dioxus::prelude::*;
use ui::views::PostDetailView;

#[component]
pub fn SinglePost(id: String) -> Element {
    rsx! { PostDetailView { id } }
}
