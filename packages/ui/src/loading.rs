use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner(#[props(default = 16)] size: u32) -> Element {
    rsx! {
        div {
            class: "spinner",
            role: "status",
            style: "width: {size}px; height: {size}px;",
            span { class: "sr-only", "Loading..." }
        }
    }
}

/// Full-page loading placeholder.
#[component]
pub fn LoadingPage() -> Element {
    rsx! {
        div {
            class: "loading-page",
            LoadingSpinner { size: 60 }
        }
    }
}
