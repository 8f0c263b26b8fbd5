use dioxus::prelude::*;

const CHIRP_CSS: Asset = asset!("/assets/chirp.css");

/// Centred single-column page shell.
#[component]
pub fn PageLayout(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: CHIRP_CSS }
        main {
            class: "page",
            div {
                class: "page-column",
                {children}
            }
        }
    }
}
