use dioxus::prelude::*;

use crate::{use_auth, CreatePostWizard, Feed, FeedVersion, LoginButton, LogoutButton, PageLayout};

/// Landing page: the composer (or sign-in buttons) above the global feed.
#[component]
pub fn HomeView() -> Element {
    use_context_provider(|| Signal::new(FeedVersion::default()));
    let auth = use_auth();

    // Avoid flashing the sign-in buttons before the session is known
    if auth().loading {
        return rsx! { div {} };
    }

    let signed_in = auth().is_signed_in();

    rsx! {
        document::Title { "Chirp" }
        PageLayout {
            div {
                class: "page-header",
                if signed_in {
                    CreatePostWizard {}
                    div {
                        class: "header-actions",
                        LogoutButton {}
                    }
                } else {
                    div {
                        class: "sign-in",
                        LoginButton { provider: "github", label: "Sign in with GitHub" }
                        LoginButton { provider: "google", label: "Sign in with Google" }
                    }
                }
            }
            Feed {}
        }
    }
}
