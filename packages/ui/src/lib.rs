//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::*;
}

pub use dioxus_primitives::toast::ToastProvider;

pub mod views;

pub mod relative_time;

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LoginButton, LogoutButton};

mod layout;
pub use layout::PageLayout;

mod loading;
pub use loading::{LoadingPage, LoadingSpinner};

mod post_view;
pub use post_view::{post_href, profile_href, PostView};

mod composer;
pub use composer::{creation_error_message, Composer, CreatePostWizard, GENERIC_CREATE_ERROR};

mod feed;
pub use feed::{use_feed_version, Feed, FeedVersion, ProfileFeed};
