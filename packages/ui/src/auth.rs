//! Authentication context and hooks for the UI.

use api::ClientUser;
use dioxus::prelude::*;

use crate::icons::{FaGithub, FaGoogle};
use crate::Icon;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<ClientUser>,
    /// The initial `get_current_user` call has not returned yet.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Fetch the current user on mount
    let _ = use_resource(move || async move {
        let user = match api::get_current_user().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Failed to load current user: {}", e);
                None
            }
        };
        auth_state.set(AuthState {
            user,
            loading: false,
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to initiate login with a specific provider.
#[component]
pub fn LoginButton(
    provider: String,
    #[props(default = "Sign in".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let provider_clone = provider.clone();
    let mut loading = use_signal(|| false);

    let onclick = move |_| {
        let provider = provider_clone.clone();
        async move {
            loading.set(true);
            match api::get_login_url(provider).await {
                Ok(url) => {
                    // Redirect to OAuth provider
                    #[cfg(target_arch = "wasm32")]
                    {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(&url);
                        }
                    }
                    #[cfg(not(target_arch = "wasm32"))]
                    {
                        tracing::info!("Sign-in requires a browser: {}", url);
                        loading.set(false);
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to get login URL: {}", e);
                    loading.set(false);
                }
            }
        }
    };

    rsx! {
        button {
            class: "login-button {class}",
            disabled: loading(),
            onclick: onclick,
            match provider.as_str() {
                "github" => rsx! { Icon { width: 16, height: 16, icon: FaGithub } },
                "google" => rsx! { Icon { width: 16, height: 16, icon: FaGoogle } },
                _ => rsx! {},
            }
            if loading() {
                "Redirecting..."
            } else {
                "{label}"
            }
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        match api::logout().await {
            Ok(()) => {
                auth_state.set(AuthState {
                    user: None,
                    loading: false,
                });
                #[cfg(target_arch = "wasm32")]
                {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/");
                    }
                }
            }
            Err(e) => tracing::error!("Failed to log out: {}", e),
        }
    };

    rsx! {
        button {
            class: "logout-button {class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_loading_and_signed_out() {
        let state = AuthState::default();
        assert!(state.loading);
        assert!(!state.is_signed_in());
    }
}
