use api::validation::accepts_composer_input;
use api::FieldErrors;
use dioxus::prelude::*;
use dioxus_primitives::toast::{use_toast, ToastOptions};

use crate::feed::{use_feed_version, FeedVersion};
use crate::{use_auth, LoadingSpinner};

const COMPOSER_INPUT_ID: &str = "composer-input";

/// Shown when a failed post carries no field error of its own.
pub const GENERIC_CREATE_ERROR: &str = "Failed to create post";

/// State of the post composer, kept apart from the component so it can be tested
/// without a renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composer {
    pub input: String,
    /// A `create_post` call is in flight.
    pub posting: bool,
}

impl Composer {
    /// Take `candidate` as the new input if it is empty or a single emoji.
    /// Returns whether it was taken; a rejected candidate leaves the state unchanged.
    pub fn offer(&mut self, candidate: String) -> bool {
        if self.posting || !accepts_composer_input(&candidate) {
            return false;
        }
        self.input = candidate;
        true
    }

    /// Apply a value the text field reported. When it is rejected, returns the value
    /// the field must be reset to, since the browser already shows the rejected text.
    pub fn reconcile(&mut self, candidate: String) -> Option<String> {
        if self.offer(candidate) {
            None
        } else {
            Some(self.input.clone())
        }
    }

    /// Whether a key press should be stopped before it reaches the text field.
    ///
    /// Only plain keys typed into an empty field are judged here. Shortcuts (paste,
    /// select all, copy) and edits of an existing emoji, which may replace a
    /// selection, go through [`Composer::reconcile`] instead.
    pub fn blocks_key(&self, key: &str, with_modifier: bool) -> bool {
        !with_modifier && self.input.is_empty() && !accepts_composer_input(key)
    }

    pub fn can_submit(&self) -> bool {
        !self.input.is_empty() && !self.posting
    }

    /// Start a submission, returning the content to send.
    ///
    /// `None` when there is nothing to send or a post is already in flight.
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.posting = true;
        Some(self.input.clone())
    }

    /// The post was created: clear the input and mark the feed stale.
    pub fn succeeded(&mut self, feed: &mut FeedVersion) {
        self.input.clear();
        self.posting = false;
        feed.invalidate();
    }

    /// The post was refused. Returns the message to show the user.
    pub fn failed(&mut self, error: &str) -> String {
        self.posting = false;
        creation_error_message(error)
    }
}

/// The server's `content` field error if the message carries one, else a generic
/// failure message.
pub fn creation_error_message(error: &str) -> String {
    FieldErrors::decode(error)
        .and_then(|errors| errors.first("content").map(str::to_string))
        .unwrap_or_else(|| GENERIC_CREATE_ERROR.to_string())
}

/// Emoji composer shown above the feed for signed-in users.
#[component]
pub fn CreatePostWizard() -> Element {
    let auth = use_auth();
    let mut composer = use_signal(Composer::default);
    let mut feed_version = use_feed_version();
    let toast = use_toast();

    let publish = use_callback(move |()| {
        let Some(content) = composer.write().submit() else {
            return;
        };
        spawn(async move {
            match api::create_post(content).await {
                Ok(_) => composer.write().succeeded(&mut feed_version.write()),
                Err(e) => {
                    let message = composer.write().failed(&e.to_string());
                    toast.error(message, ToastOptions::new());
                }
            }
        });
    });

    let Some(user) = auth().user else {
        return rsx! {};
    };

    let state = composer();

    rsx! {
        div {
            class: "composer",
            img {
                class: "avatar avatar-lg",
                src: "{user.profile_picture}",
                alt: "Profile Image",
                width: 64,
                height: 64,
            }
            input {
                id: COMPOSER_INPUT_ID,
                class: "composer-input",
                r#type: "text",
                placeholder: "Type some emojis!",
                value: "{state.input}",
                disabled: state.posting,
                oninput: move |evt: FormEvent| {
                    let rejected = composer.write().reconcile(evt.value());
                    if let Some(previous) = rejected {
                        reset_input(previous);
                    }
                },
                onkeydown: move |evt: KeyboardEvent| {
                    let with_modifier = evt
                        .modifiers()
                        .intersects(Modifiers::CONTROL | Modifiers::META | Modifiers::ALT);
                    match evt.key() {
                        Key::Enter => {
                            evt.prevent_default();
                            publish.call(());
                        }
                        Key::Character(ref typed)
                            if composer.peek().blocks_key(typed, with_modifier) =>
                        {
                            evt.prevent_default();
                        }
                        _ => {}
                    }
                },
            }
            if state.can_submit() {
                button {
                    class: "composer-submit",
                    onclick: move |_| publish.call(()),
                    "Post"
                }
            }
            if state.posting {
                div {
                    class: "composer-spinner",
                    LoadingSpinner { size: 20 }
                }
            }
        }
    }
}

/// Overwrite what the text field shows. The rendered `value` is unchanged after a
/// rejected edit, so the DOM is not patched on its own.
fn reset_input(value: String) {
    let eval = document::eval(&format!(
        r#"
        const value = await dioxus.recv();
        const input = document.getElementById("{COMPOSER_INPUT_ID}");
        if (input) {{ input.value = value; }}
        "#
    ));
    if let Err(e) = eval.send(value) {
        tracing::warn!("Failed to reset composer input: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::validation::ONLY_EMOJIS;

    #[test]
    fn test_empty_input_is_never_submitted() {
        let mut composer = Composer::default();
        assert_eq!(composer.submit(), None);
        assert!(!composer.posting);
    }

    #[test]
    fn test_emoji_gate() {
        let mut composer = Composer::default();
        assert!(composer.offer("🎉".to_string()));
        assert_eq!(composer.input, "🎉");

        let before = composer.clone();
        assert!(!composer.offer("a".to_string()));
        assert!(!composer.offer("🎉a".to_string()));
        assert_eq!(composer, before);

        assert!(composer.offer(String::new()));
        assert_eq!(composer.input, "");
    }

    #[test]
    fn test_key_gate() {
        let mut composer = Composer::default();
        assert!(!composer.blocks_key("🎉", false));
        assert!(composer.blocks_key("a", false));

        composer.offer("🎉".to_string());
        // may replace a selected emoji; left to the input handler
        assert!(!composer.blocks_key("🔥", false));
    }

    #[test]
    fn test_shortcuts_pass_the_key_gate() {
        let composer = Composer::default();
        for key in ["v", "a", "c"] {
            assert!(!composer.blocks_key(key, true), "ctrl/cmd+{key} must not be blocked");
        }
    }

    #[test]
    fn test_rejected_edit_resets_the_field() {
        let mut composer = Composer::default();
        assert_eq!(composer.reconcile("abc".to_string()), Some(String::new()));
        assert_eq!(composer.input, "");

        assert_eq!(composer.reconcile("🎉".to_string()), None);
        assert_eq!(composer.reconcile("🎉🔥".to_string()), Some("🎉".to_string()));
        assert_eq!(composer.input, "🎉");

        // replacing the whole selection with another emoji
        assert_eq!(composer.reconcile("🔥".to_string()), None);
        assert_eq!(composer.input, "🔥");
    }

    #[test]
    fn test_submit_blocks_double_posting() {
        let mut composer = Composer::default();
        composer.offer("🦀".to_string());

        assert_eq!(composer.submit().as_deref(), Some("🦀"));
        assert!(composer.posting);
        assert_eq!(composer.submit(), None);
        assert!(!composer.offer("🎉".to_string()));
    }

    #[test]
    fn test_success_clears_input_and_invalidates_feed() {
        let mut composer = Composer::default();
        let mut feed = FeedVersion::default();
        composer.offer("🦀".to_string());
        composer.submit();

        composer.succeeded(&mut feed);
        assert_eq!(composer.input, "");
        assert!(!composer.posting);
        assert_eq!(feed, FeedVersion(1));
    }

    #[test]
    fn test_failure_shows_content_field_error() {
        let mut errors = FieldErrors::new();
        errors.add("content", ONLY_EMOJIS);
        let server_message = format!("error running server function: {errors}");

        let mut composer = Composer::default();
        composer.offer("🦀".to_string());
        composer.submit();

        assert_eq!(composer.failed(&server_message), ONLY_EMOJIS);
        assert!(!composer.posting);
        assert_eq!(composer.input, "🦀");
    }

    #[test]
    fn test_failure_without_field_error_is_generic() {
        assert_eq!(creation_error_message("Not authenticated"), GENERIC_CREATE_ERROR);

        let mut other_field = FieldErrors::new();
        other_field.add("title", "Too short");
        assert_eq!(
            creation_error_message(&other_field.to_string()),
            GENERIC_CREATE_ERROR
        );
    }
}
