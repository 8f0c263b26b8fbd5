//! # Post content rules
//!
//! Chirp only accepts posts made of emojis. The same grapheme test backs two checks:
//!
//! - [`validate_post_content`]: run by the `create_post` server function before
//!   anything touches the database. Failures are reported as [`FieldErrors`] keyed by
//!   field name, so the composer can show the exact reason.
//! - [`accepts_composer_input`]: the keystroke gate used by the composer. The text
//!   field may only ever hold nothing or a single emoji.
//!
//! Server functions can only carry a message string back to the client, so
//! [`FieldErrors`] renders itself as a tagged JSON payload (see [`FIELD_ERRORS_TAG`])
//! and [`FieldErrors::decode`] digs it back out of whatever error text the client
//! receives.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Longest accepted post, in characters.
pub const MAX_POST_LENGTH: usize = 280;

/// Marks the start of an encoded [`FieldErrors`] payload inside an error message.
pub const FIELD_ERRORS_TAG: &str = "field-errors:";

pub const EMPTY_POST: &str = "Post cannot be empty";
pub const POST_TOO_LONG: &str = "Post must be at most 280 characters";
pub const ONLY_EMOJIS: &str = "Only emojis are allowed";

const ZERO_WIDTH_JOINER: char = '\u{200D}';
const EMOJI_PRESENTATION: char = '\u{FE0F}';
const COMBINING_KEYCAP: char = '\u{20E3}';

/// Per-field validation messages, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldErrors {
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against `field`.
    pub fn add(&mut self, field: &str, message: &str) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// First message recorded for `field`, if any.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.field_errors
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Find an encoded payload anywhere in `message` and parse it.
    ///
    /// Anything before the tag (error prefixes added in transit) and after the JSON
    /// object is ignored.
    pub fn decode(message: &str) -> Option<Self> {
        let (_, payload) = message.split_once(FIELD_ERRORS_TAG)?;
        serde_json::Deserializer::from_str(payload.trim_start())
            .into_iter::<FieldErrors>()
            .next()?
            .ok()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{FIELD_ERRORS_TAG}{json}")
    }
}

/// Check a post body before it is stored.
pub fn validate_post_content(content: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if content.is_empty() {
        errors.add("content", EMPTY_POST);
    } else {
        if content.chars().count() > MAX_POST_LENGTH {
            errors.add("content", POST_TOO_LONG);
        }
        if !content.graphemes(true).all(is_emoji_grapheme) {
            errors.add("content", ONLY_EMOJIS);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Whether the composer text field may take `candidate` as its new value.
pub fn accepts_composer_input(candidate: &str) -> bool {
    candidate.is_empty() || is_single_emoji(candidate)
}

/// Exactly one grapheme cluster, and that cluster is an emoji.
pub fn is_single_emoji(text: &str) -> bool {
    let mut graphemes = text.graphemes(true);
    matches!(
        (graphemes.next(), graphemes.next()),
        (Some(grapheme), None) if is_emoji_grapheme(grapheme)
    )
}

/// Whether one grapheme cluster renders as an emoji.
///
/// Covers plain pictographs, ZWJ sequences and skin tones (led by a pictograph), flags
/// (regional indicator pairs), keycaps (`1️⃣`) and text symbols forced into emoji
/// presentation (`©️`).
pub fn is_emoji_grapheme(grapheme: &str) -> bool {
    let Some(first) = grapheme.chars().next() else {
        return false;
    };

    if is_pictograph(first) {
        return true;
    }

    if matches!(first, '0'..='9' | '#' | '*') {
        return grapheme.contains(COMBINING_KEYCAP);
    }

    is_text_default_emoji(first) && grapheme.contains(EMOJI_PRESENTATION)
}

/// Symbols that render as text unless followed by U+FE0F.
fn is_text_default_emoji(c: char) -> bool {
    matches!(c,
        '\u{A9}' | '\u{AE}' |                   // copyright, registered
        '\u{203C}' | '\u{2049}' |               // double exclamation, exclamation question
        '\u{2122}' | '\u{2139}' |               // trade mark, information
        '\u{2194}'..='\u{2199}' |               // arrows
        '\u{21A9}'..='\u{21AA}' |
        '\u{2328}' | '\u{23CF}' |               // keyboard, eject
        '\u{24C2}' |                            // circled M
        '\u{25AA}'..='\u{25AB}' |               // small squares
        '\u{25B6}' | '\u{25C0}' |               // play, reverse
        '\u{25FB}'..='\u{25FE}' |               // medium squares
        '\u{2934}'..='\u{2935}' |               // curved arrows
        '\u{2B05}'..='\u{2B07}' |               // left, up, down arrows
        '\u{2B1B}'..='\u{2B1C}' |               // large squares
        '\u{3030}' | '\u{303D}' |               // wavy dash, part alternation mark
        '\u{3297}' | '\u{3299}'                 // circled ideographs
    )
}

fn is_pictograph(c: char) -> bool {
    c != ZERO_WIDTH_JOINER
        && matches!(c,
            '\u{1F000}'..='\u{1F02F}' | // Mahjong tiles
            '\u{1F0A0}'..='\u{1F0FF}' | // Playing cards
            '\u{1F100}'..='\u{1F1FF}' | // Enclosed alphanumerics, regional indicators
            '\u{1F200}'..='\u{1F2FF}' | // Enclosed ideographs
            '\u{1F300}'..='\u{1F5FF}' | // Misc symbols and pictographs
            '\u{1F600}'..='\u{1F64F}' | // Emoticons
            '\u{1F680}'..='\u{1F6FF}' | // Transport and map
            '\u{1F7E0}'..='\u{1F7FF}' | // Geometric shapes extended
            '\u{1F900}'..='\u{1F9FF}' | // Supplemental symbols and pictographs
            '\u{1FA70}'..='\u{1FAFF}' | // Symbols and pictographs extended-A
            '\u{2600}'..='\u{26FF}'   | // Misc symbols
            '\u{2700}'..='\u{27BF}'   | // Dingbats
            '\u{231A}'..='\u{231B}'   | // Watch, hourglass
            '\u{23E9}'..='\u{23FA}'   | // Media controls, alarm clock
            '\u{2B50}' | '\u{2B55}'     // Star, circle
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_emoji_gate() {
        assert!(accepts_composer_input(""));
        assert!(accepts_composer_input("🎉"));
        assert!(!accepts_composer_input("a"));
        assert!(!accepts_composer_input("🎉🎉"));
        assert!(!accepts_composer_input(" "));
    }

    #[test]
    fn test_multi_codepoint_emojis_are_one_grapheme() {
        // family ZWJ sequence, skin tone, flag, keycap, emoji-presentation symbol
        for emoji in [
            "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}",
            "\u{1F44D}\u{1F3FD}",
            "\u{1F1F3}\u{1F1F1}",
            "1\u{FE0F}\u{20E3}",
            "\u{2764}\u{FE0F}",
            "\u{A9}\u{FE0F}",
            "\u{2122}\u{FE0F}",
            "\u{2B06}\u{FE0F}",
        ] {
            assert!(is_single_emoji(emoji), "{emoji:?} should count as one emoji");
        }
    }

    #[test]
    fn test_plain_text_is_not_emoji() {
        for text in ["a", "1", "#", "\u{E9}", "\u{A9}", "\u{FE0F}", "!\u{FE0F}", "-\u{FE0F}"] {
            assert!(!is_emoji_grapheme(text), "{text:?} should not count as emoji");
        }
    }

    #[test]
    fn test_validate_accepts_emoji_posts() {
        assert_eq!(validate_post_content("🎉"), Ok(()));
        assert_eq!(validate_post_content("🦀🔥🚀"), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_post() {
        let errors = validate_post_content("").unwrap_err();
        assert_eq!(errors.first("content"), Some(EMPTY_POST));
    }

    #[test]
    fn test_validate_rejects_text() {
        let errors = validate_post_content("hello 🎉").unwrap_err();
        assert_eq!(errors.first("content"), Some(ONLY_EMOJIS));
    }

    #[test]
    fn test_validate_rejects_long_post() {
        let long = "🎉".repeat(MAX_POST_LENGTH + 1);
        let errors = validate_post_content(&long).unwrap_err();
        assert_eq!(errors.first("content"), Some(POST_TOO_LONG));
        assert_eq!(validate_post_content(&"🎉".repeat(MAX_POST_LENGTH)), Ok(()));
    }

    #[test]
    fn test_field_errors_survive_error_prefixes() {
        let mut errors = FieldErrors::new();
        errors.add("content", ONLY_EMOJIS);

        let message = format!("error running server function: {errors} (status 400)");
        let decoded = FieldErrors::decode(&message).unwrap();
        assert_eq!(decoded, errors);
        assert_eq!(decoded.first("content"), Some(ONLY_EMOJIS));
    }

    #[test]
    fn test_decode_without_payload() {
        assert!(FieldErrors::decode("Not authenticated").is_none());
        assert!(FieldErrors::decode("field-errors: not json").is_none());
    }
}
