//! Human-friendly rendering of identifier-style event names.
//!
//! `UserLoggedIn`, `user_logged_in`, `user-logged-in` and `user.loggedIn`
//! all render as `User Logged In`. Runs of capitals are kept together as
//! one acronym, so `HTTPRequestFailed` renders as `HTTP Request Failed`.

use tracing::debug;

/// Characters that separate words inside an identifier.
const SEPARATORS: [char; 5] = ['_', '-', '.', ':', '/'];

/// Reasons an event name cannot be formatted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The name is empty.
    #[error("event name is empty")]
    Empty,

    /// The name already reads as prose or contains characters an
    /// identifier cannot hold.
    #[error("event name {0:?} is not an identifier")]
    NotIdentifier(String),

    /// The name consists only of separators.
    #[error("event name {0:?} has no words")]
    NoWords(String),
}

/// Split an identifier-style name into words and title-case each word.
///
/// # Errors
///
/// Returns [`FormatError`] if `raw` is empty, holds whitespace or
/// punctuation other than word separators, or has no alphanumeric
/// characters.
pub fn format_event_name(raw: &str) -> Result<String, FormatError> {
    if raw.is_empty() {
        return Err(FormatError::Empty);
    }

    let chars: Vec<char> = raw.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (index, &c) in chars.iter().enumerate() {
        if SEPARATORS.contains(&c) {
            flush(&mut current, &mut words);
            continue;
        }
        if !c.is_alphanumeric() {
            return Err(FormatError::NotIdentifier(raw.to_owned()));
        }

        let previous = index.checked_sub(1).and_then(|i| chars.get(i)).copied();
        let next = index.checked_add(1).and_then(|i| chars.get(i)).copied();
        if c.is_uppercase() && starts_word(previous, next) {
            flush(&mut current, &mut words);
        }
        current.push(c);
    }
    flush(&mut current, &mut words);

    if words.is_empty() {
        return Err(FormatError::NoWords(raw.to_owned()));
    }

    Ok(words
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" "))
}

/// Format an event name for display, falling back to the raw name.
pub fn display_event_name(raw: &str) -> String {
    format_event_name(raw).unwrap_or_else(|error| {
        debug!(%error, "showing unformatted event name");
        raw.to_owned()
    })
}

/// Whether an uppercase character begins a new word.
fn starts_word(previous: Option<char>, next: Option<char>) -> bool {
    match previous {
        Some(p) if p.is_lowercase() || p.is_numeric() => true,
        // The last capital of an acronym starts the following word.
        Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
        _ => false,
    }
}

fn flush(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_camel_and_pascal_case() {
        assert_eq!(format_event_name("UserLoggedIn").ok().as_deref(), Some("User Logged In"));
        assert_eq!(format_event_name("userLoggedIn").ok().as_deref(), Some("User Logged In"));
    }

    #[test]
    fn splits_on_separators() {
        for raw in ["user_logged_in", "user-logged-in", "user.logged.in", "user:logged/in"] {
            assert_eq!(format_event_name(raw).ok().as_deref(), Some("User Logged In"));
        }
    }

    #[test]
    fn keeps_acronyms_together() {
        assert_eq!(
            format_event_name("HTTPRequestFailed").ok().as_deref(),
            Some("HTTP Request Failed")
        );
        assert_eq!(format_event_name("SCREAMING_CASE").ok().as_deref(), Some("SCREAMING CASE"));
    }

    #[test]
    fn digits_stay_with_their_word() {
        assert_eq!(format_event_name("retry2Failed").ok().as_deref(), Some("Retry2 Failed"));
    }

    #[test]
    fn rejects_empty_prose_and_separator_only_names() {
        assert_eq!(format_event_name(""), Err(FormatError::Empty));
        assert!(matches!(
            format_event_name("user logged in"),
            Err(FormatError::NotIdentifier(_))
        ));
        assert!(matches!(format_event_name("__"), Err(FormatError::NoWords(_))));
    }

    #[test]
    fn display_falls_back_to_raw_name() {
        assert_eq!(display_event_name("Already formatted"), "Already formatted");
        assert_eq!(display_event_name(""), "");
        assert_eq!(display_event_name("cacheMiss"), "Cache Miss");
    }
}
