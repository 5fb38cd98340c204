//! Status text formatting
//!
//! Turns a track's title and artist into the display string pushed to the
//! profile sink, using the user's template from the config file. `%1` is the
//! title slot, `%2` the artist slot.

/// Maximum length of the pushed status text, in characters.
///
/// Anything longer is cut at this cap; the exact cut point is cosmetic, but
/// it must never split a multi-byte character.
pub const MAX_STATUS_CHARS: usize = 199;

/// Substitute title and artist into the two-slot template and apply the
/// display cap.
#[must_use]
pub fn format_status(template: &str, title: &str, artist: &str) -> String {
    let text = template.replace("%1", title).replace("%2", artist);
    truncate_chars(&text, MAX_STATUS_CHARS)
}

/// Truncate a string to at most `max_chars` Unicode characters.
///
/// Counts `char`s instead of slicing bytes, so multi-byte text never panics.
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_basic() {
        assert_eq!(
            format_status("Listening to '%1' by %2", "Song A", "Artist B"),
            "Listening to 'Song A' by Artist B"
        );
    }

    #[test]
    fn test_format_empty_artist() {
        assert_eq!(
            format_status("Listening to '%1' by %2", "Song A", ""),
            "Listening to 'Song A' by "
        );
    }

    #[test]
    fn test_format_template_without_slots() {
        assert_eq!(format_status("static text", "Song", "Artist"), "static text");
    }

    #[test]
    fn test_format_applies_cap() {
        let long_title = "x".repeat(300);
        let result = format_status("%1 - %2", &long_title, "A");
        assert_eq!(result.chars().count(), MAX_STATUS_CHARS);
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_chars("Hi", 10), "Hi");
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate_chars("Hello", 5), "Hello");
    }

    #[test]
    fn test_truncate_unicode() {
        let s = "日本語テスト";
        let result = truncate_chars(s, 4);
        assert_eq!(result, "日本語テ");
        assert!(result.is_char_boundary(result.len()));
    }
}
