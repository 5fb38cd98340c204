//! Now-playing payload parser
//!
//! Players emit track changes as a `WM_COPYDATA`-style text record meant for
//! MSN Messenger:
//!
//! ```text
//! \0Music\0<status>\0<format>\0<title>\0<artist>\0<album>\0
//! ```
//!
//! The delimiter is the *literal two characters* backslash and zero, not a
//! NUL byte. The record must start with the `\0Music\0` tag; anything else on
//! the channel is somebody else's message and is ignored. Trailing fields may
//! be missing entirely (older players truncate the record), in which case the
//! missing slots read as empty strings. This leniency is part of the
//! contract, not a recovery path.

use anyhow::{bail, Result};

use crate::TrackEvent;

/// Field delimiter: the literal text `\0`.
pub const DELIMITER: &str = "\\0";

/// Record type tag every now-playing payload starts with.
pub const MUSIC_TAG: &str = "\\0Music\\0";

/// Status code meaning stopped or paused. Every other code means playing.
const STATUS_STOPPED: &str = "0";

/// Parse one notification payload.
///
/// Returns `None` when the payload does not start with the `\0Music\0` tag —
/// that is "not our message", not an error. A recognized record always parses;
/// missing trailing fields come back as empty strings.
#[must_use]
pub fn parse(data: &str) -> Option<TrackEvent> {
    let rest = data.strip_prefix(MUSIC_TAG)?;

    // Fixed field order: status, format, title, artist. The album slot and
    // anything after it are not used.
    let mut fields = rest.split(DELIMITER);
    let status = fields.next().unwrap_or("");
    let format_hint = fields.next().unwrap_or("");
    let title = fields.next().unwrap_or("");
    let artist = fields.next().unwrap_or("");

    Some(TrackEvent {
        is_playing: status != STATUS_STOPPED,
        title: title.to_string(),
        artist: artist.to_string(),
        format_hint: format_hint.to_string(),
    })
}

/// Re-emit an event in wire format.
///
/// Inverse of [`parse`] for events whose text fields do not contain the
/// delimiter sequence. The album slot is emitted empty.
#[must_use]
pub fn serialize(event: &TrackEvent) -> String {
    let status = if event.is_playing { "1" } else { STATUS_STOPPED };
    format!(
        "{MUSIC_TAG}{status}{DELIMITER}{format}{DELIMITER}{title}{DELIMITER}{artist}{DELIMITER}{DELIMITER}",
        format = event.format_hint,
        title = event.title,
        artist = event.artist,
    )
}

/// Decode the raw wire block into text.
///
/// On the wire the record arrives as UTF-16LE, NUL-terminated (the producer
/// fills a fixed-size buffer). Decoding stops at the first NUL code unit; an
/// odd byte count or invalid UTF-16 is a real error.
pub fn decode_utf16le(raw: &[u8]) -> Result<String> {
    if raw.len() % 2 != 0 {
        bail!("payload has odd byte length {}", raw.len());
    }

    let units: Vec<u16> = raw
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0)
        .collect();

    match String::from_utf16(&units) {
        Ok(text) => Ok(text),
        Err(_) => bail!("payload is not valid UTF-16"),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_parse_never_panics(data in ".*") {
            let _ = parse(&data);
        }

        #[test]
        fn prop_recognized_records_always_parse(rest in ".*") {
            let data = format!("{MUSIC_TAG}{rest}");
            prop_assert!(parse(&data).is_some());
        }

        #[test]
        fn prop_round_trip_on_delimiter_free_fields(
            is_playing in any::<bool>(),
            // Printable ASCII without backslash, so no delimiter can form.
            title in "[ -\\[\\]-~]{0,40}",
            artist in "[ -\\[\\]-~]{0,40}",
            format_hint in "[a-zA-Z0-9]{0,10}",
        ) {
            let event = TrackEvent { is_playing, title, artist, format_hint };
            prop_assert_eq!(parse(&serialize(&event)).unwrap(), event);
        }

        #[test]
        fn prop_decode_never_panics(raw in proptest::collection::vec(any::<u8>(), 0..64)) {
            let _ = decode_utf16le(&raw);
        }
    }
}
