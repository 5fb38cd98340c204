//! Now-playing status bridge
//!
//! This crate relays "now playing" notifications from a media player into the
//! profile status text of another application. Players that still speak the
//! MSN Messenger protocol broadcast a delimited text record on every track
//! change; this library parses that record, decides whether a status should
//! be shown, and pushes the formatted text to a [`sink::ProfileSink`].
//!
//! A background watchdog clears the status if no event has arrived for a
//! configurable number of minutes, so a crashed player never leaves a stale
//! "Listening to ..." line behind.

use serde::{Deserialize, Serialize};

pub mod bridge;
pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod format;
pub mod payload;
pub mod sink;
pub mod watchdog;

pub use bridge::Bridge;
pub use config::Config;
pub use dispatcher::{DispatchOutcome, Dispatcher};

/// One parsed now-playing notification.
///
/// Produced by [`payload::parse`]; fully determined by the raw payload and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrackEvent {
    /// Whether the player reports itself playing.
    ///
    /// Status code `"0"` means stopped/paused; *any* other code counts as
    /// playing. Stop is the only explicit negative signal in the protocol,
    /// so unknown future codes keep working.
    pub is_playing: bool,

    /// Track title, verbatim from the payload. May be empty.
    pub title: String,

    /// Artist, verbatim from the payload. May be empty.
    pub artist: String,

    /// Format hint from the payload (codec or protocol variant tag).
    /// Carried through but not interpreted.
    pub format_hint: String,
}

impl TrackEvent {
    /// True when the event carries nothing worth showing: either the player
    /// stopped, or both text fields are empty.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        !self.is_playing || (self.title.is_empty() && self.artist.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_event_is_clear() {
        let event = TrackEvent {
            is_playing: false,
            title: "Song".into(),
            artist: "Artist".into(),
            format_hint: String::new(),
        };
        assert!(event.is_clear());
    }

    #[test]
    fn test_playing_but_empty_fields_is_clear() {
        let event = TrackEvent {
            is_playing: true,
            ..TrackEvent::default()
        };
        assert!(event.is_clear());
    }

    #[test]
    fn test_playing_with_title_only_is_not_clear() {
        let event = TrackEvent {
            is_playing: true,
            title: "Song".into(),
            ..TrackEvent::default()
        };
        assert!(!event.is_clear());
    }

    #[test]
    fn test_playing_with_artist_only_is_not_clear() {
        let event = TrackEvent {
            is_playing: true,
            artist: "Artist".into(),
            ..TrackEvent::default()
        };
        assert!(!event.is_clear());
    }
}
