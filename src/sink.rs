//! Profile sink boundary
//!
//! The sink is the external application whose profile/status text we set —
//! originally Skype's "mood text" reached over its automation object. The
//! core only ever touches two operations: an availability probe and the text
//! write. Everything else about the target app is off limits.

use anyhow::Result;
use log::info;

/// The external recipient of formatted status text.
///
/// Implementations must be cheap to probe; `set_status_text` is called at
/// most once per dispatched event and may fail without consequence beyond a
/// logged warning (the dispatcher never retries).
pub trait ProfileSink: Send {
    /// Whether the target application is currently reachable.
    fn is_available(&self) -> bool;

    /// Set the profile status text. An empty string clears it.
    fn set_status_text(&mut self, text: &str) -> Result<()>;
}

/// Stand-in sink that logs every write.
///
/// Used by the driver binary so the bridge can run end-to-end without the
/// real automation object present.
#[derive(Debug, Default)]
pub struct LogSink;

impl ProfileSink for LogSink {
    fn is_available(&self) -> bool {
        true
    }

    fn set_status_text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            info!("profile status cleared");
        } else {
            info!("profile status set: {text}");
        }
        Ok(())
    }
}
