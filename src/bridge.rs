//! Bridge wiring
//!
//! Composes the parser, dispatcher, and watchdog into the running bridge.
//! The notification listener (however raw payloads reach the process) stays
//! outside; callers hand payloads in via [`Bridge::handle_notification`] or
//! [`Bridge::handle_raw`].

use anyhow::Result;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

use crate::clock::SystemClock;
use crate::config::Config;
use crate::dispatcher::{DispatchOutcome, Dispatcher};
use crate::payload;
use crate::sink::ProfileSink;
use crate::watchdog::{self, WatchdogHandle};

/// How long shutdown waits for the watchdog before abandoning it.
const STOP_GRACE: Duration = Duration::from_secs(2);

/// The assembled bridge: event path in, watchdog in the background, one
/// profile sink out.
pub struct Bridge {
    dispatcher: Arc<Dispatcher>,
    watchdog: Option<WatchdogHandle>,
}

impl Bridge {
    /// Build the bridge and start its watchdog.
    pub fn new(config: &Config, sink: Box<dyn ProfileSink>) -> Result<Self> {
        Self::with_period(config, sink, config.watchdog_period())
    }

    /// As [`Bridge::new`] but with an explicit watchdog period, which is also
    /// the staleness window.
    pub fn with_period(
        config: &Config,
        sink: Box<dyn ProfileSink>,
        period: Duration,
    ) -> Result<Self> {
        let dispatcher = Arc::new(Dispatcher::new(
            config.display_template.clone(),
            period,
            sink,
            Box::new(SystemClock::new()),
        ));
        let watchdog = watchdog::spawn(Arc::clone(&dispatcher), period)?;
        Ok(Self {
            dispatcher,
            watchdog: Some(watchdog),
        })
    }

    /// Handle one decoded notification payload.
    ///
    /// Returns `None` for records without the now-playing tag; those belong
    /// to somebody else and are dropped without comment.
    pub fn handle_notification(&self, data: &str) -> Option<DispatchOutcome> {
        let Some(event) = payload::parse(data) else {
            debug!("ignoring unrecognized notification record");
            return None;
        };
        Some(self.dispatcher.dispatch(&event))
    }

    /// Handle one raw UTF-16LE wire block.
    pub fn handle_raw(&self, raw: &[u8]) -> Result<Option<DispatchOutcome>> {
        let data = payload::decode_utf16le(raw)?;
        Ok(self.handle_notification(&data))
    }

    /// Whether a non-empty status is currently reflected downstream.
    #[must_use]
    pub fn has_active_status(&self) -> bool {
        self.dispatcher.has_active_status()
    }

    /// Shut the bridge down: stop the watchdog (bounded wait), push one
    /// final clear, and turn every later call into a no-op. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(watchdog) = self.watchdog.take() {
            watchdog.stop(STOP_GRACE);
        }
        match self.dispatcher.shutdown() {
            DispatchOutcome::NotRunning => {}
            outcome => info!("bridge shut down, final clear: {outcome:?}"),
        }
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        self.shutdown();
    }
}
