//! Event dispatch and shared playback state
//!
//! The dispatcher is the only writer of downstream status: both the
//! notification path and the watchdog go through it. One mutex covers the
//! "is a status active" timestamp *and* the sink handle, so check-decide-push
//! is atomic between the two paths. The lock is never held across anything
//! but a single sink call.
//!
//! Decision rules per event:
//! - player stopped, or title and artist both empty → clear the status
//! - otherwise → format the template and push, stamping the change time
//!
//! A clear requested while no status is active is skipped outright so the
//! external app is not poked with redundant writes. Sink trouble of any kind
//! is logged and swallowed here; it never reaches the notification loop, and
//! it never advances the timestamp (a failed push must not pretend the
//! downstream text changed).

use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::clock::TickClock;
use crate::format::format_status;
use crate::sink::ProfileSink;
use crate::TrackEvent;

/// What a dispatch attempt did. Inspected and logged at the call boundary;
/// never an `Err` because no outcome here is exceptional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Non-empty status pushed; shared state now active.
    Pushed,
    /// Empty status pushed; shared state now unset.
    Cleared,
    /// Clear requested while already unset; sink not called.
    SkippedRedundant,
    /// Sink reported itself unreachable; nothing pushed, state untouched.
    SinkUnavailable,
    /// Sink call failed; state untouched.
    SinkError,
    /// Dispatcher already shut down; no-op.
    NotRunning,
}

/// What one watchdog inspection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Dispatcher already shut down.
    NotRunning,
    /// No status active, nothing to age out.
    Idle,
    /// Status younger than the staleness window.
    Fresh,
    /// Counter wrapped (reading went backwards); timestamp re-baselined.
    Rebaselined,
    /// Status was stale; a clear was attempted with the inner outcome.
    Stale(DispatchOutcome),
}

/// Everything both paths mutate, behind the one subsystem lock.
struct Shared {
    /// Clock reading of the last successful non-empty push. `None` means no
    /// active status is reflected downstream.
    last_change_ms: Option<u64>,
    sink: Box<dyn ProfileSink>,
}

/// Serializes all status decisions and sink writes.
pub struct Dispatcher {
    shared: Mutex<Shared>,
    clock: Box<dyn TickClock>,
    template: String,
    stale_after_ms: u64,
    /// One-way flag: flips true→false exactly once at shutdown, after which
    /// every entry point is a no-op.
    running: AtomicBool,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        template: impl Into<String>,
        stale_after: Duration,
        sink: Box<dyn ProfileSink>,
        clock: Box<dyn TickClock>,
    ) -> Self {
        Self {
            shared: Mutex::new(Shared {
                last_change_ms: None,
                sink,
            }),
            clock,
            template: template.into(),
            stale_after_ms: u64::try_from(stale_after.as_millis()).unwrap_or(u64::MAX),
            running: AtomicBool::new(true),
        }
    }

    /// Process one parsed notification.
    pub fn dispatch(&self, event: &TrackEvent) -> DispatchOutcome {
        if !self.running.load(Ordering::SeqCst) {
            return DispatchOutcome::NotRunning;
        }

        let outcome = if event.is_clear() {
            self.apply("")
        } else {
            let text = format_status(&self.template, &event.title, &event.artist);
            self.apply(&text)
        };
        debug!("dispatched event (playing={}): {outcome:?}", event.is_playing);
        outcome
    }

    /// One watchdog inspection: clear the status if it has been unchanged
    /// for at least the staleness window.
    pub fn watchdog_tick(&self) -> TickOutcome {
        if !self.running.load(Ordering::SeqCst) {
            return TickOutcome::NotRunning;
        }

        let mut shared = self.lock_shared();
        let Some(last) = shared.last_change_ms else {
            return TickOutcome::Idle;
        };

        let now = self.clock.now_ms();
        if now < last {
            // Counter wrapped after a very long uptime. Re-baseline and pick
            // the cycle back up on the next tick; an immediate clear here
            // would be wrong.
            shared.last_change_ms = Some(now);
            debug!("tick counter wrapped; re-baselined watchdog timestamp");
            TickOutcome::Rebaselined
        } else if now - last >= self.stale_after_ms {
            info!("status stale for {} ms, clearing", now - last);
            TickOutcome::Stale(self.apply_locked(&mut shared, ""))
        } else {
            TickOutcome::Fresh
        }
    }

    /// Shut down: flips the running flag (exactly once) and makes one final
    /// best-effort clear so the last status does not outlive the bridge.
    pub fn shutdown(&self) -> DispatchOutcome {
        if self.running.swap(false, Ordering::SeqCst) {
            self.apply("")
        } else {
            DispatchOutcome::NotRunning
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Whether a non-empty status is currently reflected downstream.
    #[must_use]
    pub fn has_active_status(&self) -> bool {
        self.lock_shared().last_change_ms.is_some()
    }

    fn apply(&self, text: &str) -> DispatchOutcome {
        let mut shared = self.lock_shared();
        self.apply_locked(&mut shared, text)
    }

    /// The one push/clear primitive. Caller holds the lock, so the state
    /// check and the sink write cannot interleave with the other path.
    fn apply_locked(&self, shared: &mut Shared, text: &str) -> DispatchOutcome {
        let clearing = text.is_empty();

        if clearing && shared.last_change_ms.is_none() {
            return DispatchOutcome::SkippedRedundant;
        }

        if !shared.sink.is_available() {
            warn!("profile sink is not running; cannot update status text");
            return DispatchOutcome::SinkUnavailable;
        }

        match shared.sink.set_status_text(text) {
            Ok(()) => {
                shared.last_change_ms = if clearing {
                    None
                } else {
                    Some(self.clock.now_ms())
                };
                if clearing {
                    DispatchOutcome::Cleared
                } else {
                    DispatchOutcome::Pushed
                }
            }
            Err(e) => {
                warn!("profile sink update failed: {e:#}");
                DispatchOutcome::SinkError
            }
        }
    }

    /// Lock the shared state, recovering from a poisoned mutex. A panic in
    /// a sink implementation must not wedge the whole subsystem.
    fn lock_shared(&self) -> MutexGuard<'_, Shared> {
        match self.shared.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
