//! Stale-status watchdog
//!
//! A dedicated background thread that wakes up once per configured period and
//! asks the dispatcher to age out the current status. If the player crashed
//! or quit silently, the last "Listening ..." text would otherwise stay in
//! the target app's profile forever.
//!
//! The sleep is a blocking `recv_timeout` on the stop channel, so there is no
//! polling and a shutdown signal interrupts the wait immediately. Stopping is
//! cooperative with a bounded grace period; a thread that does not confirm in
//! time is abandoned rather than joined, because a stuck sink call must not
//! block process exit.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::dispatcher::{Dispatcher, TickOutcome};

/// Handle to the running watchdog thread.
pub struct WatchdogHandle {
    stop_tx: mpsc::Sender<()>,
    done_rx: mpsc::Receiver<()>,
    thread: Option<JoinHandle<()>>,
}

/// Spawn the watchdog. Each tick sleeps one full `period`, then inspects the
/// dispatcher's shared state.
pub fn spawn(dispatcher: Arc<Dispatcher>, period: Duration) -> Result<WatchdogHandle> {
    let (stop_tx, stop_rx) = mpsc::channel();
    let (done_tx, done_rx) = mpsc::channel();

    let thread = thread::Builder::new()
        .name("watchdog".to_string())
        .spawn(move || {
            run(&dispatcher, period, &stop_rx);
            let _ = done_tx.send(());
        })
        .context("Failed to spawn watchdog thread")?;

    Ok(WatchdogHandle {
        stop_tx,
        done_rx,
        thread: Some(thread),
    })
}

fn run(dispatcher: &Dispatcher, period: Duration, stop_rx: &mpsc::Receiver<()>) {
    debug!("watchdog running, period {period:?}");
    loop {
        match stop_rx.recv_timeout(period) {
            // Stop requested, or the handle was dropped.
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        // Every tick outcome, including sink trouble during a stale clear,
        // ends here; one bad tick never takes the loop down.
        match dispatcher.watchdog_tick() {
            TickOutcome::NotRunning => break,
            TickOutcome::Stale(inner) => debug!("watchdog stale clear: {inner:?}"),
            outcome => debug!("watchdog tick: {outcome:?}"),
        }
    }
    debug!("watchdog stopped");
}

impl WatchdogHandle {
    /// Ask the thread to stop and wait up to `grace` for it to confirm.
    ///
    /// On timeout the thread is detached, not joined; it will notice the
    /// stop signal whenever its current wait or sink call returns.
    pub fn stop(mut self, grace: Duration) {
        let _ = self.stop_tx.send(());
        match self.done_rx.recv_timeout(grace) {
            Ok(()) => {
                if let Some(thread) = self.thread.take() {
                    let _ = thread.join();
                }
            }
            Err(_) => {
                warn!("watchdog did not stop within {grace:?}; abandoning thread");
                self.thread = None;
            }
        }
    }
}
