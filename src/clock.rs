//! Monotonic tick clock
//!
//! The staleness check compares millisecond readings from a monotonic
//! counter. The original Windows tick counter was 32-bit and wrapped after
//! ~49 days of uptime, so the dispatcher treats "new reading < stored
//! reading" as wraparound and re-baselines instead of clearing. The trait
//! keeps that contract explicit and lets tests drive time by hand.

use std::time::Instant;

/// Millisecond counter that increases monotonically but may wrap to a
/// smaller value after very long uptimes.
pub trait TickClock: Send + Sync {
    /// Current reading in milliseconds.
    fn now_ms(&self) -> u64;
}

/// Real clock: milliseconds elapsed since construction.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
pub mod testing {
    //! Manually driven clock for dispatcher and watchdog tests.

    use super::TickClock;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    /// Clock whose reading is set explicitly, including backwards to
    /// simulate counter wraparound.
    #[derive(Clone, Default)]
    pub struct ManualClock {
        now_ms: Arc<AtomicU64>,
    }

    impl ManualClock {
        pub fn new(start_ms: u64) -> Self {
            Self {
                now_ms: Arc::new(AtomicU64::new(start_ms)),
            }
        }

        pub fn set(&self, ms: u64) {
            self.now_ms.store(ms, Ordering::SeqCst);
        }

        pub fn advance(&self, ms: u64) {
            self.now_ms.fetch_add(ms, Ordering::SeqCst);
        }
    }

    impl TickClock for ManualClock {
        fn now_ms(&self) -> u64 {
            self.now_ms.load(Ordering::SeqCst)
        }
    }
}
