//! Manually advanced clock.

use rover_common::hal::driver::Clock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Simulated monotonic clock. Time only moves through `delay_ms`, so a
/// control loop yielding 1 ms per iteration sees 1 ms pass per iteration.
#[derive(Debug, Default)]
pub struct SimClock {
    now_ms: AtomicU64,
}

impl SimClock {
    /// Clock starting at `start_ms`.
    pub fn starting_at(start_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(start_ms),
        }
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::Acquire)
    }

    fn delay_ms(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::AcqRel);
    }
}
