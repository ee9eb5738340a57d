//! Cooperative control loop: network → poll → failsafe → yield.
//!
//! One iteration never blocks; the only wait is the configured yield. The
//! loop owns all control state, so nothing here needs a lock. The `running`
//! flag written by the signal handler is the only shared value.

use crate::channel::{ChannelStats, ControlChannel, PollOutcome};
use crate::network::NetworkLink;
use rover_common::config::ControlConfig;
use rover_common::hal::driver::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info};

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-iteration timing statistics (work time, yield excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    /// Total iterations executed.
    pub cycle_count: u64,
    /// Last iteration work time [µs].
    pub last_cycle_us: u64,
    /// Maximum iteration work time [µs].
    pub max_cycle_us: u64,
    /// Running sum for average computation.
    pub sum_cycle_us: u64,
    /// Iterations slower than the configured budget.
    pub slow_cycles: u64,
}

impl CycleStats {
    /// Create a new zeroed stats instance.
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_cycle_us: 0,
            max_cycle_us: 0,
            sum_cycle_us: 0,
            slow_cycles: 0,
        }
    }

    /// Record an iteration. O(1), no allocation.
    #[inline]
    pub fn record(&mut self, duration_us: u64, slow_threshold_us: u64) {
        self.cycle_count += 1;
        self.last_cycle_us = duration_us;
        self.max_cycle_us = self.max_cycle_us.max(duration_us);
        self.sum_cycle_us = self.sum_cycle_us.saturating_add(duration_us);
        if duration_us > slow_threshold_us {
            self.slow_cycles += 1;
        }
    }

    /// Average iteration time [µs] (returns 0 if no cycles).
    #[inline]
    pub fn avg_cycle_us(&self) -> u64 {
        if self.cycle_count == 0 {
            0
        } else {
            self.sum_cycle_us / self.cycle_count
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Totals reported when the loop exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Loop timing.
    pub cycles: CycleStats,
    /// Channel counters.
    pub channel: ChannelStats,
}

// ─── Cycle Runner ───────────────────────────────────────────────────

/// Drives the network link and the control channel.
pub struct CycleRunner<'a> {
    network: &'a mut NetworkLink,
    channel: ControlChannel<'a>,
    clock: Arc<dyn Clock>,
    yield_ms: u64,
    slow_cycle_us: u64,
    stats_interval: u64,
    stats: CycleStats,
}

impl<'a> CycleRunner<'a> {
    /// Assemble the loop from an already started link and an unbound channel.
    pub fn new(
        network: &'a mut NetworkLink,
        channel: ControlChannel<'a>,
        clock: Arc<dyn Clock>,
        config: &ControlConfig,
    ) -> Self {
        Self {
            network,
            channel,
            clock,
            yield_ms: config.loop_yield_ms,
            slow_cycle_us: config.slow_cycle_ms.saturating_mul(1000),
            stats_interval: config.stats_interval_cycles.max(1),
            stats: CycleStats::new(),
        }
    }

    /// Bind the control socket and start the watchdog.
    pub fn begin(&mut self) {
        self.channel.begin();
    }

    /// One iteration, including the trailing yield.
    pub fn run_once(&mut self) -> PollOutcome {
        let started = Instant::now();
        self.network.update();
        let outcome = self.channel.poll();
        self.channel.check_failsafe();
        let work_us = started.elapsed().as_micros() as u64;
        self.stats.record(work_us, self.slow_cycle_us);

        if self.stats.cycle_count % self.stats_interval == 0 {
            let ch = self.channel.stats();
            debug!(
                cycles = self.stats.cycle_count,
                avg_us = self.stats.avg_cycle_us(),
                max_us = self.stats.max_cycle_us,
                slow = self.stats.slow_cycles,
                frames = ch.frames,
                suppressed = ch.suppressed_writes,
                trips = ch.failsafe_trips,
                "loop stats"
            );
        }

        self.clock.delay_ms(self.yield_ms);
        outcome
    }

    /// Loop until `running` clears, then brake and center.
    pub fn run(&mut self, running: &AtomicBool) -> RunSummary {
        info!(
            "Control loop running ({} on {})",
            self.network.mode_label(),
            self.network
                .address()
                .map_or_else(|| "no address".to_string(), |a| a.to_string())
        );
        while running.load(Ordering::Relaxed) {
            self.run_once();
        }
        self.shutdown()
    }

    /// Put the actuators in their safe state and report totals.
    pub fn shutdown(&mut self) -> RunSummary {
        self.channel.hold_safe();
        let summary = self.summary();
        info!(
            "Control loop stopped after {} cycles (avg {} µs, max {} µs, {} failsafe trips)",
            summary.cycles.cycle_count,
            summary.cycles.avg_cycle_us(),
            summary.cycles.max_cycle_us,
            summary.channel.failsafe_trips
        );
        summary
    }

    /// Current totals.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            cycles: self.stats,
            channel: self.channel.stats(),
        }
    }

    /// The control channel.
    #[inline]
    pub fn channel(&self) -> &ControlChannel<'a> {
        &self.channel
    }
}
