//! UDP remote-control channel with write suppression and failsafe watchdog.
//!
//! ## Frame
//!
//! | Byte | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Throttle: 0 coast, 1 brake, 2–255 forward drive  |
//! | 1    | Steering angle, clamped by the steering actuator |
//!
//! Datagrams shorter than two bytes are discarded; trailing bytes are ignored.
//!
//! ## Failsafe
//!
//! `Armed → Tripped` when no valid frame arrived for longer than the timeout:
//! brake and center once. `Tripped → Armed` on the next valid frame, which
//! invalidates the cache so that frame is written through even if unchanged.

use crate::actuator::{SteeringActuator, TractionActuator};
use rover_common::config::ControlConfig;
use rover_common::hal::driver::{Clock, DatagramSocket};
use rover_common::protocol::{ControlCommand, PACKET_LEN};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Receive buffer size; longer datagrams are truncated, which only drops
/// ignored trailing bytes.
const RECV_BUF_LEN: usize = 32;

/// Last values written to the actuators. `None` means nothing applied yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuatorCache {
    /// Last throttle code.
    pub throttle: Option<u8>,
    /// Last raw steering angle.
    pub steering: Option<u8>,
}

impl ActuatorCache {
    /// Force the next values through.
    #[inline]
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }
}

/// Watchdog state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailsafeState {
    /// Frames arriving; watchdog running.
    Armed,
    /// Link lost; actuators held in brake/center.
    Tripped,
}

/// What a call to [`ControlChannel::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No datagram pending.
    Idle,
    /// Datagram shorter than a frame.
    Discarded,
    /// Receive error (logged).
    Failed,
    /// Valid frame processed.
    Applied(FrameReport),
}

/// Effects of one valid frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// The frame re-armed a tripped failsafe.
    pub rearmed: bool,
    /// The traction actuator was written.
    pub throttle_written: bool,
    /// The steering actuator was written.
    pub steering_written: bool,
}

/// Channel counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    /// Valid frames received.
    pub frames: u64,
    /// Datagrams discarded as too short.
    pub discarded: u64,
    /// Actuator writes skipped because the value was unchanged.
    pub suppressed_writes: u64,
    /// Failsafe trips.
    pub failsafe_trips: u64,
    /// Receive errors.
    pub recv_errors: u64,
}

/// Control channel.
///
/// Borrows the actuators for the life of the control loop.
pub struct ControlChannel<'a> {
    socket: Box<dyn DatagramSocket>,
    traction: &'a mut TractionActuator,
    steering: &'a mut SteeringActuator,
    clock: Arc<dyn Clock>,
    port: u16,
    timeout_ms: u64,
    cache: ActuatorCache,
    failsafe: FailsafeState,
    last_packet_ms: u64,
    bound: bool,
    recv_failing: bool,
    stats: ChannelStats,
}

impl<'a> ControlChannel<'a> {
    /// Create an unbound channel.
    pub fn new(
        socket: Box<dyn DatagramSocket>,
        traction: &'a mut TractionActuator,
        steering: &'a mut SteeringActuator,
        clock: Arc<dyn Clock>,
        config: &ControlConfig,
    ) -> Self {
        let last_packet_ms = clock.now_ms();
        Self {
            socket,
            traction,
            steering,
            clock,
            port: config.udp_port,
            timeout_ms: config.failsafe_timeout_ms,
            cache: ActuatorCache::default(),
            failsafe: FailsafeState::Armed,
            last_packet_ms,
            bound: false,
            recv_failing: false,
            stats: ChannelStats::default(),
        }
    }

    /// Bind the listening socket and start the watchdog.
    ///
    /// A bind failure is logged; the channel stays unbound and the failsafe
    /// still governs the actuators.
    pub fn begin(&mut self) {
        self.last_packet_ms = self.clock.now_ms();
        match self.socket.bind(self.port) {
            Ok(()) => {
                self.bound = true;
                info!("Listening for control frames on UDP port {}", self.port);
            }
            Err(e) => error!("UDP bind on port {} failed: {e}", self.port),
        }
    }

    /// Process at most one pending datagram. Never blocks.
    pub fn poll(&mut self) -> PollOutcome {
        if !self.bound {
            return PollOutcome::Idle;
        }
        let mut buf = [0u8; RECV_BUF_LEN];
        let len = match self.socket.try_recv(&mut buf) {
            Ok(Some(len)) => {
                self.recv_failing = false;
                len
            }
            Ok(None) => return PollOutcome::Idle,
            Err(e) => {
                self.stats.recv_errors += 1;
                if !self.recv_failing {
                    warn!("UDP receive failed: {e}");
                    self.recv_failing = true;
                }
                return PollOutcome::Failed;
            }
        };

        let Some(command) = ControlCommand::decode(&buf[..len]) else {
            self.stats.discarded += 1;
            debug!("discarded {len}-byte datagram (frame is {PACKET_LEN} bytes)");
            return PollOutcome::Discarded;
        };
        PollOutcome::Applied(self.apply(command))
    }

    fn apply(&mut self, command: ControlCommand) -> FrameReport {
        // Timestamp before anything that could stall.
        self.last_packet_ms = self.clock.now_ms();
        self.stats.frames += 1;

        let rearmed = self.failsafe == FailsafeState::Tripped;
        if rearmed {
            self.failsafe = FailsafeState::Armed;
            self.cache.invalidate();
            info!("Control link restored, failsafe re-armed");
        }

        let code = command.throttle_code();
        let throttle_written = self.cache.throttle != Some(code);
        if throttle_written {
            self.traction.apply(command.throttle());
            self.cache.throttle = Some(code);
        } else {
            self.stats.suppressed_writes += 1;
        }

        let angle = command.steering_angle();
        let steering_written = self.cache.steering != Some(angle);
        if steering_written {
            self.steering.write(i32::from(angle));
            self.cache.steering = Some(angle);
        } else {
            self.stats.suppressed_writes += 1;
        }

        FrameReport {
            rearmed,
            throttle_written,
            steering_written,
        }
    }

    /// Trip the failsafe when the link has been silent for longer than the
    /// timeout. Returns `true` on the iteration that trips.
    pub fn check_failsafe(&mut self) -> bool {
        if self.failsafe == FailsafeState::Tripped {
            return false;
        }
        let silent_ms = self.clock.now_ms().saturating_sub(self.last_packet_ms);
        if silent_ms <= self.timeout_ms {
            return false;
        }
        warn!(
            "FAILSAFE: no control frame for {silent_ms} ms (limit {} ms), braking and centering",
            self.timeout_ms
        );
        self.hold_safe();
        self.stats.failsafe_trips += 1;
        true
    }

    /// Brake, center and hold until the next valid frame.
    pub fn hold_safe(&mut self) {
        self.traction.brake();
        self.steering.center();
        self.failsafe = FailsafeState::Tripped;
    }

    /// Current watchdog state.
    #[inline]
    pub fn failsafe(&self) -> FailsafeState {
        self.failsafe
    }

    /// Current write-suppression cache.
    #[inline]
    pub fn cache(&self) -> ActuatorCache {
        self.cache
    }

    /// Timestamp of the last valid frame [ms].
    #[inline]
    pub fn last_packet_ms(&self) -> u64 {
        self.last_packet_ms
    }

    /// Whether the socket is bound.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Counters since construction.
    #[inline]
    pub fn stats(&self) -> ChannelStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::TractionState;
    use rover_common::config::RoverConfig;
    use rover_common::hal::driver::{HalDriver, RoverHardware};
    use rover_hal::{SimProbe, SimulationDriver};

    struct Rig {
        traction: TractionActuator,
        steering: SteeringActuator,
        socket: Option<Box<dyn DatagramSocket>>,
        clock: Arc<dyn Clock>,
        config: RoverConfig,
        probe: SimProbe,
    }

    fn rig() -> Rig {
        let config = RoverConfig::with_service_name("test");
        let mut driver = SimulationDriver::new();
        let RoverHardware {
            motor,
            servo,
            socket,
            clock,
            ..
        } = driver.claim(&config).unwrap();
        let mut traction = TractionActuator::new(motor, &config.traction);
        let mut steering = SteeringActuator::new(servo, &config.steering);
        traction.begin();
        steering.begin();
        Rig {
            traction,
            steering,
            socket: Some(socket),
            clock,
            probe: driver.probe().unwrap(),
            config,
        }
    }

    impl Rig {
        fn channel(&mut self) -> ControlChannel<'_> {
            let socket = self.socket.take().unwrap();
            let mut channel = ControlChannel::new(
                socket,
                &mut self.traction,
                &mut self.steering,
                self.clock.clone(),
                &self.config.control,
            );
            channel.begin();
            channel
        }
    }

    #[test]
    fn begin_binds_configured_port() {
        let mut rig = rig();
        let probe = rig.probe.clone();
        let channel = rig.channel();
        assert!(channel.is_bound());
        assert_eq!(probe.bound_port(), Some(9999));
        assert_eq!(channel.failsafe(), FailsafeState::Armed);
    }

    #[test]
    fn first_frame_always_writes() {
        let mut rig = rig();
        let probe = rig.probe.clone();
        let mut channel = rig.channel();
        // Matches the state begin() left behind, still written through.
        probe.inject(&[1, 90]);
        let outcome = channel.poll();
        assert_eq!(
            outcome,
            PollOutcome::Applied(FrameReport {
                rearmed: false,
                throttle_written: true,
                steering_written: true,
            })
        );
        assert_eq!(
            channel.cache(),
            ActuatorCache {
                throttle: Some(1),
                steering: Some(90)
            }
        );
    }

    #[test]
    fn repeated_frame_is_suppressed() {
        let mut rig = rig();
        let probe = rig.probe.clone();
        let mut channel = rig.channel();
        probe.inject(&[150, 100]);
        channel.poll();
        let duty_writes = probe.duty_writes();
        let servo_writes = probe.servo_writes();

        probe.inject(&[150, 100]);
        let outcome = channel.poll();
        assert!(matches!(
            outcome,
            PollOutcome::Applied(FrameReport {
                throttle_written: false,
                steering_written: false,
                ..
            })
        ));
        assert_eq!(probe.duty_writes(), duty_writes);
        assert_eq!(probe.servo_writes(), servo_writes);
        assert_eq!(channel.stats().suppressed_writes, 2);
    }

    #[test]
    fn short_datagram_is_discarded_without_touching_watchdog() {
        let mut rig = rig();
        let probe = rig.probe.clone();
        let mut channel = rig.channel();
        let before = channel.last_packet_ms();
        probe.advance_ms(100);
        probe.inject(&[150]);
        assert_eq!(channel.poll(), PollOutcome::Discarded);
        assert_eq!(channel.last_packet_ms(), before);
        assert_eq!(channel.cache(), ActuatorCache::default());
        assert_eq!(channel.stats().discarded, 1);
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut rig = rig();
        let probe = rig.probe.clone();
        let mut channel = rig.channel();
        probe.inject(&[200, 80, 1, 2, 3]);
        assert!(matches!(channel.poll(), PollOutcome::Applied(_)));
        assert_eq!(probe.duty(), 200);
        assert_eq!(probe.servo_angle(), Some(80));
    }

    #[test]
    fn poll_handles_one_datagram_per_call() {
        let mut rig = rig();
        let probe = rig.probe.clone();
        let mut channel = rig.channel();
        probe.inject(&[100, 90]);
        probe.inject(&[0, 90]);
        channel.poll();
        assert_eq!(probe.pending_datagrams(), 1);
        channel.poll();
        assert_eq!(probe.pending_datagrams(), 0);
        assert_eq!(channel.poll(), PollOutcome::Idle);
    }

    #[test]
    fn failsafe_trips_once_and_holds() {
        let mut rig = rig();
        let probe = rig.probe.clone();
        let mut channel = rig.channel();
        probe.inject(&[180, 110]);
        channel.poll();

        probe.advance_ms(500);
        assert!(!channel.check_failsafe(), "exactly at the limit keeps running");
        probe.advance_ms(1);
        assert!(channel.check_failsafe());
        assert_eq!(channel.failsafe(), FailsafeState::Tripped);
        assert_eq!(probe.duty(), 255);
        assert_eq!(probe.servo_angle(), Some(90));

        let duty_writes = probe.duty_writes();
        let servo_writes = probe.servo_writes();
        for _ in 0..50 {
            probe.advance_ms(10);
            assert!(!channel.check_failsafe());
        }
        assert_eq!(probe.duty_writes(), duty_writes);
        assert_eq!(probe.servo_writes(), servo_writes);
        assert_eq!(channel.stats().failsafe_trips, 1);
    }

    #[test]
    fn recovery_forces_fresh_writes() {
        let mut rig = rig();
        let probe = rig.probe.clone();
        let mut channel = rig.channel();
        probe.inject(&[1, 90]);
        channel.poll();
        probe.advance_ms(600);
        assert!(channel.check_failsafe());

        // Same values as before the trip still reach the hardware.
        let duty_writes = probe.duty_writes();
        let servo_writes = probe.servo_writes();
        probe.inject(&[1, 90]);
        let outcome = channel.poll();
        assert_eq!(
            outcome,
            PollOutcome::Applied(FrameReport {
                rearmed: true,
                throttle_written: true,
                steering_written: true,
            })
        );
        assert_eq!(probe.duty_writes(), duty_writes + 1);
        assert_eq!(probe.servo_writes(), servo_writes + 1);
        assert_eq!(channel.failsafe(), FailsafeState::Armed);
    }

    #[test]
    fn silent_link_from_boot_trips() {
        let mut rig = rig();
        let probe = rig.probe.clone();
        let mut channel = rig.channel();
        probe.advance_ms(501);
        assert!(channel.check_failsafe());
        drop(channel);
        assert_eq!(rig.traction.state(), TractionState::Brake);
    }

    #[test]
    fn unbound_channel_still_trips() {
        let mut rig = rig();
        let probe = rig.probe.clone();
        let socket = rig.socket.take().unwrap();
        let mut channel = ControlChannel::new(
            socket,
            &mut rig.traction,
            &mut rig.steering,
            rig.clock.clone(),
            &rig.config.control,
        );
        probe.inject(&[150, 90]);
        assert_eq!(channel.poll(), PollOutcome::Idle);
        probe.advance_ms(501);
        assert!(channel.check_failsafe());
    }
}
