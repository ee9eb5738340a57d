//! Simulated board state and the probe used to observe it.
//!
//! Every simulated peripheral writes into one [`SimBoard`] behind a
//! `parking_lot::Mutex`. Tests hold a [`SimProbe`] to read back what the
//! control core did and to feed it datagrams and time.

use parking_lot::Mutex;
use rover_common::hal::driver::Clock;
use rover_common::hal::types::{AccessPointSettings, PinLevel, RadioMode};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Board state shared by all simulated peripherals of one driver.
pub(crate) type SharedBoard = Arc<Mutex<SimBoard>>;

/// Servo signal parameters captured at attach time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoAttach {
    /// Signal period [Hz].
    pub period_hz: u32,
    /// Pulse at 0° [µs].
    pub min_pulse_us: u16,
    /// Pulse at 180° [µs].
    pub max_pulse_us: u16,
}

/// Recorded state of the simulated board.
#[derive(Debug, Default)]
pub struct SimBoard {
    pub(crate) pins: HashMap<u8, PinLevel>,
    pub(crate) pin_writes: usize,
    pub(crate) pwm_config: Option<(u32, u8)>,
    pub(crate) duty: u32,
    pub(crate) duty_writes: usize,
    pub(crate) servo_attach: Option<ServoAttach>,
    pub(crate) servo_angle: Option<u8>,
    pub(crate) servo_history: Vec<u8>,
    pub(crate) radio_mode: RadioMode,
    pub(crate) station_ssid: Option<String>,
    pub(crate) access_point: Option<AccessPointSettings>,
    pub(crate) published_name: Option<String>,
    pub(crate) bound_port: Option<u16>,
    pub(crate) inbox: VecDeque<Vec<u8>>,
    pub(crate) output_fault: bool,
}

/// Observer and stimulus handle for a claimed simulation driver.
#[derive(Clone)]
pub struct SimProbe {
    board: SharedBoard,
    clock: Arc<dyn Clock>,
}

impl SimProbe {
    pub(crate) fn new(board: SharedBoard, clock: Arc<dyn Clock>) -> Self {
        Self { board, clock }
    }

    // ─── Stimulus ───────────────────────────────────────────────────

    /// Queue a datagram for the control socket.
    pub fn inject(&self, datagram: &[u8]) {
        self.board.lock().inbox.push_back(datagram.to_vec());
    }

    /// Advance time by `ms` (sleeps when the driver runs on a real clock).
    pub fn advance_ms(&self, ms: u64) {
        self.clock.delay_ms(ms);
    }

    /// Make every subsequent pin, PWM and servo write fail.
    pub fn set_output_fault(&self, fault: bool) {
        self.board.lock().output_fault = fault;
    }

    // ─── Observation ────────────────────────────────────────────────

    /// Current time of the driver clock [ms].
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Level of a digital output (`Low` if never written).
    pub fn level(&self, pin: u8) -> PinLevel {
        self.board.lock().pins.get(&pin).copied().unwrap_or_default()
    }

    /// Total digital output writes.
    pub fn pin_writes(&self) -> usize {
        self.board.lock().pin_writes
    }

    /// Configured PWM carrier frequency and resolution.
    pub fn pwm_config(&self) -> Option<(u32, u8)> {
        self.board.lock().pwm_config
    }

    /// Current PWM duty value.
    pub fn duty(&self) -> u32 {
        self.board.lock().duty
    }

    /// Total PWM duty writes.
    pub fn duty_writes(&self) -> usize {
        self.board.lock().duty_writes
    }

    /// Servo attach parameters, if attached.
    pub fn servo_attach(&self) -> Option<ServoAttach> {
        self.board.lock().servo_attach
    }

    /// Last servo angle written.
    pub fn servo_angle(&self) -> Option<u8> {
        self.board.lock().servo_angle
    }

    /// Every servo angle written, in order.
    pub fn servo_history(&self) -> Vec<u8> {
        self.board.lock().servo_history.clone()
    }

    /// Total servo writes.
    pub fn servo_writes(&self) -> usize {
        self.board.lock().servo_history.len()
    }

    /// Current radio mode.
    pub fn radio_mode(&self) -> RadioMode {
        self.board.lock().radio_mode
    }

    /// Network the station side last tried to join.
    pub fn station_ssid(&self) -> Option<String> {
        self.board.lock().station_ssid.clone()
    }

    /// Self-hosted network currently running.
    pub fn access_point(&self) -> Option<AccessPointSettings> {
        self.board.lock().access_point.clone()
    }

    /// Name published over local name resolution.
    pub fn published_name(&self) -> Option<String> {
        self.board.lock().published_name.clone()
    }

    /// Port the control socket is bound to.
    pub fn bound_port(&self) -> Option<u16> {
        self.board.lock().bound_port
    }

    /// Datagrams not yet consumed by the control socket.
    pub fn pending_datagrams(&self) -> usize {
        self.board.lock().inbox.len()
    }
}

impl std::fmt::Debug for SimProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimProbe")
            .field("now_ms", &self.clock.now_ms())
            .finish_non_exhaustive()
    }
}
