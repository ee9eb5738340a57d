//! Ganged DC-motor bridge: two direction pins plus one PWM magnitude channel.
//!
//! | State      | forward | reverse | duty       |
//! |------------|---------|---------|------------|
//! | Coast      | low     | low     | 0          |
//! | Brake      | low     | low     | full scale |
//! | Drive(+m)  | high    | low     | scaled m   |
//! | Drive(-m)  | low     | high    | scaled m   |
//!
//! Forward and reverse are never high together: the pin that turns off is
//! always written before the pin that turns on.

use rover_common::config::TractionConfig;
use rover_common::consts::MAX_TRACTION_MAGNITUDE;
use rover_common::hal::driver::{HalError, MotorOutputs};
use rover_common::hal::types::{PinLevel, magnitude_to_duty, max_duty};
use rover_common::protocol::ThrottleCommand;
use tracing::{debug, error, warn};

/// Last commanded bridge state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TractionState {
    /// Outputs disabled, wheels free.
    Coast,
    /// Terminals shorted.
    #[default]
    Brake,
    /// Driving with a signed magnitude.
    Drive(i32),
}

/// Traction actuator.
pub struct TractionActuator {
    outputs: MotorOutputs,
    dead_zone: u8,
    allow_reverse: bool,
    pwm_frequency_hz: u32,
    pwm_resolution_bits: u8,
    state: TractionState,
}

impl TractionActuator {
    /// Wrap the claimed bridge outputs.
    pub fn new(outputs: MotorOutputs, config: &TractionConfig) -> Self {
        Self {
            outputs,
            dead_zone: config.dead_zone,
            allow_reverse: config.allow_reverse,
            pwm_frequency_hz: config.pwm_frequency_hz,
            pwm_resolution_bits: config.pwm_resolution_bits,
            state: TractionState::Brake,
        }
    }

    /// Direction pins low, PWM channel configured, then brake.
    pub fn begin(&mut self) {
        self.set_direction(PinLevel::Low, PinLevel::Low);
        if let Err(e) = self
            .outputs
            .pwm
            .configure(self.pwm_frequency_hz, self.pwm_resolution_bits)
        {
            error!("traction PWM configure failed: {e}");
        }
        self.brake();
        debug!(
            "traction ready ({} Hz, {} bits, dead zone {}, reverse {})",
            self.pwm_frequency_hz,
            self.pwm_resolution_bits,
            self.dead_zone,
            if self.allow_reverse { "allowed" } else { "locked out" }
        );
    }

    /// Drive with a signed magnitude in [-255, 255].
    ///
    /// Zero always coasts. Out-of-domain magnitudes are ignored. Negative
    /// magnitudes brake while reverse is locked out. Magnitudes inside the
    /// dead zone coast.
    pub fn drive(&mut self, magnitude: i32) {
        let abs = magnitude.unsigned_abs();
        if abs > MAX_TRACTION_MAGNITUDE as u32 {
            warn!("traction magnitude {magnitude} outside ±{MAX_TRACTION_MAGNITUDE}, ignored");
            return;
        }
        if magnitude == 0 {
            self.coast();
            return;
        }
        if magnitude < 0 && !self.allow_reverse {
            warn!("reverse requested ({magnitude}) while locked out, braking");
            self.brake();
            return;
        }
        if abs < u32::from(self.dead_zone) {
            self.coast();
            return;
        }

        // abs <= 255 here
        let duty = magnitude_to_duty(abs as u8, self.pwm_resolution_bits);
        let direction = if magnitude > 0 {
            self.set_direction(PinLevel::High, PinLevel::Low)
        } else {
            self.set_direction(PinLevel::Low, PinLevel::High)
        };
        self.commit(direction, duty, TractionState::Drive(magnitude));
    }

    /// Short brake: both direction pins low, PWM at full scale.
    pub fn brake(&mut self) {
        let direction = self.set_direction(PinLevel::Low, PinLevel::Low);
        self.commit(direction, max_duty(self.pwm_resolution_bits), TractionState::Brake);
    }

    /// Coast: both direction pins low, PWM at zero.
    pub fn coast(&mut self) {
        let direction = self.set_direction(PinLevel::Low, PinLevel::Low);
        self.commit(direction, 0, TractionState::Coast);
    }

    /// Apply a decoded protocol throttle.
    pub fn apply(&mut self, throttle: ThrottleCommand) {
        match throttle {
            ThrottleCommand::Coast => self.coast(),
            ThrottleCommand::Brake => self.brake(),
            ThrottleCommand::Forward(m) => self.drive(i32::from(m)),
        }
    }

    /// Last state whose writes all reached the bridge. A failed write leaves
    /// the previous state in place.
    #[inline]
    pub fn state(&self) -> TractionState {
        self.state
    }

    // ─── Output helpers ─────────────────────────────────────────────

    fn set_direction(&mut self, forward: PinLevel, reverse: PinLevel) -> bool {
        // Release before engage so both sides are never high together.
        let result = if forward == PinLevel::High {
            self.outputs
                .reverse
                .set_level(reverse)
                .and_then(|()| self.outputs.forward.set_level(forward))
        } else {
            self.outputs
                .forward
                .set_level(forward)
                .and_then(|()| self.outputs.reverse.set_level(reverse))
        };
        log_fault("direction", result)
    }

    /// Write the duty and record `next` if it and the direction write landed.
    fn commit(&mut self, direction_ok: bool, duty: u32, next: TractionState) {
        let duty_ok = log_fault("PWM", self.outputs.pwm.set_duty(duty));
        if direction_ok && duty_ok {
            self.state = next;
        }
    }
}

fn log_fault(what: &str, result: Result<(), HalError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            error!("traction {what} write failed: {e}");
            false
        }
    }
}
