//! Simulated motor and servo outputs.

use super::board::{ServoAttach, SharedBoard};
use rover_common::consts::SERVO_MAX_ANGLE;
use rover_common::hal::driver::{DigitalOutput, HalError, PwmOutput, ServoOutput};
use rover_common::hal::types::{PinLevel, max_duty};
use tracing::trace;

fn fault(what: &str, pin: u8) -> HalError {
    HalError::CommunicationError(format!("simulated {what} fault on pin {pin}"))
}

/// Simulated push-pull output.
pub struct SimPin {
    pin: u8,
    board: SharedBoard,
}

impl SimPin {
    pub(crate) fn new(pin: u8, board: SharedBoard) -> Self {
        Self { pin, board }
    }
}

impl DigitalOutput for SimPin {
    fn set_level(&mut self, level: PinLevel) -> Result<(), HalError> {
        let mut board = self.board.lock();
        if board.output_fault {
            return Err(fault("GPIO", self.pin));
        }
        trace!("pin {} -> {:?}", self.pin, level);
        board.pins.insert(self.pin, level);
        board.pin_writes += 1;
        Ok(())
    }
}

/// Simulated PWM channel.
pub struct SimPwm {
    pin: u8,
    resolution_bits: Option<u8>,
    board: SharedBoard,
}

impl SimPwm {
    pub(crate) fn new(pin: u8, board: SharedBoard) -> Self {
        Self {
            pin,
            resolution_bits: None,
            board,
        }
    }
}

impl PwmOutput for SimPwm {
    fn configure(&mut self, frequency_hz: u32, resolution_bits: u8) -> Result<(), HalError> {
        if frequency_hz == 0 || !(1..=16).contains(&resolution_bits) {
            return Err(HalError::ConfigError(format!(
                "PWM {frequency_hz} Hz / {resolution_bits} bits not supported"
            )));
        }
        let mut board = self.board.lock();
        if board.output_fault {
            return Err(fault("PWM", self.pin));
        }
        board.pwm_config = Some((frequency_hz, resolution_bits));
        self.resolution_bits = Some(resolution_bits);
        Ok(())
    }

    fn set_duty(&mut self, duty: u32) -> Result<(), HalError> {
        let Some(bits) = self.resolution_bits else {
            return Err(HalError::InitFailed(format!(
                "PWM on pin {} used before configure",
                self.pin
            )));
        };
        if duty > max_duty(bits) {
            return Err(HalError::ConfigError(format!(
                "duty {duty} exceeds {bits}-bit range"
            )));
        }
        let mut board = self.board.lock();
        if board.output_fault {
            return Err(fault("PWM", self.pin));
        }
        trace!("pwm {} duty {}", self.pin, duty);
        board.duty = duty;
        board.duty_writes += 1;
        Ok(())
    }
}

/// Simulated position servo.
pub struct SimServo {
    pin: u8,
    attached: bool,
    board: SharedBoard,
}

impl SimServo {
    pub(crate) fn new(pin: u8, board: SharedBoard) -> Self {
        Self {
            pin,
            attached: false,
            board,
        }
    }
}

impl ServoOutput for SimServo {
    fn attach(
        &mut self,
        period_hz: u32,
        min_pulse_us: u16,
        max_pulse_us: u16,
    ) -> Result<(), HalError> {
        let mut board = self.board.lock();
        if board.output_fault {
            return Err(fault("servo", self.pin));
        }
        board.servo_attach = Some(ServoAttach {
            period_hz,
            min_pulse_us,
            max_pulse_us,
        });
        self.attached = true;
        Ok(())
    }

    fn write_angle(&mut self, angle: u8) -> Result<(), HalError> {
        if !self.attached {
            return Err(HalError::InitFailed(format!(
                "servo on pin {} written before attach",
                self.pin
            )));
        }
        if angle > SERVO_MAX_ANGLE {
            return Err(HalError::ConfigError(format!(
                "servo angle {angle} exceeds {SERVO_MAX_ANGLE}"
            )));
        }
        let mut board = self.board.lock();
        if board.output_fault {
            return Err(fault("servo", self.pin));
        }
        trace!("servo {} -> {}°", self.pin, angle);
        board.servo_angle = Some(angle);
        board.servo_history.push(angle);
        Ok(())
    }
}
