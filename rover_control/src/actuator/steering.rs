//! Position servo with a clamped angular range.

use rover_common::config::SteeringConfig;
use rover_common::hal::driver::ServoOutput;
use tracing::{debug, error};

/// Clamp window derived from the calibration angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteeringLimits {
    /// Wheels straight.
    pub center: u8,
    /// Lower bound, `min(left, right)`.
    pub min: u8,
    /// Upper bound, `max(left, right)`.
    pub max: u8,
}

impl SteeringLimits {
    /// Order the two extremes; the servo may be mounted either way round.
    pub fn new(center: u8, left: u8, right: u8) -> Self {
        Self {
            center,
            min: left.min(right),
            max: left.max(right),
        }
    }

    /// Clamp any requested angle into `[min, max]`.
    #[inline]
    pub fn clamp(&self, angle: i32) -> u8 {
        // max <= 255, so the clamped value always fits
        angle.clamp(i32::from(self.min), i32::from(self.max)) as u8
    }
}

/// Steering actuator.
pub struct SteeringActuator {
    servo: Box<dyn ServoOutput>,
    limits: SteeringLimits,
    left: u8,
    right: u8,
    period_hz: u32,
    min_pulse_us: u16,
    max_pulse_us: u16,
    angle: Option<u8>,
}

impl SteeringActuator {
    /// Wrap the claimed servo output.
    pub fn new(servo: Box<dyn ServoOutput>, config: &SteeringConfig) -> Self {
        Self {
            servo,
            limits: SteeringLimits::new(config.center, config.left_limit, config.right_limit),
            left: config.left_limit,
            right: config.right_limit,
            period_hz: config.period_hz,
            min_pulse_us: config.min_pulse_us,
            max_pulse_us: config.max_pulse_us,
            angle: None,
        }
    }

    /// Attach the servo signal and center.
    pub fn begin(&mut self) {
        if let Err(e) = self
            .servo
            .attach(self.period_hz, self.min_pulse_us, self.max_pulse_us)
        {
            error!("steering servo attach failed: {e}");
        }
        self.center();
        debug!(
            "steering ready (center {}, range {}..={})",
            self.limits.center, self.limits.min, self.limits.max
        );
    }

    /// Wheels straight.
    pub fn center(&mut self) {
        self.write_raw(self.limits.center);
    }

    /// Full left lock.
    pub fn turn_left_extreme(&mut self) {
        self.write_raw(self.left);
    }

    /// Full right lock.
    pub fn turn_right_extreme(&mut self) {
        self.write_raw(self.right);
    }

    /// Clamp `angle` into the calibrated range and write it.
    pub fn write(&mut self, angle: i32) {
        let clamped = self.limits.clamp(angle);
        self.write_raw(clamped);
    }

    /// Last angle written.
    #[inline]
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }

    /// Calibrated clamp window.
    #[inline]
    pub fn limits(&self) -> SteeringLimits {
        self.limits
    }

    fn write_raw(&mut self, angle: u8) {
        match self.servo.write_angle(angle) {
            Ok(()) => self.angle = Some(angle),
            Err(e) => error!("steering write of {angle}° failed: {e}"),
        }
    }
}
