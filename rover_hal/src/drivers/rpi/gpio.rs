//! GPIO-backed motor and servo outputs (rppal software PWM).

use rover_common::hal::driver::{DigitalOutput, HalError, PwmOutput, ServoOutput};
use rover_common::hal::types::{PinLevel, angle_to_pulse_us, max_duty};
use rppal::gpio::{Gpio, Level, OutputPin};
use std::time::Duration;

fn gpio_err(pin: u8, e: rppal::gpio::Error) -> HalError {
    HalError::CommunicationError(format!("GPIO {pin}: {e}"))
}

/// Claim `pin` as an output driven low.
pub(crate) fn claim_output(gpio: &Gpio, pin: u8) -> Result<OutputPin, HalError> {
    gpio.get(pin)
        .map(|p| p.into_output_low())
        .map_err(|e| HalError::InitFailed(format!("GPIO {pin}: {e}")))
}

/// Direction pin.
pub struct RpiPin {
    pin: OutputPin,
}

impl RpiPin {
    pub(crate) fn new(pin: OutputPin) -> Self {
        Self { pin }
    }
}

impl DigitalOutput for RpiPin {
    fn set_level(&mut self, level: PinLevel) -> Result<(), HalError> {
        self.pin.write(match level {
            PinLevel::Low => Level::Low,
            PinLevel::High => Level::High,
        });
        Ok(())
    }
}

/// Motor enable pin driven with software PWM.
pub struct RpiPwm {
    pin: OutputPin,
    frequency_hz: f64,
    resolution_bits: Option<u8>,
}

impl RpiPwm {
    pub(crate) fn new(pin: OutputPin) -> Self {
        Self {
            pin,
            frequency_hz: 0.0,
            resolution_bits: None,
        }
    }
}

impl PwmOutput for RpiPwm {
    fn configure(&mut self, frequency_hz: u32, resolution_bits: u8) -> Result<(), HalError> {
        if frequency_hz == 0 || !(1..=16).contains(&resolution_bits) {
            return Err(HalError::ConfigError(format!(
                "PWM {frequency_hz} Hz / {resolution_bits} bits not supported"
            )));
        }
        self.frequency_hz = f64::from(frequency_hz);
        self.resolution_bits = Some(resolution_bits);
        let pin = self.pin.pin();
        self.pin
            .set_pwm_frequency(self.frequency_hz, 0.0)
            .map_err(|e| gpio_err(pin, e))
    }

    fn set_duty(&mut self, duty: u32) -> Result<(), HalError> {
        let pin = self.pin.pin();
        let Some(bits) = self.resolution_bits else {
            return Err(HalError::InitFailed(format!(
                "PWM on GPIO {pin} used before configure"
            )));
        };
        let fraction = (f64::from(duty) / f64::from(max_duty(bits))).clamp(0.0, 1.0);
        self.pin
            .set_pwm_frequency(self.frequency_hz, fraction)
            .map_err(|e| gpio_err(pin, e))
    }
}

/// Servo signal on a GPIO pin.
pub struct RpiServo {
    pin: OutputPin,
    period: Duration,
    min_pulse_us: u16,
    max_pulse_us: u16,
}

impl RpiServo {
    pub(crate) fn new(pin: OutputPin) -> Self {
        Self {
            pin,
            period: Duration::ZERO,
            min_pulse_us: 0,
            max_pulse_us: 0,
        }
    }
}

impl ServoOutput for RpiServo {
    fn attach(
        &mut self,
        period_hz: u32,
        min_pulse_us: u16,
        max_pulse_us: u16,
    ) -> Result<(), HalError> {
        if period_hz == 0 || min_pulse_us >= max_pulse_us {
            return Err(HalError::ConfigError(format!(
                "servo {period_hz} Hz, {min_pulse_us}-{max_pulse_us} µs not supported"
            )));
        }
        self.period = Duration::from_micros(1_000_000 / u64::from(period_hz));
        self.min_pulse_us = min_pulse_us;
        self.max_pulse_us = max_pulse_us;
        Ok(())
    }

    fn write_angle(&mut self, angle: u8) -> Result<(), HalError> {
        let pin = self.pin.pin();
        if self.period.is_zero() {
            return Err(HalError::InitFailed(format!(
                "servo on GPIO {pin} written before attach"
            )));
        }
        let pulse = angle_to_pulse_us(angle, self.min_pulse_us, self.max_pulse_us);
        self.pin
            .set_pwm(self.period, Duration::from_micros(u64::from(pulse)))
            .map_err(|e| gpio_err(pin, e))
    }
}
