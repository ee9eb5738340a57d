//! HAL driver traits and error types.
//!
//! This module defines:
//! - `HalError` enum - Error types for HAL operations
//! - Peripheral traits (`DigitalOutput`, `PwmOutput`, `ServoOutput`,
//!   `WifiRadio`, `DatagramSocket`, `Clock`)
//! - `RoverHardware` - The bundle of peripherals a driver hands to the core
//! - `HalDriver` trait - Interface for pluggable board backends
//! - `DriverFactory` type alias - Factory function type

use crate::config::RoverConfig;
use crate::hal::types::{AccessPointSettings, PinLevel, RadioMode, RadioStatus};
use std::net::Ipv4Addr;
use std::sync::Arc;
use thiserror::Error;

/// Error types for HAL operations.
#[derive(Debug, Clone, Error)]
pub enum HalError {
    /// Driver initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Hardware communication error
    #[error("Hardware communication error: {0}")]
    CommunicationError(String),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    /// Operation not supported by this backend
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn() -> Box<dyn HalDriver>;

/// A push-pull digital output (motor direction pins).
pub trait DigitalOutput: Send {
    /// Drive the pin to `level`.
    fn set_level(&mut self, level: PinLevel) -> Result<(), HalError>;
}

/// A PWM magnitude channel (motor enable pin).
pub trait PwmOutput: Send {
    /// Configure carrier frequency and duty resolution.
    fn configure(&mut self, frequency_hz: u32, resolution_bits: u8) -> Result<(), HalError>;

    /// Set the raw duty value (0 ..= 2^resolution - 1).
    fn set_duty(&mut self, duty: u32) -> Result<(), HalError>;
}

/// A position servo signal output.
///
/// Angles are logical degrees (0–180); the backend maps them onto the pulse
/// window given to [`ServoOutput::attach`].
pub trait ServoOutput: Send {
    /// Start generating the servo signal.
    fn attach(
        &mut self,
        period_hz: u32,
        min_pulse_us: u16,
        max_pulse_us: u16,
    ) -> Result<(), HalError>;

    /// Move to `angle` degrees.
    fn write_angle(&mut self, angle: u8) -> Result<(), HalError>;
}

/// Wireless radio with station and access-point modes.
pub trait WifiRadio: Send {
    /// Switch the radio mode.
    fn set_mode(&mut self, mode: RadioMode) -> Result<(), HalError>;

    /// Issue a non-blocking association request. Progress is observed via
    /// [`WifiRadio::status`].
    fn begin_station(&mut self, ssid: &str, passphrase: &str) -> Result<(), HalError>;

    /// Current association status. Must not block.
    fn status(&mut self) -> RadioStatus;

    /// Drop any association and clear station configuration.
    fn disconnect(&mut self) -> Result<(), HalError>;

    /// Start hosting a network.
    fn start_access_point(&mut self, settings: &AccessPointSettings) -> Result<(), HalError>;

    /// Publish `hostname` over local name resolution (`<hostname>.local`).
    fn start_name_service(&mut self, hostname: &str) -> Result<(), HalError>;

    /// Address assigned by the joined network.
    fn station_address(&self) -> Option<Ipv4Addr>;

    /// Gateway address of the self-hosted network.
    fn access_point_address(&self) -> Option<Ipv4Addr>;

    /// Received signal strength of the station link, if known.
    fn signal_strength_dbm(&self) -> Option<i32> {
        None
    }
}

/// Connectionless datagram endpoint for the control protocol.
pub trait DatagramSocket: Send {
    /// Start listening on `port`.
    fn bind(&mut self, port: u16) -> Result<(), HalError>;

    /// Receive one pending datagram into `buf` without blocking.
    ///
    /// Returns `Ok(None)` when nothing is pending. Datagrams longer than
    /// `buf` are truncated.
    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, HalError>;
}

/// Monotonic millisecond clock.
///
/// The watchdog timestamp and the failsafe check must read the same clock,
/// so the core holds exactly one `Arc<dyn Clock>`.
pub trait Clock: Send + Sync {
    /// Milliseconds since an arbitrary fixed origin. Never decreases.
    fn now_ms(&self) -> u64;

    /// Yield the current thread for roughly `ms` milliseconds.
    fn delay_ms(&self, ms: u64);
}

/// Motor bridge outputs (ganged left/right channels).
pub struct MotorOutputs {
    /// Forward direction pin.
    pub forward: Box<dyn DigitalOutput>,
    /// Reverse direction pin.
    pub reverse: Box<dyn DigitalOutput>,
    /// Enable / magnitude channel.
    pub pwm: Box<dyn PwmOutput>,
}

/// Every peripheral the control core needs, claimed from one driver.
pub struct RoverHardware {
    /// Traction bridge.
    pub motor: MotorOutputs,
    /// Steering servo.
    pub servo: Box<dyn ServoOutput>,
    /// Wireless radio.
    pub radio: Box<dyn WifiRadio>,
    /// Control datagram socket.
    pub socket: Box<dyn DatagramSocket>,
    /// Shared monotonic clock.
    pub clock: Arc<dyn Clock>,
}

/// Trait defining the interface for board backends.
///
/// # Lifecycle
///
/// 1. `claim()` - Called once at boot; acquires and returns all peripherals
/// 2. The core drives the peripherals from its control loop
/// 3. `shutdown()` - Called after the loop exits
pub trait HalDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation", "rpi").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Acquire the peripherals described by `config`.
    ///
    /// # Errors
    /// Return `HalError::InitFailed` if a resource cannot be acquired.
    fn claim(&mut self, config: &RoverConfig) -> Result<RoverHardware, HalError>;

    /// Release driver-level resources.
    fn shutdown(&mut self) -> Result<(), HalError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hal_error_display() {
        let err = HalError::InitFailed("gpio busy".to_string());
        assert!(err.to_string().contains("gpio busy"));

        let err = HalError::DriverNotFound("esp32".to_string());
        assert!(err.to_string().contains("esp32"));
    }
}
