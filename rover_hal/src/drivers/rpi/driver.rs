//! Raspberry Pi driver implementation.

use super::gpio::{RpiPin, RpiPwm, RpiServo, claim_output};
use super::radio::NmcliRadio;
use crate::udp::HostUdpSocket;
use rover_common::config::RoverConfig;
use rover_common::hal::clock::MonotonicClock;
use rover_common::hal::driver::{HalDriver, HalError, MotorOutputs, RoverHardware};
use rppal::gpio::Gpio;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// `[hardware.driver_config.rpi]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RpiSettings {
    /// Wireless interface managed through NetworkManager.
    pub interface: String,
}

impl Default for RpiSettings {
    fn default() -> Self {
        Self {
            interface: "wlan0".to_string(),
        }
    }
}

/// Raspberry Pi driver: rppal GPIO, NetworkManager radio, host UDP.
pub struct RpiDriver {
    name: &'static str,
    version: &'static str,
    claimed: bool,
}

impl RpiDriver {
    /// Create a new driver instance.
    pub fn new() -> Self {
        Self {
            name: "rpi",
            version: env!("CARGO_PKG_VERSION"),
            claimed: false,
        }
    }
}

impl Default for RpiDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl HalDriver for RpiDriver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &'static str {
        self.version
    }

    fn claim(&mut self, config: &RoverConfig) -> Result<RoverHardware, HalError> {
        if self.claimed {
            return Err(HalError::InitFailed("GPIO already claimed".to_string()));
        }
        let settings: RpiSettings = config
            .hardware
            .driver_section(self.name)
            .map_err(|e| HalError::ConfigError(e.to_string()))?;

        let gpio = Gpio::new().map_err(|e| HalError::InitFailed(format!("GPIO: {e}")))?;
        let traction = &config.traction;
        let motor = MotorOutputs {
            forward: Box::new(RpiPin::new(claim_output(&gpio, traction.forward_pin)?)),
            reverse: Box::new(RpiPin::new(claim_output(&gpio, traction.reverse_pin)?)),
            pwm: Box::new(RpiPwm::new(claim_output(&gpio, traction.pwm_pin)?)),
        };
        let servo = Box::new(RpiServo::new(claim_output(&gpio, config.steering.pin)?));

        info!(
            "Claimed GPIO {}/{}/{} (motor) and {} (servo), radio on {}",
            traction.forward_pin,
            traction.reverse_pin,
            traction.pwm_pin,
            config.steering.pin,
            settings.interface
        );

        self.claimed = true;
        Ok(RoverHardware {
            motor,
            servo,
            radio: Box::new(NmcliRadio::new(&settings.interface)),
            socket: Box::new(HostUdpSocket::new()),
            clock: Arc::new(MonotonicClock::new()),
        })
    }
}
