//! Raspberry Pi driver module.
//!
//! GPIO through `rppal` (software PWM on the motor enable and servo pins),
//! the radio through NetworkManager, control datagrams on the host stack.

mod driver;
mod gpio;
mod radio;

pub use driver::{RpiDriver, RpiSettings};
pub use radio::NmcliRadio;

use rover_common::hal::driver::HalDriver;

/// Factory function to create a Raspberry Pi driver instance.
pub fn create_driver() -> Box<dyn HalDriver> {
    Box::new(RpiDriver::new())
}
