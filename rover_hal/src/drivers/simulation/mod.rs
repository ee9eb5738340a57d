//! Simulation driver module.
//!
//! This module provides a software simulation driver for development and testing
//! without physical hardware.

mod board;
mod clock;
mod driver;
mod peripherals;
mod radio;
mod settings;
mod socket;

pub use board::{ServoAttach, SimProbe};
pub use clock::SimClock;
pub use driver::SimulationDriver;
pub use radio::{SIM_AP_ADDR, SIM_STATION_ADDR};
pub use settings::SimulationSettings;

use rover_common::hal::driver::HalDriver;

/// Factory function to create a simulation driver instance.
pub fn create_driver() -> Box<dyn HalDriver> {
    Box::new(SimulationDriver::new())
}
