//! HAL driver implementations.
//!
//! This module contains all HAL driver implementations:
//!
//! - [`simulation`] - Software simulation driver for development and testing
//! - `rpi` - Raspberry Pi driver (cargo feature `rpi`)
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement the `HalDriver` trait from `rover_common::hal::driver`
//! 3. Register the driver in [`register_all_drivers`]

#[cfg(feature = "rpi")]
pub mod rpi;
pub mod simulation;

use crate::driver_registry::DriverRegistry;

/// Register all built-in drivers into `registry`.
pub fn register_all_drivers(registry: &mut DriverRegistry) {
    registry.register("simulation", simulation::create_driver);

    #[cfg(feature = "rpi")]
    registry.register("rpi", rpi::create_driver);
}
