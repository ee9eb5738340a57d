//! # Rover HAL Library
//!
//! Hardware backends with a pluggable driver architecture.
//!
//! Drivers implement the `HalDriver` trait defined in
//! `rover_common::hal::driver` and hand the control core a
//! [`RoverHardware`](rover_common::hal::driver::RoverHardware) bundle.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - HAL driver implementations
//! - [`udp`] - Non-blocking host UDP socket shared by the drivers
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         rover_hal                             │
//! │  ┌──────────────────┐        ┌─────────────────────────────┐  │
//! │  │ Driver Registry  │──────► │ HalDriver (trait object)    │  │
//! │  └──────────────────┘        │  "simulation" │ "rpi"       │  │
//! │                              └──────────────┬──────────────┘  │
//! │                                             │ claim()         │
//! │                                             ▼                 │
//! │                              ┌─────────────────────────────┐  │
//! │                              │ RoverHardware               │  │
//! │                              │ motor · servo · radio ·     │  │
//! │                              │ socket · clock              │  │
//! │                              └─────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod driver_registry;
pub mod drivers;
pub mod udp;

// Re-export key types for convenience
pub use crate::driver_registry::DriverRegistry;
pub use crate::drivers::register_all_drivers;
pub use crate::drivers::simulation::{SimProbe, SimulationDriver};
