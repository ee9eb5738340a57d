//! Rover Common Library
//!
//! Shared building blocks for every crate in the rover workspace.
//!
//! # Module Structure
//!
//! - [`config`] - TOML configuration loading, validation and defaults
//! - [`consts`] - Firmware constants (ports, pins, calibration defaults)
//! - [`hal`] - Hardware contracts implemented by `rover_hal` drivers
//! - [`protocol`] - The 2-byte UDP remote-control protocol
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use rover_common::protocol::{ControlCommand, ThrottleCommand};
//!
//! let cmd = ControlCommand::decode(&[150, 90]).unwrap();
//! assert_eq!(cmd.throttle(), ThrottleCommand::Forward(150));
//! ```

pub mod config;
pub mod consts;
pub mod hal;
pub mod prelude;
pub mod protocol;
