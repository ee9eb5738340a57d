//! Prelude module for common re-exports.
//!
//! This module provides convenient re-exports of commonly used types
//! so that consumers can do `use rover_common::prelude::*;` and get
//! the most important types without listing individual paths.
//!
//! # Usage
//!
//! ```rust
//! use rover_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, RoverConfig, SharedConfig};

// ─── Firmware Constants ─────────────────────────────────────────────
pub use crate::consts::{DEFAULT_FAILSAFE_TIMEOUT_MS, DEFAULT_UDP_PORT, MAX_TRACTION_MAGNITUDE};

// ─── Hardware Contracts ─────────────────────────────────────────────
pub use crate::hal::driver::{
    Clock, DatagramSocket, DigitalOutput, HalDriver, HalError, PwmOutput, RoverHardware,
    ServoOutput, WifiRadio,
};
pub use crate::hal::types::{PinLevel, RadioMode, RadioStatus};

// ─── Protocol ───────────────────────────────────────────────────────
pub use crate::protocol::{ControlCommand, ThrottleCommand};
