//! # Rover Control Library
//!
//! Real-time control and safety path of the rover: receives 2-byte steering
//! and throttle frames over UDP, drives the traction bridge and steering
//! servo, and brakes the instant the control link goes quiet.
//!
//! ## Module Structure
//!
//! - [`actuator`] - Traction bridge and steering servo
//! - [`channel`] - UDP frame decoding, write suppression, failsafe watchdog
//! - [`network`] - Client join with access-point fallback
//! - [`cycle`] - Cooperative control loop and loop statistics
//! - [`rover`] - Boot sequence tying the components together
//! - [`video`] - Video collaborator started off the control loop
//! - [`error`] - Boot errors
//!
//! ## Loop
//!
//! ```text
//! ┌─────────────────────────────── one iteration ───────────────────────────────┐
//! │ NetworkLink::update → ControlChannel::poll → check_failsafe → yield (1 ms)  │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod actuator;
pub mod channel;
pub mod cycle;
pub mod error;
pub mod network;
pub mod rover;
pub mod video;

pub use crate::error::BootError;
pub use crate::rover::Rover;
