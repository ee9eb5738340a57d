//! Actuation sinks driven by the control channel.
//!
//! - [`traction`] - Ganged DC-motor bridge with dead zone and reverse lockout
//! - [`steering`] - Clamped steering servo

pub mod steering;
pub mod traction;

pub use steering::{SteeringActuator, SteeringLimits};
pub use traction::{TractionActuator, TractionState};
