//! # Rover Pilot
//!
//! Operator-side client for the rover. Key combinations go through a gearbox
//! ([`keys::PilotProfile`]) that produces the 2-byte control frames, and a
//! [`link::PilotLink`] sends them to the rover at a fixed rate.
//!
//! - [`keys`] - Key combinations, gearbox priorities, `pilot.toml`
//! - [`link`] - UDP sender with hold and stop burst
//! - [`error`] - Client errors

pub mod error;
pub mod keys;
pub mod link;

pub use crate::error::PilotError;
pub use crate::keys::{PilotConfig, PilotKeys, PilotProfile};
pub use crate::link::PilotLink;
