//! Hardware abstraction layer contracts.
//!
//! The control core only talks to hardware through the traits in
//! [`driver`]; `rover_hal` provides the concrete backends.

pub mod clock;
pub mod driver;
pub mod types;
