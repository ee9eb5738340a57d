//! Boot-time errors.
//!
//! Only bring-up can fail. Once the control loop runs, faults are logged at
//! the component that observed them and never propagated.

use rover_common::config::ConfigError;
use rover_common::hal::driver::HalError;
use thiserror::Error;

/// Fatal error before the control loop starts.
#[derive(Debug, Error)]
pub enum BootError {
    /// Configuration could not be loaded or is invalid.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// Hardware could not be acquired.
    #[error("hardware: {0}")]
    Hal(#[from] HalError),
}
