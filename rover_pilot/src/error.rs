//! Operator client errors.

use rover_common::config::ConfigError;
use thiserror::Error;

/// Error raised by the operator client.
#[derive(Debug, Error)]
pub enum PilotError {
    /// Unknown key name in a combination.
    #[error("unknown key '{0}' (expected w, a, s, d, shift, space)")]
    InvalidKeys(String),

    /// Target is not `ip:port`.
    #[error("invalid target '{0}', expected ip:port")]
    InvalidTarget(String),

    /// Configuration could not be loaded or is invalid.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// Ctrl-C handler could not be installed.
    #[error("signal handler: {0}")]
    Signal(#[from] ctrlc::Error),

    /// Socket failure.
    #[error("UDP: {0}")]
    Io(#[from] std::io::Error),
}
