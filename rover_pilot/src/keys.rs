//! Key combinations and the gearbox that turns them into frames.
//!
//! ## Priorities
//!
//! | Keys             | Throttle | Steering |
//! |------------------|----------|----------|
//! | S (+ anything)   | brake    |          |
//! | W + Shift        | slow     |          |
//! | W + Space        | turbo    |          |
//! | W                | normal   |          |
//! | Space            | brake    |          |
//! | none of the above| coast    |          |
//! | A xor D          |          | left/right limit |
//! | A + D, neither   |          | center   |

use crate::error::PilotError;
use rover_common::config::{ConfigError, SharedConfig};
use rover_common::consts::{DEFAULT_STEERING_CENTER, DEFAULT_UDP_PORT, SERVO_MAX_ANGLE};
use rover_common::protocol::{ControlCommand, THROTTLE_BRAKE, THROTTLE_COAST};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// Keys held down at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PilotKeys {
    /// W
    pub forward: bool,
    /// S
    pub back: bool,
    /// A
    pub left: bool,
    /// D
    pub right: bool,
    /// Either Shift key.
    pub shift: bool,
    /// Space bar.
    pub space: bool,
}

impl FromStr for PilotKeys {
    type Err = PilotError;

    /// Parse `+`-separated key names, e.g. `w+shift+a`. An empty string or
    /// `none` means no key held.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut keys = Self::default();
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(keys);
        }
        for token in s.split('+') {
            let flag = match token.trim().to_ascii_lowercase().as_str() {
                "w" => &mut keys.forward,
                "s" => &mut keys.back,
                "a" => &mut keys.left,
                "d" => &mut keys.right,
                "shift" => &mut keys.shift,
                "space" => &mut keys.space,
                other => return Err(PilotError::InvalidKeys(other.to_string())),
            };
            *flag = true;
        }
        Ok(keys)
    }
}

impl fmt::Display for PilotKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.forward, "w"),
            (self.back, "s"),
            (self.left, "a"),
            (self.right, "d"),
            (self.shift, "shift"),
            (self.space, "space"),
        ];
        let held: Vec<&str> = names.iter().filter(|(on, _)| *on).map(|(_, n)| *n).collect();
        if held.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&held.join("+"))
        }
    }
}

// ─── Profile ────────────────────────────────────────────────────────

/// Gearbox and link settings (`[pilot]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotProfile {
    /// Rover control endpoint.
    pub target: String,
    /// Resend period while a combination is held [ms].
    pub send_interval_ms: u64,
    /// Frames in the stop burst.
    pub stop_repeats: u32,
    /// Gap between stop-burst frames [ms].
    pub stop_spacing_ms: u64,
    /// Throttle code with no key held.
    pub coast: u8,
    /// Throttle code for S and the handbrake.
    pub brake: u8,
    /// Precision gear (W + Shift).
    pub slow: u8,
    /// Cruise gear (W).
    pub normal: u8,
    /// Turbo gear (W + Space).
    pub turbo: u8,
    /// Wheels straight.
    pub center: u8,
    /// Full left lock sent for A.
    pub left: u8,
    /// Full right lock sent for D.
    pub right: u8,
}

impl Default for PilotProfile {
    fn default() -> Self {
        Self {
            target: format!("192.168.4.1:{DEFAULT_UDP_PORT}"),
            send_interval_ms: 200,
            stop_repeats: 3,
            stop_spacing_ms: 50,
            coast: THROTTLE_COAST,
            brake: THROTTLE_BRAKE,
            // Low enough to keep motor noise off the servo supply.
            slow: 40,
            normal: 190,
            turbo: 255,
            center: DEFAULT_STEERING_CENTER,
            left: 40,
            right: 140,
        }
    }
}

impl PilotProfile {
    /// Frame for a key combination.
    pub fn command(&self, keys: PilotKeys) -> ControlCommand {
        let steering = match (keys.left, keys.right) {
            (true, false) => self.left,
            (false, true) => self.right,
            _ => self.center,
        };

        let throttle = if keys.back {
            self.brake
        } else if keys.forward {
            if keys.shift {
                self.slow
            } else if keys.space {
                self.turbo
            } else {
                self.normal
            }
        } else if keys.space {
            self.brake
        } else {
            self.coast
        };

        ControlCommand::new(throttle, steering)
    }

    /// Brake and center.
    pub fn stop_command(&self) -> ControlCommand {
        ControlCommand::new(self.brake, self.center)
    }

    /// Resolved control endpoint.
    ///
    /// # Errors
    /// Returns `PilotError::InvalidTarget` if `target` is not `ip:port`.
    pub fn target_addr(&self) -> Result<SocketAddr, PilotError> {
        self.target
            .parse()
            .map_err(|_| PilotError::InvalidTarget(self.target.clone()))
    }

    /// Validate the profile.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` on an unusable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::ValidationError(format!(
                "pilot.target '{}' is not ip:port",
                self.target
            )));
        }
        if self.send_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "pilot.send_interval_ms must be > 0".to_string(),
            ));
        }
        for (name, gear) in [("slow", self.slow), ("normal", self.normal), ("turbo", self.turbo)] {
            if gear <= THROTTLE_BRAKE {
                return Err(ConfigError::ValidationError(format!(
                    "pilot.{name} = {gear} would not drive (codes 0 and 1 are coast and brake)"
                )));
            }
        }
        for (name, angle) in [("center", self.center), ("left", self.left), ("right", self.right)] {
            if angle > SERVO_MAX_ANGLE {
                return Err(ConfigError::ValidationError(format!(
                    "pilot.{name} {angle} exceeds {SERVO_MAX_ANGLE}"
                )));
            }
        }
        Ok(())
    }
}

/// Operator client configuration file (`pilot.toml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PilotConfig {
    /// Logging and identity.
    pub shared: SharedConfig,
    /// Gearbox and link.
    #[serde(default)]
    pub pilot: PilotProfile,
}

impl PilotConfig {
    /// Defaults under the given service name.
    pub fn with_service_name(service_name: &str) -> Self {
        Self {
            shared: SharedConfig {
                log_level: Default::default(),
                service_name: service_name.to_string(),
            },
            pilot: PilotProfile::default(),
        }
    }

    /// Validate every section.
    ///
    /// # Errors
    /// Returns the first validation failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.pilot.validate()
    }
}
