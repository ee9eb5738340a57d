//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load TOML configuration files
//! across the rover binaries, plus the full rover configuration surface.
//!
//! # Usage
//!
//! ```rust,no_run
//! use rover_common::config::{ConfigError, RoverConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = RoverConfig::load_validated(Path::new("config/rover.toml"))?;
//!     println!("UDP port: {}", config.control.udp_port);
//!     Ok(())
//! }
//! ```
//!
//! # TOML Layout
//!
//! ```toml
//! [shared]
//! service_name = "rover"
//!
//! [network]
//! ssid = "home"
//! passphrase = "secret"
//!
//! [network.access_point]
//! ssid = "Rover-Emergency"
//!
//! [control]
//! failsafe_timeout_ms = 500
//! ```

use crate::consts::*;
use crate::hal::types::AccessPointSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding `network.passphrase`.
pub const ENV_WIFI_PASSPHRASE: &str = "ROVER_WIFI_PASSPHRASE";

/// Environment variable overriding `network.access_point.passphrase`.
pub const ENV_AP_PASSPHRASE: &str = "ROVER_AP_PASSPHRASE";

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Common configuration fields shared across the rover binaries.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "rover-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

// ─── Rover Configuration ────────────────────────────────────────────

/// Complete rover configuration (`rover.toml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoverConfig {
    /// Logging and identity.
    pub shared: SharedConfig,

    /// Wireless connectivity.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Control protocol and failsafe.
    #[serde(default)]
    pub control: ControlConfig,

    /// Traction bridge.
    #[serde(default)]
    pub traction: TractionConfig,

    /// Steering servo.
    #[serde(default)]
    pub steering: SteeringConfig,

    /// Board backend selection.
    #[serde(default)]
    pub hardware: HardwareConfig,

    /// Video collaborator.
    #[serde(default)]
    pub video: VideoConfig,
}

/// Client-mode network and fallback access point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Network to join at boot. Empty skips straight to the access point.
    pub ssid: String,
    /// Passphrase of the client network.
    pub passphrase: String,
    /// Name published over local name resolution.
    pub hostname: String,
    /// Upper bound on the boot-time association wait [ms].
    pub connect_timeout_ms: u64,
    /// Status poll interval during the association wait [ms].
    pub connect_poll_ms: u64,
    /// Self-hosted fallback network.
    pub access_point: AccessPointConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            passphrase: String::new(),
            hostname: DEFAULT_HOSTNAME.to_string(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            connect_poll_ms: DEFAULT_CONNECT_POLL_MS,
            access_point: AccessPointConfig::default(),
        }
    }
}

/// Self-hosted network parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessPointConfig {
    /// Broadcast network name.
    pub ssid: String,
    /// WPA2 passphrase (8–63 chars) or empty for an open network.
    pub passphrase: String,
    /// Wi-Fi channel (1–13).
    pub channel: u8,
    /// Simultaneous client limit.
    pub max_connections: u8,
}

impl Default for AccessPointConfig {
    fn default() -> Self {
        Self {
            ssid: DEFAULT_AP_SSID.to_string(),
            passphrase: "rover1234".to_string(),
            channel: DEFAULT_AP_CHANNEL,
            max_connections: DEFAULT_AP_MAX_CONNECTIONS,
        }
    }
}

impl AccessPointConfig {
    /// Settings handed to the radio.
    pub fn settings(&self) -> AccessPointSettings {
        AccessPointSettings {
            ssid: self.ssid.clone(),
            passphrase: self.passphrase.clone(),
            channel: self.channel,
            max_connections: self.max_connections,
        }
    }
}

/// Control protocol and loop timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Listening UDP port.
    pub udp_port: u16,
    /// Time without valid packets before the failsafe trips [ms].
    pub failsafe_timeout_ms: u64,
    /// Yield between loop iterations [ms].
    pub loop_yield_ms: u64,
    /// Iteration time above which a cycle counts as slow [ms].
    pub slow_cycle_ms: u64,
    /// Cycles between periodic statistics log lines.
    pub stats_interval_cycles: u64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            udp_port: DEFAULT_UDP_PORT,
            failsafe_timeout_ms: DEFAULT_FAILSAFE_TIMEOUT_MS,
            loop_yield_ms: DEFAULT_LOOP_YIELD_MS,
            slow_cycle_ms: 20,
            stats_interval_cycles: 10_000,
        }
    }
}

/// Traction bridge wiring and policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TractionConfig {
    /// Forward direction GPIO.
    pub forward_pin: u8,
    /// Reverse direction GPIO.
    pub reverse_pin: u8,
    /// Enable/PWM GPIO.
    pub pwm_pin: u8,
    /// PWM carrier frequency [Hz].
    pub pwm_frequency_hz: u32,
    /// PWM duty resolution [bits].
    pub pwm_resolution_bits: u8,
    /// Magnitudes below this coast instead of driving. `0` disables the dead
    /// zone; magnitude 0 still coasts.
    pub dead_zone: u8,
    /// Accept negative magnitudes. Requires an upstream stop-before-reverse
    /// policy; the bridge does not insert dead time itself.
    pub allow_reverse: bool,
}

impl Default for TractionConfig {
    fn default() -> Self {
        Self {
            forward_pin: DEFAULT_MOTOR_FORWARD_PIN,
            reverse_pin: DEFAULT_MOTOR_REVERSE_PIN,
            pwm_pin: DEFAULT_MOTOR_PWM_PIN,
            pwm_frequency_hz: DEFAULT_MOTOR_PWM_HZ,
            pwm_resolution_bits: DEFAULT_MOTOR_PWM_BITS,
            dead_zone: DEFAULT_DEAD_ZONE,
            allow_reverse: false,
        }
    }
}

/// Steering servo wiring and calibration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Servo signal GPIO.
    pub pin: u8,
    /// Wheels-straight angle [degrees].
    pub center: u8,
    /// Left mechanical stop [degrees].
    pub left_limit: u8,
    /// Right mechanical stop [degrees].
    pub right_limit: u8,
    /// Signal period [Hz].
    pub period_hz: u32,
    /// Pulse width at 0 degrees [µs].
    pub min_pulse_us: u16,
    /// Pulse width at 180 degrees [µs].
    pub max_pulse_us: u16,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            pin: DEFAULT_SERVO_PIN,
            center: DEFAULT_STEERING_CENTER,
            left_limit: DEFAULT_STEERING_LEFT,
            right_limit: DEFAULT_STEERING_RIGHT,
            period_hz: DEFAULT_SERVO_PERIOD_HZ,
            min_pulse_us: DEFAULT_SERVO_MIN_PULSE_US,
            max_pulse_us: DEFAULT_SERVO_MAX_PULSE_US,
        }
    }
}

/// Board backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Registered driver name (e.g. "simulation", "rpi").
    pub driver: String,

    /// Per-driver configuration sections.
    /// Key = driver name, Value = driver-specific TOML table.
    pub driver_config: HashMap<String, toml::Value>,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            driver: "simulation".to_string(),
            driver_config: HashMap::new(),
        }
    }
}

impl HardwareConfig {
    /// Deserialize the section for `driver`, falling back to its defaults
    /// when absent.
    pub fn driver_section<T>(&self, driver: &str) -> Result<T, ConfigError>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        match self.driver_config.get(driver) {
            Some(value) => value
                .clone()
                .try_into()
                .map_err(|e| ConfigError::ParseError(format!("driver_config.{driver}: {e}"))),
            None => Ok(T::default()),
        }
    }
}

/// Video collaborator.
///
/// The streamer is an external program started once at boot; the rover
/// only supervises the process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Start the video service at boot.
    pub enabled: bool,
    /// Streamer command line (program followed by its arguments).
    pub command: Vec<String>,
}

impl RoverConfig {
    /// Configuration with every section at its default.
    pub fn with_service_name(service_name: &str) -> Self {
        Self {
            shared: SharedConfig {
                log_level: LogLevel::default(),
                service_name: service_name.to_string(),
            },
            network: NetworkConfig::default(),
            control: ControlConfig::default(),
            traction: TractionConfig::default(),
            steering: SteeringConfig::default(),
            hardware: HardwareConfig::default(),
            video: VideoConfig::default(),
        }
    }

    /// Load, apply environment overrides, and validate.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Replace passphrases with values from the environment, when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_with(|key| std::env::var(key).ok());
    }

    /// Replace passphrases with values returned by `lookup`.
    pub fn apply_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(pass) = lookup(ENV_WIFI_PASSPHRASE) {
            self.network.passphrase = pass;
        }
        if let Some(pass) = lookup(ENV_AP_PASSPHRASE) {
            self.network.access_point.passphrase = pass;
        }
    }

    /// Validate every section.
    ///
    /// # Validation Rules
    /// 1. `shared.service_name` non-empty
    /// 2. Network: hostname and AP SSID non-empty, AP passphrase empty or
    ///    8–63 chars, AP channel 1–13, connection limit 1–10, timeouts > 0
    /// 3. Control: port > 0, failsafe timeout > 0
    /// 4. Traction: distinct pins, PWM frequency > 0, resolution 1–16 bits
    /// 5. Steering: angles ≤ 180, center inside the limits, pulse min < max,
    ///    period > 0, pin distinct from the traction pins
    /// 6. Video: a command when enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.validate_network()?;
        self.validate_control()?;
        self.validate_traction()?;
        self.validate_steering()?;
        if self.hardware.driver.is_empty() {
            return Err(invalid("hardware.driver cannot be empty"));
        }
        if self.video.enabled && self.video.command.is_empty() {
            return Err(invalid("video.command is required when video is enabled"));
        }
        Ok(())
    }

    fn validate_network(&self) -> Result<(), ConfigError> {
        let net = &self.network;
        if net.hostname.is_empty() {
            return Err(invalid("network.hostname cannot be empty"));
        }
        if net.connect_timeout_ms == 0 || net.connect_poll_ms == 0 {
            return Err(invalid(
                "network.connect_timeout_ms and connect_poll_ms must be > 0",
            ));
        }
        let ap = &net.access_point;
        if ap.ssid.is_empty() {
            return Err(invalid("network.access_point.ssid cannot be empty"));
        }
        if !ap.passphrase.is_empty() && !(8..=63).contains(&ap.passphrase.len()) {
            return Err(invalid(
                "network.access_point.passphrase must be empty or 8-63 characters",
            ));
        }
        if !(1..=13).contains(&ap.channel) {
            return Err(ConfigError::ValidationError(format!(
                "network.access_point.channel {} out of range 1-13",
                ap.channel
            )));
        }
        if !(1..=10).contains(&ap.max_connections) {
            return Err(ConfigError::ValidationError(format!(
                "network.access_point.max_connections {} out of range 1-10",
                ap.max_connections
            )));
        }
        Ok(())
    }

    fn validate_control(&self) -> Result<(), ConfigError> {
        if self.control.udp_port == 0 {
            return Err(invalid("control.udp_port must be > 0"));
        }
        if self.control.failsafe_timeout_ms == 0 {
            return Err(invalid("control.failsafe_timeout_ms must be > 0"));
        }
        Ok(())
    }

    fn validate_traction(&self) -> Result<(), ConfigError> {
        let t = &self.traction;
        if t.forward_pin == t.reverse_pin || t.forward_pin == t.pwm_pin || t.reverse_pin == t.pwm_pin
        {
            return Err(ConfigError::ValidationError(format!(
                "traction pins must be distinct (forward={}, reverse={}, pwm={})",
                t.forward_pin, t.reverse_pin, t.pwm_pin
            )));
        }
        if t.pwm_frequency_hz == 0 {
            return Err(invalid("traction.pwm_frequency_hz must be > 0"));
        }
        if !(1..=16).contains(&t.pwm_resolution_bits) {
            return Err(ConfigError::ValidationError(format!(
                "traction.pwm_resolution_bits {} out of range 1-16",
                t.pwm_resolution_bits
            )));
        }
        Ok(())
    }

    fn validate_steering(&self) -> Result<(), ConfigError> {
        let s = &self.steering;
        for (name, angle) in [
            ("center", s.center),
            ("left_limit", s.left_limit),
            ("right_limit", s.right_limit),
        ] {
            if angle > SERVO_MAX_ANGLE {
                return Err(ConfigError::ValidationError(format!(
                    "steering.{name} {angle} exceeds {SERVO_MAX_ANGLE}"
                )));
            }
        }
        let min = s.left_limit.min(s.right_limit);
        let max = s.left_limit.max(s.right_limit);
        if !(min..=max).contains(&s.center) {
            return Err(ConfigError::ValidationError(format!(
                "steering.center {} outside limits [{min}, {max}]",
                s.center
            )));
        }
        if s.min_pulse_us >= s.max_pulse_us {
            return Err(invalid("steering.min_pulse_us must be < max_pulse_us"));
        }
        if s.period_hz == 0 {
            return Err(invalid("steering.period_hz must be > 0"));
        }
        if self.traction.pwm_pin == s.pin
            || self.traction.forward_pin == s.pin
            || self.traction.reverse_pin == s.pin
        {
            return Err(ConfigError::ValidationError(format!(
                "steering.pin {} collides with a traction pin",
                s.pin
            )));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::ValidationError(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
        assert_eq!(tracing::Level::from(LogLevel::Warn), tracing::Level::WARN);
    }

    #[test]
    fn test_log_level_deserialization() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct TestWrapper {
            level: LogLevel,
        }

        assert_eq!(
            toml::from_str::<TestWrapper>("level = \"debug\"")
                .unwrap()
                .level,
            LogLevel::Debug
        );
        assert_eq!(
            toml::from_str::<TestWrapper>("level = \"error\"")
                .unwrap()
                .level,
            LogLevel::Error
        );
    }

    #[test]
    fn test_shared_config_validation_empty_service_name() {
        let config = SharedConfig {
            log_level: LogLevel::Info,
            service_name: "".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_loader_file_not_found() {
        let result = RoverConfig::load(Path::new("/nonexistent/path/rover.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound)));
    }

    #[test]
    fn test_config_loader_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid toml {{{{").unwrap();

        let result = RoverConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn minimal_file_takes_firmware_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[shared]
service_name = "rover"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = RoverConfig::load(file.path()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.control.udp_port, 9999);
        assert_eq!(config.control.failsafe_timeout_ms, 500);
        assert_eq!(config.traction.forward_pin, 14);
        assert_eq!(config.traction.reverse_pin, 15);
        assert_eq!(config.traction.pwm_pin, 13);
        assert!(!config.traction.allow_reverse);
        assert_eq!(config.steering.center, 90);
        assert_eq!(config.network.access_point.ssid, "Rover-Emergency");
        assert_eq!(config.network.connect_timeout_ms, 10_000);
        assert_eq!(config.hardware.driver, "simulation");
    }

    #[test]
    fn sections_override_defaults() {
        let config = RoverConfig::from_toml(
            r#"
[shared]
service_name = "rover-02"
log_level = "debug"

[network]
ssid = "workshop"
passphrase = "hunter22"
hostname = "buggy"

[network.access_point]
channel = 6

[control]
failsafe_timeout_ms = 1000

[steering]
left_limit = 110
right_limit = 70
"#,
        )
        .unwrap();
        config.validate().unwrap();
        assert_eq!(config.shared.log_level, LogLevel::Debug);
        assert_eq!(config.network.ssid, "workshop");
        assert_eq!(config.network.hostname, "buggy");
        assert_eq!(config.network.access_point.channel, 6);
        assert_eq!(config.network.access_point.max_connections, 2);
        assert_eq!(config.control.failsafe_timeout_ms, 1000);
        assert_eq!(config.steering.left_limit, 110);
    }

    #[test]
    fn rejects_center_outside_limits() {
        let mut config = RoverConfig::with_service_name("rover");
        config.steering.center = 120;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("steering.center"));
    }

    #[test]
    fn rejects_shared_motor_pins() {
        let mut config = RoverConfig::with_service_name("rover");
        config.traction.reverse_pin = config.traction.forward_pin;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_servo_on_motor_pin() {
        let mut config = RoverConfig::with_service_name("rover");
        config.steering.pin = config.traction.pwm_pin;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_short_ap_passphrase() {
        let mut config = RoverConfig::with_service_name("rover");
        config.network.access_point.passphrase = "short".to_string();
        assert!(config.validate().is_err());

        config.network.access_point.passphrase = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_channel_and_resolution() {
        let mut config = RoverConfig::with_service_name("rover");
        config.network.access_point.channel = 14;
        assert!(config.validate().is_err());

        let mut config = RoverConfig::with_service_name("rover");
        config.traction.pwm_resolution_bits = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_failsafe_timeout() {
        let mut config = RoverConfig::with_service_name("rover");
        config.control.failsafe_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn accepts_disabled_dead_zone() {
        let config = RoverConfig::from_toml(
            "[shared]\nservice_name = \"rover\"\n[traction]\ndead_zone = 0\n",
        )
        .unwrap();
        assert_eq!(config.traction.dead_zone, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn passphrase_overrides_replace_file_values() {
        let mut config = RoverConfig::with_service_name("rover");
        config.network.passphrase = "from-file".to_string();
        config.apply_overrides_with(|key| match key {
            ENV_WIFI_PASSPHRASE => Some("from-env".to_string()),
            _ => None,
        });
        assert_eq!(config.network.passphrase, "from-env");
        assert_eq!(config.network.access_point.passphrase, "rover1234");
    }

    #[test]
    fn enabled_video_needs_command() {
        let mut config = RoverConfig::with_service_name("rover");
        config.video.enabled = true;
        assert!(config.validate().is_err());
        config.video.command = vec!["mjpg_streamer".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn driver_section_defaults_when_absent() {
        #[derive(Debug, Default, Deserialize, PartialEq)]
        #[serde(default)]
        struct SimSection {
            reachable: bool,
        }

        let config = RoverConfig::from_toml(
            r#"
[shared]
service_name = "rover"

[hardware]
driver = "simulation"

[hardware.driver_config.simulation]
reachable = true
"#,
        )
        .unwrap();
        let section: SimSection = config.hardware.driver_section("simulation").unwrap();
        assert!(section.reachable);

        let missing: SimSection = config.hardware.driver_section("rpi").unwrap();
        assert_eq!(missing, SimSection::default());
    }
}
