//! Firmware constants for the rover workspace.
//!
//! Single source of truth for default ports, pins and calibration values.
//! Configuration defaults in [`crate::config`] read from here.

/// Default UDP port for control datagrams.
pub const DEFAULT_UDP_PORT: u16 = 9999;

/// Default failsafe timeout [ms].
pub const DEFAULT_FAILSAFE_TIMEOUT_MS: u64 = 500;

/// Default bound on the boot-time client association wait [ms].
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Default poll interval inside the association wait [ms].
pub const DEFAULT_CONNECT_POLL_MS: u64 = 500;

/// Default control loop yield between iterations [ms].
pub const DEFAULT_LOOP_YIELD_MS: u64 = 1;

/// Largest magnitude accepted by the traction bridge.
pub const MAX_TRACTION_MAGNITUDE: i32 = 255;

/// Default dead-zone threshold for the traction bridge.
pub const DEFAULT_DEAD_ZONE: u8 = 15;

/// Default motor PWM frequency [Hz].
pub const DEFAULT_MOTOR_PWM_HZ: u32 = 1000;

/// Default motor PWM resolution [bits].
pub const DEFAULT_MOTOR_PWM_BITS: u8 = 8;

/// Motor forward direction pin (IN1 + IN3).
pub const DEFAULT_MOTOR_FORWARD_PIN: u8 = 14;

/// Motor reverse direction pin (IN2 + IN4).
pub const DEFAULT_MOTOR_REVERSE_PIN: u8 = 15;

/// Motor enable/PWM pin (ENA + ENB).
pub const DEFAULT_MOTOR_PWM_PIN: u8 = 13;

/// Steering servo signal pin.
pub const DEFAULT_SERVO_PIN: u8 = 2;

/// Logical servo range upper bound [degrees].
pub const SERVO_MAX_ANGLE: u8 = 180;

/// Steering center calibration [degrees].
pub const DEFAULT_STEERING_CENTER: u8 = 90;

/// Steering left extreme calibration [degrees].
pub const DEFAULT_STEERING_LEFT: u8 = 70;

/// Steering right extreme calibration [degrees].
pub const DEFAULT_STEERING_RIGHT: u8 = 110;

/// Servo signal period [Hz]. Analog hobby servos overheat above ~60 Hz.
pub const DEFAULT_SERVO_PERIOD_HZ: u32 = 50;

/// Servo pulse width at 0 degrees [µs].
pub const DEFAULT_SERVO_MIN_PULSE_US: u16 = 500;

/// Servo pulse width at 180 degrees [µs].
pub const DEFAULT_SERVO_MAX_PULSE_US: u16 = 2400;

/// Default self-hosted network name.
pub const DEFAULT_AP_SSID: &str = "Rover-Emergency";

/// Default self-hosted network channel.
pub const DEFAULT_AP_CHANNEL: u8 = 1;

/// Default self-hosted network connection limit.
pub const DEFAULT_AP_MAX_CONNECTIONS: u8 = 2;

/// Default hostname published over local name resolution.
pub const DEFAULT_HOSTNAME: &str = "rover";

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config/rover.toml";
