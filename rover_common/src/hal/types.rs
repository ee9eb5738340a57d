//! HAL value types shared by drivers and the control core.
//!
//! - `PinLevel` - Digital output level
//! - `RadioMode` / `RadioStatus` - Wireless radio mode and association status
//! - `AccessPointSettings` - Self-hosted network parameters
//! - Scaling helpers for PWM duty and servo pulse width

use crate::consts::SERVO_MAX_ANGLE;

/// Digital output level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinLevel {
    /// Driven low.
    #[default]
    Low,
    /// Driven high.
    High,
}

impl PinLevel {
    /// `High` when `on` is true.
    #[inline]
    pub const fn from_bool(on: bool) -> Self {
        if on { Self::High } else { Self::Low }
    }
}

/// Operating mode of the wireless radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadioMode {
    /// Radio idle.
    #[default]
    Off,
    /// Client of an existing network.
    Station,
    /// Hosting its own network.
    AccessPoint,
}

/// Association status reported by the radio in station mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadioStatus {
    /// No association attempt in progress.
    #[default]
    Idle,
    /// Association in progress.
    Connecting,
    /// Associated and addressed.
    Connected,
    /// Association attempt failed (wrong passphrase, network absent).
    Failed,
    /// Previously associated, link dropped.
    Disconnected,
}

/// Parameters of the self-hosted fallback network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPointSettings {
    /// Network name.
    pub ssid: String,
    /// WPA2 passphrase; empty means an open network.
    pub passphrase: String,
    /// Broadcast channel (1–13).
    pub channel: u8,
    /// Simultaneous client limit.
    pub max_connections: u8,
}

/// Full-scale duty value for a PWM resolution.
#[inline]
pub const fn max_duty(resolution_bits: u8) -> u32 {
    (1u32 << resolution_bits) - 1
}

/// Scale an 8-bit magnitude (0–255) onto a PWM channel of the given
/// resolution. At 8 bits this is the identity.
#[inline]
pub const fn magnitude_to_duty(magnitude: u8, resolution_bits: u8) -> u32 {
    (magnitude as u32 * max_duty(resolution_bits)) / 255
}

/// Linear map from a logical servo angle (0–180°) to a pulse width.
///
/// Angles above 180 saturate at `max_pulse_us`.
pub fn angle_to_pulse_us(angle: u8, min_pulse_us: u16, max_pulse_us: u16) -> u16 {
    let angle = angle.min(SERVO_MAX_ANGLE) as u32;
    let span = max_pulse_us.saturating_sub(min_pulse_us) as u32;
    min_pulse_us + (span * angle / SERVO_MAX_ANGLE as u32) as u16
}
