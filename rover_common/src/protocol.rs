//! Binary remote-control protocol.
//!
//! Every control datagram carries two bytes:
//!
//! | Byte | Meaning        | Decode                                   |
//! |------|----------------|------------------------------------------|
//! | 0    | Throttle code  | 0 → coast, 1 → brake, 2–255 → forward    |
//! | 1    | Steering angle | 0–180 logical, clamped by the receiver   |
//!
//! Datagrams shorter than [`PACKET_LEN`] are rejected; trailing bytes are
//! ignored so the format can grow without breaking old receivers.

/// Minimum datagram length carrying a full command.
pub const PACKET_LEN: usize = 2;

/// Throttle code meaning "release the throttle".
pub const THROTTLE_COAST: u8 = 0;

/// Throttle code meaning "short brake".
pub const THROTTLE_BRAKE: u8 = 1;

/// Decoded throttle byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleCommand {
    /// Bridge disabled, motor spins freely.
    Coast,
    /// Motor windings shorted.
    Brake,
    /// Forward drive with the given PWM magnitude (2–255).
    Forward(u8),
}

impl ThrottleCommand {
    /// Decode a raw throttle code.
    #[inline]
    pub const fn from_code(code: u8) -> Self {
        match code {
            THROTTLE_COAST => Self::Coast,
            THROTTLE_BRAKE => Self::Brake,
            magnitude => Self::Forward(magnitude),
        }
    }

    /// Raw throttle code for this command.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Self::Coast => THROTTLE_COAST,
            Self::Brake => THROTTLE_BRAKE,
            Self::Forward(magnitude) => magnitude,
        }
    }
}

/// One decoded control datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlCommand {
    throttle_code: u8,
    steering_angle: u8,
}

impl ControlCommand {
    /// Build a command from raw protocol bytes.
    pub const fn new(throttle_code: u8, steering_angle: u8) -> Self {
        Self {
            throttle_code,
            steering_angle,
        }
    }

    /// Decode a datagram payload. Returns `None` for payloads shorter than
    /// [`PACKET_LEN`].
    pub fn decode(payload: &[u8]) -> Option<Self> {
        match payload {
            [throttle, steering, ..] => Some(Self::new(*throttle, *steering)),
            _ => None,
        }
    }

    /// Encode into the on-wire representation.
    #[inline]
    pub const fn encode(&self) -> [u8; PACKET_LEN] {
        [self.throttle_code, self.steering_angle]
    }

    /// Raw throttle byte.
    #[inline]
    pub const fn throttle_code(&self) -> u8 {
        self.throttle_code
    }

    /// Decoded throttle.
    #[inline]
    pub const fn throttle(&self) -> ThrottleCommand {
        ThrottleCommand::from_code(self.throttle_code)
    }

    /// Raw steering byte (unclamped).
    #[inline]
    pub const fn steering_angle(&self) -> u8 {
        self.steering_angle
    }
}
