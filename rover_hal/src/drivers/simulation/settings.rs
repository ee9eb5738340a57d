//! `[hardware.driver_config.simulation]` section.

use serde::Deserialize;

/// Behaviour of the simulated board.
///
/// ```toml
/// [hardware.driver_config.simulation]
/// station_reachable = false
/// join_delay_ms = 1500
/// host_udp = true
/// realtime = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// The configured client network exists and accepts the passphrase.
    pub station_reachable: bool,
    /// Time from the connect request until association completes [ms].
    pub join_delay_ms: u64,
    /// The radio rejects the connect request outright.
    pub refuse_connect: bool,
    /// Starting the self-hosted network fails.
    pub access_point_fails: bool,
    /// Publishing the hostname fails.
    pub name_service_fails: bool,
    /// Binding the control socket fails.
    pub bind_fails: bool,
    /// Receive datagrams from a real host UDP socket instead of the probe.
    pub host_udp: bool,
    /// Use wall-clock time instead of the manual clock.
    pub realtime: bool,
    /// Reported signal strength once associated [dBm].
    pub signal_dbm: i32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            station_reachable: true,
            join_delay_ms: 1500,
            refuse_connect: false,
            access_point_fails: false,
            name_service_fails: false,
            bind_fails: false,
            host_udp: false,
            realtime: false,
            signal_dbm: -55,
        }
    }
}
