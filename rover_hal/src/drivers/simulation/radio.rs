//! Scripted wireless radio.
//!
//! Association completes `join_delay_ms` after the connect request when the
//! station network is reachable, and never otherwise. Access point and name
//! service failures are injected through [`SimulationSettings`].

use super::board::SharedBoard;
use super::settings::SimulationSettings;
use rover_common::hal::driver::{Clock, HalError, WifiRadio};
use rover_common::hal::types::{AccessPointSettings, RadioMode, RadioStatus};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::debug;

/// Address handed out by the simulated client network.
pub const SIM_STATION_ADDR: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 50);

/// Gateway address of the simulated self-hosted network.
pub const SIM_AP_ADDR: Ipv4Addr = Ipv4Addr::new(192, 168, 4, 1);

/// Simulated radio.
pub struct SimRadio {
    board: SharedBoard,
    clock: Arc<dyn Clock>,
    settings: SimulationSettings,
    mode: RadioMode,
    join_started_ms: Option<u64>,
}

impl SimRadio {
    pub(crate) fn new(
        board: SharedBoard,
        clock: Arc<dyn Clock>,
        settings: SimulationSettings,
    ) -> Self {
        Self {
            board,
            clock,
            settings,
            mode: RadioMode::Off,
            join_started_ms: None,
        }
    }

    fn associated(&self) -> bool {
        if self.mode != RadioMode::Station || !self.settings.station_reachable {
            return false;
        }
        self.join_started_ms.is_some_and(|start| {
            self.clock.now_ms().saturating_sub(start) >= self.settings.join_delay_ms
        })
    }
}

impl WifiRadio for SimRadio {
    fn set_mode(&mut self, mode: RadioMode) -> Result<(), HalError> {
        debug!("sim radio mode {:?}", mode);
        self.mode = mode;
        self.board.lock().radio_mode = mode;
        Ok(())
    }

    fn begin_station(&mut self, ssid: &str, _passphrase: &str) -> Result<(), HalError> {
        if self.mode != RadioMode::Station {
            return Err(HalError::ConfigError(format!(
                "connect requested in {:?} mode",
                self.mode
            )));
        }
        if self.settings.refuse_connect {
            return Err(HalError::CommunicationError(format!(
                "association request for '{ssid}' rejected"
            )));
        }
        self.board.lock().station_ssid = Some(ssid.to_string());
        self.join_started_ms = Some(self.clock.now_ms());
        Ok(())
    }

    fn status(&mut self) -> RadioStatus {
        match (self.mode, self.join_started_ms) {
            (RadioMode::Station, Some(_)) if self.associated() => RadioStatus::Connected,
            (RadioMode::Station, Some(_)) => RadioStatus::Connecting,
            _ => RadioStatus::Idle,
        }
    }

    fn disconnect(&mut self) -> Result<(), HalError> {
        self.join_started_ms = None;
        self.board.lock().station_ssid = None;
        Ok(())
    }

    fn start_access_point(&mut self, settings: &AccessPointSettings) -> Result<(), HalError> {
        if self.mode != RadioMode::AccessPoint {
            return Err(HalError::ConfigError(format!(
                "access point requested in {:?} mode",
                self.mode
            )));
        }
        if self.settings.access_point_fails {
            return Err(HalError::InitFailed(format!(
                "could not start access point '{}'",
                settings.ssid
            )));
        }
        self.board.lock().access_point = Some(settings.clone());
        Ok(())
    }

    fn start_name_service(&mut self, hostname: &str) -> Result<(), HalError> {
        if self.settings.name_service_fails {
            return Err(HalError::CommunicationError(format!(
                "could not publish {hostname}.local"
            )));
        }
        self.board.lock().published_name = Some(hostname.to_string());
        Ok(())
    }

    fn station_address(&self) -> Option<Ipv4Addr> {
        self.associated().then_some(SIM_STATION_ADDR)
    }

    fn access_point_address(&self) -> Option<Ipv4Addr> {
        let running = self.mode == RadioMode::AccessPoint && self.board.lock().access_point.is_some();
        running.then_some(SIM_AP_ADDR)
    }

    fn signal_strength_dbm(&self) -> Option<i32> {
        self.associated().then_some(self.settings.signal_dbm)
    }
}
