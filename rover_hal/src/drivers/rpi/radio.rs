//! NetworkManager-driven radio.
//!
//! Station joins run as a background `nmcli` child so `status()` stays
//! non-blocking; the hostname is published by a long-lived `avahi-publish`
//! child that is killed on drop.

use rover_common::hal::driver::{HalError, WifiRadio};
use rover_common::hal::types::{AccessPointSettings, RadioMode, RadioStatus};
use std::net::Ipv4Addr;
use std::process::{Child, Command, Stdio};
use tracing::{debug, warn};

/// Gateway address NetworkManager assigns to a shared hotspot.
const HOTSPOT_ADDR: Ipv4Addr = Ipv4Addr::new(10, 42, 0, 1);

/// Radio backed by the `nmcli` and `avahi-publish` tools.
pub struct NmcliRadio {
    interface: String,
    mode: RadioMode,
    join: Option<Child>,
    joined: Option<bool>,
    hotspot_running: bool,
    name_service: Option<Child>,
}

impl NmcliRadio {
    /// Radio on wireless interface `interface` (e.g. "wlan0").
    pub fn new(interface: &str) -> Self {
        Self {
            interface: interface.to_string(),
            mode: RadioMode::Off,
            join: None,
            joined: None,
            hotspot_running: false,
            name_service: None,
        }
    }

    fn nmcli(&self, args: &[&str]) -> Result<String, HalError> {
        let output = Command::new("nmcli")
            .args(args)
            .output()
            .map_err(|e| HalError::CommunicationError(format!("nmcli: {e}")))?;
        if !output.status.success() {
            return Err(HalError::CommunicationError(format!(
                "nmcli {}: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn interface_address(&self) -> Option<Ipv4Addr> {
        let out = self
            .nmcli(&["-g", "IP4.ADDRESS", "device", "show", self.interface.as_str()])
            .ok()?;
        parse_cidr_address(&out)
    }

    fn kill_join(&mut self) {
        if let Some(mut child) = self.join.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// First address of an `nmcli -g IP4.ADDRESS` listing ("192.168.1.50/24 | ...").
fn parse_cidr_address(listing: &str) -> Option<Ipv4Addr> {
    listing
        .split(['|', '\n'])
        .map(str::trim)
        .find_map(|entry| entry.split('/').next()?.parse().ok())
}

/// Convert an `nmcli` signal percentage into an approximate dBm value.
fn percent_to_dbm(percent: i32) -> i32 {
    percent.clamp(0, 100) / 2 - 100
}

impl WifiRadio for NmcliRadio {
    fn set_mode(&mut self, mode: RadioMode) -> Result<(), HalError> {
        let radio = if mode == RadioMode::Off { "off" } else { "on" };
        self.nmcli(&["radio", "wifi", radio])?;
        self.mode = mode;
        Ok(())
    }

    fn begin_station(&mut self, ssid: &str, passphrase: &str) -> Result<(), HalError> {
        if self.mode != RadioMode::Station {
            return Err(HalError::ConfigError(format!(
                "connect requested in {:?} mode",
                self.mode
            )));
        }
        self.kill_join();
        self.joined = None;
        let mut cmd = Command::new("nmcli");
        cmd.args(["device", "wifi", "connect", ssid]);
        if !passphrase.is_empty() {
            cmd.args(["password", passphrase]);
        }
        let child = cmd
            .args(["ifname", self.interface.as_str()])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| HalError::CommunicationError(format!("nmcli connect: {e}")))?;
        debug!("nmcli join of '{ssid}' started (pid {})", child.id());
        self.join = Some(child);
        Ok(())
    }

    fn status(&mut self) -> RadioStatus {
        if let Some(joined) = self.joined {
            return if joined {
                RadioStatus::Connected
            } else {
                RadioStatus::Failed
            };
        }
        let Some(child) = self.join.as_mut() else {
            return RadioStatus::Idle;
        };
        match child.try_wait() {
            Ok(None) => RadioStatus::Connecting,
            Ok(Some(exit)) => {
                self.join = None;
                self.joined = Some(exit.success());
                if exit.success() {
                    RadioStatus::Connected
                } else {
                    RadioStatus::Failed
                }
            }
            Err(e) => {
                warn!("nmcli join status: {e}");
                RadioStatus::Failed
            }
        }
    }

    fn disconnect(&mut self) -> Result<(), HalError> {
        self.kill_join();
        self.joined = None;
        // Nothing to disconnect is not an error.
        if let Err(e) = self.nmcli(&["device", "disconnect", self.interface.as_str()]) {
            debug!("{e}");
        }
        Ok(())
    }

    fn start_access_point(&mut self, settings: &AccessPointSettings) -> Result<(), HalError> {
        let channel = settings.channel.to_string();
        let mut args = vec![
            "device",
            "wifi",
            "hotspot",
            "ifname",
            self.interface.as_str(),
            "ssid",
            settings.ssid.as_str(),
            "band",
            "bg",
            "channel",
            channel.as_str(),
        ];
        if !settings.passphrase.is_empty() {
            args.extend(["password", settings.passphrase.as_str()]);
        }
        self.nmcli(&args)?;
        debug!(
            "hotspot up; client limit {} is not enforced by NetworkManager",
            settings.max_connections
        );
        self.hotspot_running = true;
        Ok(())
    }

    fn start_name_service(&mut self, hostname: &str) -> Result<(), HalError> {
        let address = self
            .station_address()
            .or_else(|| self.access_point_address())
            .ok_or_else(|| HalError::CommunicationError("no address to publish".into()))?;
        if let Some(mut old) = self.name_service.take() {
            let _ = old.kill();
            let _ = old.wait();
        }
        let name = format!("{hostname}.local");
        let address = address.to_string();
        let child = Command::new("avahi-publish")
            .args(["-a", "-R", name.as_str(), address.as_str()])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| HalError::CommunicationError(format!("avahi-publish: {e}")))?;
        self.name_service = Some(child);
        Ok(())
    }

    fn station_address(&self) -> Option<Ipv4Addr> {
        if self.joined != Some(true) {
            return None;
        }
        self.interface_address()
    }

    fn access_point_address(&self) -> Option<Ipv4Addr> {
        if !self.hotspot_running {
            return None;
        }
        self.interface_address().or(Some(HOTSPOT_ADDR))
    }

    fn signal_strength_dbm(&self) -> Option<i32> {
        let out = self
            .nmcli(&[
                "-t",
                "-f",
                "IN-USE,SIGNAL",
                "device",
                "wifi",
                "list",
                "ifname",
                self.interface.as_str(),
            ])
            .ok()?;
        out.lines()
            .find_map(|line| line.strip_prefix("*:"))
            .and_then(|signal| signal.trim().parse().ok())
            .map(percent_to_dbm)
    }
}

impl Drop for NmcliRadio {
    fn drop(&mut self) {
        self.kill_join();
        if let Some(mut child) = self.name_service.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
