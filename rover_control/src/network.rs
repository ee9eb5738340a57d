//! Connectivity state machine: bounded client join, access-point fallback,
//! local name publication.
//!
//! ```text
//! Connecting ──joined before deadline──► ConnectedClient
//!      │
//!      └──timeout / request refused / abort──► ConnectedSelfHosted
//! ```
//!
//! Transitions happen only inside [`NetworkLink::begin`]. After it returns
//! exactly one of the two connected states holds.

use rover_common::config::NetworkConfig;
use rover_common::hal::driver::{Clock, WifiRadio};
use rover_common::hal::types::{RadioMode, RadioStatus};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

/// Link mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    /// `begin()` has not finished.
    #[default]
    Connecting,
    /// Joined the configured network.
    ConnectedClient,
    /// Hosting the fallback network.
    ConnectedSelfHosted,
}

/// Network link.
pub struct NetworkLink {
    radio: Box<dyn WifiRadio>,
    clock: Arc<dyn Clock>,
    config: NetworkConfig,
    state: LinkState,
    degraded: bool,
    name_published: bool,
    abort: Option<Arc<AtomicBool>>,
}

impl NetworkLink {
    /// Wrap the claimed radio.
    pub fn new(radio: Box<dyn WifiRadio>, clock: Arc<dyn Clock>, config: &NetworkConfig) -> Self {
        Self {
            radio,
            clock,
            config: config.clone(),
            state: LinkState::Connecting,
            degraded: false,
            name_published: false,
            abort: None,
        }
    }

    /// Stop waiting for the client join once `running` clears.
    pub fn with_abort(mut self, running: Arc<AtomicBool>) -> Self {
        self.abort = Some(running);
        self
    }

    /// Join the configured network or fall back to hosting one.
    ///
    /// Blocks for at most `connect_timeout_ms` plus one poll interval, less if
    /// the abort flag from [`Self::with_abort`] clears first. Never
    /// fails: every problem is logged and the link ends up in a connected
    /// state.
    pub fn begin(&mut self) -> LinkState {
        self.state = LinkState::Connecting;
        self.state = if self.join_client() {
            LinkState::ConnectedClient
        } else {
            self.host_fallback();
            LinkState::ConnectedSelfHosted
        };

        match self.radio.start_name_service(&self.config.hostname) {
            Ok(()) => {
                self.name_published = true;
                info!("Published {}.local", self.config.hostname);
            }
            Err(e) => warn!("Name service for {}.local failed: {e}", self.config.hostname),
        }

        match self.address() {
            Some(addr) => info!("Network up: {} at {addr}", self.mode_label()),
            None => warn!("Network up: {} without an address", self.mode_label()),
        }
        self.state
    }

    fn join_client(&mut self) -> bool {
        let ssid = self.config.ssid.clone();
        if ssid.is_empty() {
            info!("No client network configured");
            return false;
        }
        if let Err(e) = self.radio.set_mode(RadioMode::Station) {
            warn!("Station mode unavailable: {e}");
            return false;
        }
        info!("Joining '{ssid}'...");
        if let Err(e) = self.radio.begin_station(&ssid, &self.config.passphrase) {
            warn!("Join request for '{ssid}' refused: {e}");
            return false;
        }

        let started = self.clock.now_ms();
        let deadline = started.saturating_add(self.config.connect_timeout_ms);
        loop {
            let status = self.radio.status();
            let now = self.clock.now_ms();
            if status == RadioStatus::Connected {
                let elapsed = now.saturating_sub(started);
                match self.radio.signal_strength_dbm() {
                    Some(rssi) => info!("Joined '{ssid}' in {elapsed} ms ({rssi} dBm)"),
                    None => info!("Joined '{ssid}' in {elapsed} ms"),
                }
                return true;
            }
            if self.abort_requested() {
                warn!("Join of '{ssid}' abandoned after {} ms", now.saturating_sub(started));
                return false;
            }
            if now >= deadline {
                warn!(
                    "Could not join '{ssid}' within {} ms (last status {status:?})",
                    self.config.connect_timeout_ms
                );
                return false;
            }
            debug!("waiting for '{ssid}': {status:?}");
            self.clock
                .delay_ms(self.config.connect_poll_ms.min(deadline - now));
        }
    }

    fn abort_requested(&self) -> bool {
        self.abort
            .as_ref()
            .is_some_and(|running| !running.load(Ordering::SeqCst))
    }

    fn host_fallback(&mut self) {
        if let Err(e) = self.radio.disconnect() {
            debug!("disconnect before fallback: {e}");
        }
        let ap = self.config.access_point.settings();
        info!("Starting fallback network '{}' on channel {}", ap.ssid, ap.channel);
        let result = self
            .radio
            .set_mode(RadioMode::AccessPoint)
            .and_then(|()| self.radio.start_access_point(&ap));
        if let Err(e) = result {
            error!("Fallback network '{}' failed to start: {e}", ap.ssid);
            self.degraded = true;
        }
    }

    /// Per-iteration maintenance hook. Currently does nothing; reconnect on
    /// link drop belongs here.
    #[inline]
    pub fn update(&mut self) {}

    /// Station address in client mode, gateway address in self-hosted mode.
    pub fn address(&self) -> Option<Ipv4Addr> {
        match self.state {
            LinkState::Connecting => None,
            LinkState::ConnectedClient => self.radio.station_address(),
            LinkState::ConnectedSelfHosted => self.radio.access_point_address(),
        }
    }

    /// Human-readable mode.
    pub fn mode_label(&self) -> &'static str {
        match self.state {
            LinkState::Connecting => "connecting",
            LinkState::ConnectedClient => "client network",
            LinkState::ConnectedSelfHosted => "self-hosted access point",
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// The fallback network was needed and failed to start.
    #[inline]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// The hostname was published.
    #[inline]
    pub fn name_published(&self) -> bool {
        self.name_published
    }
}
