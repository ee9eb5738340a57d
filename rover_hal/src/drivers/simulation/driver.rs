//! Simulation driver implementation.
//!
//! The `SimulationDriver` implements the `HalDriver` trait with in-memory
//! peripherals so the control core can run, and be tested, without a board.

use super::board::{SharedBoard, SimBoard, SimProbe};
use super::clock::SimClock;
use super::peripherals::{SimPin, SimPwm, SimServo};
use super::radio::SimRadio;
use super::settings::SimulationSettings;
use super::socket::SimSocket;
use crate::udp::HostUdpSocket;
use parking_lot::Mutex;
use rover_common::config::RoverConfig;
use rover_common::hal::clock::MonotonicClock;
use rover_common::hal::driver::{
    Clock, DatagramSocket, HalDriver, HalError, MotorOutputs, RoverHardware,
};
use std::sync::Arc;
use tracing::info;

/// Simulation driver implementing the HalDriver trait.
pub struct SimulationDriver {
    /// Driver name
    name: &'static str,
    /// Driver version
    version: &'static str,
    /// Probe handed out after `claim()`
    probe: Option<SimProbe>,
}

impl SimulationDriver {
    /// Create a new simulation driver instance.
    pub fn new() -> Self {
        Self {
            name: "simulation",
            version: env!("CARGO_PKG_VERSION"),
            probe: None,
        }
    }

    /// Observer for the claimed board; `None` before `claim()`.
    pub fn probe(&self) -> Option<SimProbe> {
        self.probe.clone()
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl HalDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &'static str {
        self.version
    }

    fn claim(&mut self, config: &RoverConfig) -> Result<RoverHardware, HalError> {
        if self.probe.is_some() {
            return Err(HalError::InitFailed(
                "simulated board already claimed".to_string(),
            ));
        }
        let settings: SimulationSettings = config
            .hardware
            .driver_section(self.name)
            .map_err(|e| HalError::ConfigError(e.to_string()))?;

        info!(
            "Claiming simulated board (reachable={}, host_udp={}, realtime={})",
            settings.station_reachable, settings.host_udp, settings.realtime
        );

        let board: SharedBoard = Arc::new(Mutex::new(SimBoard::default()));
        let clock: Arc<dyn Clock> = if settings.realtime {
            Arc::new(MonotonicClock::new())
        } else {
            Arc::new(SimClock::default())
        };

        let socket: Box<dyn DatagramSocket> = if settings.host_udp {
            Box::new(HostUdpSocket::new())
        } else {
            Box::new(SimSocket::new(board.clone(), settings.bind_fails))
        };

        let traction = &config.traction;
        let hardware = RoverHardware {
            motor: MotorOutputs {
                forward: Box::new(SimPin::new(traction.forward_pin, board.clone())),
                reverse: Box::new(SimPin::new(traction.reverse_pin, board.clone())),
                pwm: Box::new(SimPwm::new(traction.pwm_pin, board.clone())),
            },
            servo: Box::new(SimServo::new(config.steering.pin, board.clone())),
            radio: Box::new(SimRadio::new(board.clone(), clock.clone(), settings)),
            socket,
            clock: clock.clone(),
        };

        self.probe = Some(SimProbe::new(board, clock));
        Ok(hardware)
    }

    fn shutdown(&mut self) -> Result<(), HalError> {
        info!("Simulation driver shutdown");
        Ok(())
    }
}
