mod actuator_properties;
mod boot;
mod failsafe_scenario;
mod network_fallback;

use rover_common::prelude::*;
use rover_control::actuator::{SteeringActuator, TractionActuator};
use rover_control::channel::ControlChannel;
use rover_control::cycle::CycleRunner;
use rover_control::network::NetworkLink;
use rover_hal::{SimProbe, SimulationDriver};
use std::sync::Arc;

// ── Helpers ─────────────────────────────────────────────────────────

/// Parse a test configuration; `extra` is appended to a minimal file.
pub fn config(extra: &str) -> RoverConfig {
    let config = RoverConfig::from_toml(&format!(
        "[shared]\nservice_name = \"it\"\n{extra}\n"
    ))
    .unwrap();
    config.validate().unwrap();
    config
}

/// Every component of a rover on a simulated board, not yet looping.
pub struct Rig {
    pub traction: TractionActuator,
    pub steering: SteeringActuator,
    pub network: NetworkLink,
    pub socket: Option<Box<dyn DatagramSocket>>,
    pub clock: Arc<dyn Clock>,
    pub config: RoverConfig,
    pub probe: SimProbe,
}

impl Rig {
    /// Claim the simulated board and bring up actuators and network.
    pub fn boot(config: RoverConfig) -> Self {
        let mut driver = SimulationDriver::new();
        let RoverHardware {
            motor,
            servo,
            radio,
            socket,
            clock,
        } = driver.claim(&config).unwrap();
        let mut traction = TractionActuator::new(motor, &config.traction);
        traction.begin();
        let mut steering = SteeringActuator::new(servo, &config.steering);
        steering.begin();
        let mut network = NetworkLink::new(radio, clock.clone(), &config.network);
        network.begin();
        Self {
            traction,
            steering,
            network,
            socket: Some(socket),
            clock,
            probe: driver.probe().unwrap(),
            config,
        }
    }

    /// Control loop over this rig, socket bound.
    pub fn runner(&mut self) -> CycleRunner<'_> {
        let channel = ControlChannel::new(
            self.socket.take().unwrap(),
            &mut self.traction,
            &mut self.steering,
            self.clock.clone(),
            &self.config.control,
        );
        let mut runner =
            CycleRunner::new(&mut self.network, channel, self.clock.clone(), &self.config.control);
        runner.begin();
        runner
    }
}
