//! Boot sequence and loop ownership.
//!
//! Bring-up order: claim hardware → traction → steering → network → video →
//! control channel → loop. The actuators are plain values owned here and
//! lent to the control channel for the life of the loop.

use crate::actuator::{SteeringActuator, TractionActuator};
use crate::channel::ControlChannel;
use crate::cycle::{CycleRunner, RunSummary};
use crate::error::BootError;
use crate::network::NetworkLink;
use crate::video::{self, VideoService};
use rover_common::config::{ControlConfig, RoverConfig};
use rover_common::hal::driver::{Clock, DatagramSocket, HalDriver, RoverHardware};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::thread::JoinHandle;
use tracing::{error, info};

/// A booted rover, ready to enter the control loop.
pub struct Rover {
    /// Traction bridge.
    pub traction: TractionActuator,
    /// Steering servo.
    pub steering: SteeringActuator,
    /// Network link (already started).
    pub network: NetworkLink,
    socket: Box<dyn DatagramSocket>,
    clock: Arc<dyn Clock>,
    control: ControlConfig,
    video: Option<JoinHandle<()>>,
}

impl Rover {
    /// Claim hardware from `driver` and bring every component up.
    ///
    /// # Errors
    /// Returns `BootError::Hal` if the driver cannot provide the hardware.
    pub fn boot(
        config: &RoverConfig,
        driver: &mut dyn HalDriver,
        video: Box<dyn VideoService>,
        running: Arc<AtomicBool>,
    ) -> Result<Self, BootError> {
        info!(
            "Claiming hardware from driver '{}' v{}",
            driver.name(),
            driver.version()
        );
        let RoverHardware {
            motor,
            servo,
            radio,
            socket,
            clock,
        } = driver.claim(config)?;

        let mut traction = TractionActuator::new(motor, &config.traction);
        traction.begin();
        let mut steering = SteeringActuator::new(servo, &config.steering);
        steering.begin();

        let mut network =
            NetworkLink::new(radio, clock.clone(), &config.network).with_abort(running.clone());
        network.begin();

        let video = match video::launch(video, running) {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!("Video not started: {e}");
                None
            }
        };

        Ok(Self {
            traction,
            steering,
            network,
            socket,
            clock,
            control: config.control.clone(),
            video,
        })
    }

    /// Shared monotonic clock.
    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Run the control loop until `running` clears. The actuators are left
    /// braked and centered.
    pub fn run(self, running: &AtomicBool) -> RunSummary {
        let Self {
            mut traction,
            mut steering,
            mut network,
            socket,
            clock,
            control,
            video,
        } = self;

        let channel = ControlChannel::new(
            socket,
            &mut traction,
            &mut steering,
            clock.clone(),
            &control,
        );
        let mut runner = CycleRunner::new(&mut network, channel, clock, &control);
        runner.begin();
        let summary = runner.run(running);

        if let Some(handle) = video {
            if handle.join().is_err() {
                error!("Video thread panicked");
            }
        }
        summary
    }
}
