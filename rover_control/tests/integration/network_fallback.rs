use super::{Rig, config};
use rover_common::hal::types::RadioMode;
use rover_common::protocol::ControlCommand;
use rover_control::channel::FailsafeState;
use rover_control::network::LinkState;
use rover_hal::drivers::simulation::{SIM_AP_ADDR, SIM_STATION_ADDR};

const HOME: &str = "[network]\nssid = \"HomeNet\"\npassphrase = \"secret123\"\n";

#[test]
fn unreachable_network_hosts_fallback_and_still_takes_control() {
    let mut rig = Rig::boot(config(&format!(
        "{HOME}[control]\nfailsafe_timeout_ms = 500\n\
         [hardware.driver_config.simulation]\nstation_reachable = false\n"
    )));
    let probe = rig.probe.clone();

    assert_eq!(probe.now_ms(), 10_000, "join wait bounded by connect_timeout_ms");
    assert_eq!(rig.network.state(), LinkState::ConnectedSelfHosted);
    assert_eq!(rig.network.address(), Some(SIM_AP_ADDR));
    assert_eq!(probe.radio_mode(), RadioMode::AccessPoint);
    let ap = probe.access_point().expect("access point started");
    assert_eq!(ap.ssid, "Rover-Emergency");
    assert_eq!(ap.channel, 1);
    assert_eq!(ap.max_connections, 2);
    assert_eq!(probe.published_name().as_deref(), Some("rover"));

    // The watchdog starts when the channel does, not at power-on.
    let mut runner = rig.runner();
    runner.run_once();
    assert_eq!(runner.channel().failsafe(), FailsafeState::Armed);

    probe.inject(&ControlCommand::new(120, 90).encode());
    runner.run_once();
    assert_eq!(runner.channel().stats().frames, 1);
    assert_eq!(probe.duty(), 120);
}

#[test]
fn reachable_network_joins_without_fallback() {
    let mut rig = Rig::boot(config(&format!(
        "{HOME}[hardware.driver_config.simulation]\njoin_delay_ms = 1500\n"
    )));
    let probe = rig.probe.clone();

    assert_eq!(rig.network.state(), LinkState::ConnectedClient);
    assert_eq!(rig.network.address(), Some(SIM_STATION_ADDR));
    assert_eq!(probe.station_ssid().as_deref(), Some("HomeNet"));
    assert!(probe.access_point().is_none());
    assert!(probe.now_ms() >= 1_500 && probe.now_ms() < 10_000);

    let runner = rig.runner();
    assert!(runner.channel().is_bound());
    assert_eq!(probe.bound_port(), Some(9999));
}

#[test]
fn failed_fallback_leaves_failsafe_in_charge() {
    let mut rig = Rig::boot(config(&format!(
        "{HOME}[control]\nfailsafe_timeout_ms = 200\n\
         [hardware.driver_config.simulation]\nstation_reachable = false\naccess_point_fails = true\n"
    )));
    let probe = rig.probe.clone();
    assert!(rig.network.is_degraded());

    let mut runner = rig.runner();
    for _ in 0..300 {
        runner.run_once();
    }
    assert_eq!(runner.channel().failsafe(), FailsafeState::Tripped);
    assert_eq!(probe.duty(), 255);
    assert_eq!(probe.servo_angle(), Some(90));
}

#[test]
fn bind_failure_keeps_the_loop_running() {
    let mut rig = Rig::boot(config(
        "[control]\nfailsafe_timeout_ms = 50\n[hardware.driver_config.simulation]\nbind_fails = true\n",
    ));
    let probe = rig.probe.clone();
    let mut runner = rig.runner();
    assert!(!runner.channel().is_bound());

    probe.inject(&ControlCommand::new(200, 90).encode());
    for _ in 0..100 {
        runner.run_once();
    }
    assert_eq!(runner.channel().stats().frames, 0);
    assert_eq!(runner.channel().stats().failsafe_trips, 1);
    assert_eq!(probe.pending_datagrams(), 1);
}

#[test]
fn shutdown_during_join_boots_straight_into_fallback() {
    use rover_control::Rover;
    use rover_control::video::DisabledVideo;
    use rover_hal::SimulationDriver;
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    let config = config(&format!(
        "{HOME}[hardware.driver_config.simulation]\nstation_reachable = false\n"
    ));
    let mut driver = SimulationDriver::new();
    let running = Arc::new(AtomicBool::new(false));
    let rover = Rover::boot(&config, &mut driver, Box::new(DisabledVideo), running).unwrap();
    let probe = driver.probe().unwrap();

    assert_eq!(rover.network.state(), LinkState::ConnectedSelfHosted);
    assert!(probe.now_ms() < config.network.connect_timeout_ms);
}
