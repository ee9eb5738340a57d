use rover_common::config::RoverConfig;
use rover_common::hal::driver::HalDriver;
use rover_common::protocol::ControlCommand;
use rover_control::actuator::TractionState;
use rover_control::network::LinkState;
use rover_control::video::DisabledVideo;
use rover_control::{BootError, Rover};
use rover_hal::{DriverRegistry, SimulationDriver};
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn boots_from_file_and_stops_safe() {
    let file = write_config(
        r#"
[shared]
service_name = "rover-it"
log_level = "debug"

[network]
ssid = "HomeNet"
passphrase = "secret123"
hostname = "buggy"

[control]
failsafe_timeout_ms = 500

[hardware]
driver = "simulation"
"#,
    );
    let config = RoverConfig::load_validated(file.path()).unwrap();
    assert_eq!(config.network.hostname, "buggy");

    let mut driver = SimulationDriver::new();
    let running = Arc::new(AtomicBool::new(true));
    let rover = Rover::boot(&config, &mut driver, Box::new(DisabledVideo), running.clone()).unwrap();
    let probe = driver.probe().unwrap();

    assert_eq!(rover.network.state(), LinkState::ConnectedClient);
    assert_eq!(rover.traction.state(), TractionState::Brake);
    assert_eq!(rover.steering.angle(), Some(90));
    assert_eq!(probe.published_name().as_deref(), Some("buggy"));

    probe.inject(&ControlCommand::new(200, 100).encode());
    let flag = running.clone();
    let handle = thread::spawn(move || rover.run(&flag));
    thread::sleep(Duration::from_millis(20));
    running.store(false, Ordering::SeqCst);
    let summary = handle.join().unwrap();

    assert!(summary.cycles.cycle_count > 0);
    assert_eq!(summary.channel.frames, 1);
    assert_eq!(probe.bound_port(), Some(9999));
    // Shutdown holds brake and center whatever the last frame was.
    assert_eq!(probe.duty(), 255);
    assert_eq!(probe.servo_angle(), Some(90));

    driver.shutdown().unwrap();
}

#[test]
fn registry_builds_the_configured_driver() {
    let registry = DriverRegistry::with_builtin_drivers();
    let config = RoverConfig::with_service_name("rover-it");
    let mut driver = registry.create_driver(&config.hardware.driver).unwrap();
    assert_eq!(driver.name(), "simulation");

    let running = Arc::new(AtomicBool::new(false));
    let rover = Rover::boot(&config, driver.as_mut(), Box::new(DisabledVideo), running.clone());
    assert!(rover.is_ok());

    // The board is exclusive.
    let again = Rover::boot(&config, driver.as_mut(), Box::new(DisabledVideo), running);
    assert!(matches!(again, Err(BootError::Hal(_))));
}

#[test]
fn malformed_driver_section_fails_boot() {
    let file = write_config(
        r#"
[shared]
service_name = "rover-it"

[hardware.driver_config.simulation]
join_delay_ms = "soon"
"#,
    );
    let config = RoverConfig::load_validated(file.path()).unwrap();
    let mut driver = SimulationDriver::new();
    let result = Rover::boot(
        &config,
        &mut driver,
        Box::new(DisabledVideo),
        Arc::new(AtomicBool::new(true)),
    );
    assert!(matches!(result, Err(BootError::Hal(_))));
}

#[test]
fn shipped_config_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../config/rover.toml");
    let config = RoverConfig::load_validated(&path).unwrap();
    assert_eq!(config.hardware.driver, "simulation");
    assert_eq!(config.control.udp_port, 9999);
    assert!(config.network.ssid.is_empty());
}

#[test]
fn listing_drivers_needs_no_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_rover_control"))
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .arg("--list-drivers")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line == "simulation"));
}
