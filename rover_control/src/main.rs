//! # Rover Control
//!
//! Boots the rover from a TOML configuration and runs the control loop until
//! SIGINT/SIGTERM. The actuators are left braked and centered on exit.

use clap::Parser;
use rover_common::config::RoverConfig;
use rover_common::consts::DEFAULT_CONFIG_PATH;
use rover_control::Rover;
use rover_control::video;
use rover_hal::DriverRegistry;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// Rover control firmware
#[derive(Parser, Debug)]
#[command(name = "rover_control")]
#[command(version)]
#[command(about = "Remote-control rover core: UDP control, failsafe, actuators")]
struct Args {
    /// Path to the rover configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Hardware driver to use (overrides `[hardware] driver`).
    #[arg(long)]
    driver: Option<String>,

    /// List the available hardware drivers and exit.
    #[arg(long)]
    list_drivers: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    if args.list_drivers {
        for name in DriverRegistry::with_builtin_drivers().list_drivers() {
            println!("{name}");
        }
        return;
    }

    let config = RoverConfig::load_validated(&args.config);
    setup_tracing(&args, config.as_ref().ok());

    info!("Rover Control v{} starting...", env!("CARGO_PKG_VERSION"));

    let result: Result<(), Box<dyn std::error::Error>> = config
        .map_err(|e| format!("{}: {e}", args.config.display()).into())
        .and_then(|config| run(&args, config));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Rover Control shutdown complete");
}

fn run(args: &Args, config: RoverConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = DriverRegistry::with_builtin_drivers();

    let driver_name = args.driver.as_deref().unwrap_or(&config.hardware.driver);
    let mut driver = registry.create_driver(driver_name)?;
    info!(
        "Config OK: service={}, driver={} v{}, udp_port={}, failsafe={} ms",
        config.shared.service_name,
        driver.name(),
        driver.version(),
        config.control.udp_port,
        config.control.failsafe_timeout_ms
    );

    // Installed before boot: a signal during the join wait cuts it short.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let rover = Rover::boot(
        &config,
        driver.as_mut(),
        video::from_config(&config.video),
        running.clone(),
    )?;
    rover.run(&running);

    driver.shutdown()?;
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments and the configured level.
fn setup_tracing(args: &Args, config: Option<&RoverConfig>) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        config.map_or(Level::INFO, |c| c.shared.log_level.into())
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
