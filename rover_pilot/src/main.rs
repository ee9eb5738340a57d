//! # Rover Pilot
//!
//! Sends control frames to a rover. `drive` holds a key combination for a
//! while and always finishes with the stop burst, also on Ctrl-C.

use clap::{Parser, Subcommand};
use rover_common::config::ConfigLoader;
use rover_common::protocol::ControlCommand;
use rover_pilot::{PilotConfig, PilotError, PilotKeys, PilotLink};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Rover operator client
#[derive(Parser, Debug)]
#[command(name = "rover_pilot")]
#[command(version)]
#[command(about = "Send WASD-style control frames to a rover over UDP")]
struct Args {
    /// Pilot configuration file; built-in profile when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rover endpoint `ip:port` (overrides `[pilot] target`).
    #[arg(short, long)]
    target: Option<String>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send one raw frame.
    Send {
        /// Throttle code (0 coast, 1 brake, 2-255 forward).
        throttle: u8,
        /// Steering angle.
        steering: u8,
    },
    /// Hold a key combination, then stop.
    Drive {
        /// Keys joined with '+', e.g. `w+shift+a`.
        keys: PilotKeys,
        /// How long to hold the keys [ms].
        #[arg(short, long, default_value_t = 1000)]
        duration_ms: u64,
    },
    /// Brake and center.
    Stop,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    info!("Rover Pilot v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<PilotConfig, PilotError> {
    let mut config = match &args.config {
        Some(path) => PilotConfig::load(path)?,
        None => PilotConfig::with_service_name("rover_pilot"),
    };
    if let Some(target) = &args.target {
        config.pilot.target = target.clone();
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), PilotError> {
    let config = load_config(args)?;
    let profile = &config.pilot;
    let mut link = PilotLink::open(profile.target_addr()?)?;
    let stop_spacing = Duration::from_millis(profile.stop_spacing_ms);

    match &args.command {
        Command::Send { throttle, steering } => {
            let command = ControlCommand::new(*throttle, *steering);
            link.send(command)?;
            info!("Sent {:?} to {}", command.encode(), link.target());
        }
        Command::Drive { keys, duration_ms } => {
            let running = Arc::new(AtomicBool::new(true));
            let r = running.clone();
            ctrlc::set_handler(move || {
                info!("Received interrupt, stopping rover");
                r.store(false, Ordering::SeqCst);
            })?;

            let command = profile.command(*keys);
            info!(
                "Holding {keys} → {:?} for {duration_ms} ms every {} ms",
                command.encode(),
                profile.send_interval_ms
            );
            let held = link.hold(
                command,
                Duration::from_millis(profile.send_interval_ms),
                Duration::from_millis(*duration_ms),
                &running,
            );
            // The stop burst goes out whatever happened while holding.
            let stopped = link.burst(profile.stop_command(), profile.stop_repeats, stop_spacing);
            let frames = held?;
            stopped?;
            info!("Drive finished after {frames} frames");
        }
        Command::Stop => {
            link.burst(profile.stop_command(), profile.stop_repeats, stop_spacing)?;
        }
    }

    if link.sent() == 0 {
        warn!("No frames sent");
    }
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
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
