//! Video collaborator.
//!
//! Started once after actuator and network bring-up, on its own thread.
//! The control loop never calls into it again.

use rover_common::config::VideoConfig;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

/// Supervision poll interval of the streamer process.
const SUPERVISE_INTERVAL: Duration = Duration::from_millis(200);

/// Video service failure.
#[derive(Debug, Error)]
pub enum VideoError {
    /// The streamer could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The service thread could not be created.
    #[error("failed to spawn video thread: {0}")]
    Thread(#[from] std::io::Error),
}

/// A video service run on a dedicated thread.
pub trait VideoService: Send + 'static {
    /// Service name for logs.
    fn name(&self) -> &'static str;

    /// Run until `running` clears or the service ends on its own.
    fn serve(&mut self, running: &AtomicBool) -> Result<(), VideoError>;
}

/// No video.
#[derive(Debug, Default)]
pub struct DisabledVideo;

impl VideoService for DisabledVideo {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn serve(&mut self, _running: &AtomicBool) -> Result<(), VideoError> {
        info!("Video disabled");
        Ok(())
    }
}

/// External streamer process, killed when the rover shuts down.
#[derive(Debug)]
pub struct ExternalVideo {
    command: Vec<String>,
}

impl ExternalVideo {
    /// Streamer described by `command` (program then arguments).
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    fn spawn(&self) -> Result<Child, VideoError> {
        let (program, args) = self.command.split_first().ok_or_else(|| VideoError::Spawn {
            program: String::new(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        })?;
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| VideoError::Spawn {
                program: program.clone(),
                source,
            })
    }
}

impl VideoService for ExternalVideo {
    fn name(&self) -> &'static str {
        "external"
    }

    fn serve(&mut self, running: &AtomicBool) -> Result<(), VideoError> {
        let mut child = self.spawn()?;
        info!("Video streamer started (pid {})", child.id());
        while running.load(Ordering::Relaxed) {
            match child.try_wait() {
                Ok(Some(status)) => {
                    warn!("Video streamer exited: {status}");
                    return Ok(());
                }
                Ok(None) => thread::sleep(SUPERVISE_INTERVAL),
                Err(e) => {
                    warn!("Video streamer status unavailable: {e}");
                    break;
                }
            }
        }
        let _ = child.kill();
        let _ = child.wait();
        info!("Video streamer stopped");
        Ok(())
    }
}

/// Pick the service described by the configuration.
pub fn from_config(config: &VideoConfig) -> Box<dyn VideoService> {
    if config.enabled {
        Box::new(ExternalVideo::new(config.command.clone()))
    } else {
        Box::new(DisabledVideo)
    }
}

/// Start `service` on a thread named "video".
pub fn launch(
    mut service: Box<dyn VideoService>,
    running: Arc<AtomicBool>,
) -> Result<JoinHandle<()>, VideoError> {
    let name = service.name();
    let handle = thread::Builder::new()
        .name("video".to_string())
        .spawn(move || {
            if let Err(e) = service.serve(&running) {
                error!("Video service '{name}' failed: {e}");
            }
        })?;
    Ok(handle)
}
