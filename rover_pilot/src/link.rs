//! UDP sender for control frames.

use crate::error::PilotError;
use rover_common::protocol::ControlCommand;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Fire-and-forget frame sender.
pub struct PilotLink {
    socket: UdpSocket,
    target: SocketAddr,
    sent: u64,
}

impl PilotLink {
    /// Bind an ephemeral local port for `target`.
    ///
    /// # Errors
    /// Returns `PilotError::Io` if no local socket can be bound.
    pub fn open(target: SocketAddr) -> Result<Self, PilotError> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        debug!("pilot socket {} → {target}", socket.local_addr()?);
        Ok(Self {
            socket,
            target,
            sent: 0,
        })
    }

    /// Send one frame.
    ///
    /// # Errors
    /// Returns `PilotError::Io` if the datagram cannot be sent.
    pub fn send(&mut self, command: ControlCommand) -> Result<(), PilotError> {
        self.socket.send_to(&command.encode(), self.target)?;
        self.sent += 1;
        Ok(())
    }

    /// Resend `command` every `interval` until `duration` elapses or
    /// `running` clears. Returns the number of frames sent.
    ///
    /// # Errors
    /// Stops at the first send failure.
    pub fn hold(
        &mut self,
        command: ControlCommand,
        interval: Duration,
        duration: Duration,
        running: &AtomicBool,
    ) -> Result<u64, PilotError> {
        let started = Instant::now();
        let mut frames = 0;
        while running.load(Ordering::SeqCst) && started.elapsed() < duration {
            self.send(command)?;
            frames += 1;
            let remaining = duration.saturating_sub(started.elapsed());
            thread::sleep(interval.min(remaining));
        }
        Ok(frames)
    }

    /// Send `command` `repeats` times, `spacing` apart. Every frame is
    /// attempted even if an earlier one fails; the first error is returned.
    ///
    /// # Errors
    /// Returns the first send failure.
    pub fn burst(
        &mut self,
        command: ControlCommand,
        repeats: u32,
        spacing: Duration,
    ) -> Result<(), PilotError> {
        let mut first_error = None;
        for i in 0..repeats {
            if let Err(e) = self.send(command) {
                first_error.get_or_insert(e);
            }
            if i + 1 < repeats {
                thread::sleep(spacing);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => {
                info!("Stop sent to {} ({repeats}x)", self.target);
                Ok(())
            }
        }
    }

    /// Frames sent so far.
    #[inline]
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Destination endpoint.
    #[inline]
    pub fn target(&self) -> SocketAddr {
        self.target
    }
}
