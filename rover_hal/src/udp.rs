//! Non-blocking UDP endpoint on the host network stack.

use rover_common::hal::driver::{DatagramSocket, HalError};
use std::io;
use std::net::{SocketAddr, UdpSocket};
use tracing::debug;

/// [`DatagramSocket`] over `std::net::UdpSocket` in non-blocking mode.
#[derive(Debug, Default)]
pub struct HostUdpSocket {
    socket: Option<UdpSocket>,
}

impl HostUdpSocket {
    /// Create an unbound socket.
    pub fn new() -> Self {
        Self { socket: None }
    }

    /// Address the socket is bound to.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.as_ref().and_then(|s| s.local_addr().ok())
    }
}

impl DatagramSocket for HostUdpSocket {
    fn bind(&mut self, port: u16) -> Result<(), HalError> {
        let socket = UdpSocket::bind(("0.0.0.0", port))
            .map_err(|e| HalError::InitFailed(format!("bind UDP port {port}: {e}")))?;
        socket
            .set_nonblocking(true)
            .map_err(|e| HalError::InitFailed(format!("set_nonblocking: {e}")))?;
        debug!("UDP socket bound to {:?}", socket.local_addr().ok());
        self.socket = Some(socket);
        Ok(())
    }

    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, HalError> {
        let Some(socket) = &self.socket else {
            return Ok(None);
        };
        match socket.recv_from(buf) {
            Ok((len, _addr)) => Ok(Some(len)),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(HalError::CommunicationError(e.to_string())),
        }
    }
}
