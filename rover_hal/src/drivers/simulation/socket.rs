//! In-memory datagram socket fed through [`SimProbe::inject`](super::SimProbe::inject).

use super::board::SharedBoard;
use rover_common::hal::driver::{DatagramSocket, HalError};

/// Simulated control socket.
pub struct SimSocket {
    board: SharedBoard,
    bind_fails: bool,
}

impl SimSocket {
    pub(crate) fn new(board: SharedBoard, bind_fails: bool) -> Self {
        Self { board, bind_fails }
    }
}

impl DatagramSocket for SimSocket {
    fn bind(&mut self, port: u16) -> Result<(), HalError> {
        if self.bind_fails {
            return Err(HalError::InitFailed(format!(
                "simulated bind failure on port {port}"
            )));
        }
        self.board.lock().bound_port = Some(port);
        Ok(())
    }

    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, HalError> {
        let mut board = self.board.lock();
        if board.bound_port.is_none() {
            return Ok(None);
        }
        let Some(datagram) = board.inbox.pop_front() else {
            return Ok(None);
        };
        let len = datagram.len().min(buf.len());
        buf[..len].copy_from_slice(&datagram[..len]);
        Ok(Some(len))
    }
}
