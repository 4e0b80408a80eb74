use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use log::info;

use crate::{Error, Result};

/// Largest datagram the chat server reads in one go; anything longer is cut off.
pub const RECV_BUFFER_LEN: usize = 32768;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Received {
    pub from: SocketAddr,
    pub text: String,
}

/// Receiving end of the chat port.
#[derive(Debug)]
pub struct DatagramListener {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl DatagramListener {
    pub fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr).map_err(|source| Error::Bind { addr, source })?;
        info!("listening on {:?}", socket.local_addr().ok());
        Ok(Self {
            socket,
            buf: vec![0; RECV_BUFFER_LEN],
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket.local_addr().map_err(Error::LocalAddr)
    }

    pub fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.socket
            .set_read_timeout(timeout)
            .map_err(Error::Configure)
    }

    /// Blocks for the next datagram. Invalid UTF-8 is replaced, not rejected.
    pub fn recv(&mut self) -> Result<Received> {
        let (len, from) = self.socket.recv_from(&mut self.buf).map_err(Error::Receive)?;
        let text = String::from_utf8_lossy(&self.buf[..len]).into_owned();
        info!("received {} bytes from {}", len, from);
        Ok(Received { from, text })
    }
}
