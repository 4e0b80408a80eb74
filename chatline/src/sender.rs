use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::time::Duration;

use log::{debug, trace};

use crate::{Error, Result, DEFAULT_PORT};

/// Strips trailing newlines. Newlines anywhere else are part of the message, leading ones
/// included: only the end of the text is trimmed.
pub fn trim(text: &str) -> &str {
    text.trim_end_matches('\n')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SenderConfig {
    pub destination: SocketAddr,
    pub timeout: Duration,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            destination: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            timeout: Duration::from_secs(1),
        }
    }
}

/// What a call to [`DatagramSink::send_text`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// One datagram of this many bytes left the socket.
    Sent(usize),
    /// Nothing was left after trimming, so nothing was sent.
    Empty,
}

pub trait DatagramSink {
    /// Puts `payload` on the wire as a single datagram.
    fn send_datagram(&mut self, payload: &[u8]) -> Result<usize>;

    fn send_text(&mut self, text: &str) -> Result<Dispatch> {
        let text = trim(text);
        if text.is_empty() {
            trace!("ignoring empty message");
            return Ok(Dispatch::Empty);
        }
        self.send_datagram(text.as_bytes()).map(Dispatch::Sent)
    }
}

/// Send handle bound to an ephemeral local port, aimed at one destination.
#[derive(Debug)]
pub struct DatagramSender {
    socket: UdpSocket,
    destination: SocketAddr,
}

impl DatagramSender {
    pub fn bind(config: &SenderConfig) -> Result<Self> {
        if config.timeout.is_zero() {
            return Err(Error::ZeroTimeout);
        }

        let local = match config.destination {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        };
        let socket = UdpSocket::bind(local).map_err(|source| Error::Bind {
            addr: local,
            source,
        })?;
        // Nothing is ever read from this socket; the read timeout only mirrors the write one.
        socket
            .set_read_timeout(Some(config.timeout))
            .map_err(Error::Configure)?;
        socket
            .set_write_timeout(Some(config.timeout))
            .map_err(Error::Configure)?;

        debug!(
            "bound {:?} for datagrams to {}",
            socket.local_addr().ok(),
            config.destination
        );

        Ok(Self {
            socket,
            destination: config.destination,
        })
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket.local_addr().map_err(Error::LocalAddr)
    }
}

impl DatagramSink for DatagramSender {
    fn send_datagram(&mut self, payload: &[u8]) -> Result<usize> {
        let destination = self.destination;
        let sent = self
            .socket
            .send_to(payload, destination)
            .map_err(|source| Error::Send {
                destination,
                source,
            })?;
        if sent != payload.len() {
            return Err(Error::ShortSend {
                destination,
                sent,
                len: payload.len(),
            });
        }
        debug!("sent {} bytes to {}", sent, destination);
        Ok(sent)
    }
}
