use std::io;
use std::net::SocketAddr;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to bind UDP socket to {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("socket timeout must be non-zero")]
    ZeroTimeout,

    #[error("failed to configure socket")]
    Configure(#[source] io::Error),

    #[error("failed to read local socket address")]
    LocalAddr(#[source] io::Error),

    #[error("failed to send datagram to {destination}")]
    Send {
        destination: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("datagram to {destination} cut short: {sent} of {len} bytes")]
    ShortSend {
        destination: SocketAddr,
        sent: usize,
        len: usize,
    },

    #[error("failed to receive datagram")]
    Receive(#[source] io::Error),
}

impl Error {
    /// True when a receive gave up because its read timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::Receive(err)
                if matches!(err.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
        )
    }
}
