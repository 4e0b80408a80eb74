//! Fire-and-forget text datagrams for the muji_moe chat port.
//!
//! A [`SendButton`] reads a [`TextSurface`], strips trailing newlines and hands the rest to a
//! [`DatagramSink`] as exactly one UDP datagram. [`DatagramListener`] is the receiving end.

pub mod activation;
pub mod error;
pub mod listener;
pub mod sender;
pub mod surface;

pub use activation::{ActivationHandler, ButtonState, SendButton};
pub use error::{Error, Result};
pub use listener::{DatagramListener, Received};
pub use sender::{trim, DatagramSender, DatagramSink, Dispatch, SenderConfig};
pub use surface::{EditRequest, TextArea, TextSurface};

/// Port the muji_moe chat server listens on.
pub const DEFAULT_PORT: u16 = 12888;
