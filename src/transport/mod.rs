//! Line transports.
//!
//! The engine only ever sees the [`Transport`] trait: open, write a line,
//! close. Inbound traffic travels the other way as [`TransportEvent`]s, which
//! the owner of the engine feeds back in (see [`crate::session::run`]).

mod memory;
mod tcp;

use std::time::Duration;

pub use memory::MemoryTransport;
pub use tcp::TcpTransport;

use crate::error::TransportError;

/// A bidirectional line transport.
pub trait Transport: Send {
    /// Start opening a connection to `host:port` after `delay`.
    ///
    /// Returns once the attempt is scheduled; readiness is reported with
    /// [`TransportEvent::Ready`].
    fn open(&mut self, host: &str, port: u16, delay: Duration) -> Result<(), TransportError>;

    /// Write one line, without terminator.
    fn write_line(&mut self, line: &str) -> Result<(), TransportError>;

    /// Close the connection. Lines already written are still flushed.
    fn close(&mut self);
}

/// Something the transport observed.
#[derive(Debug)]
pub enum TransportEvent {
    /// The connection is established and lines can flow.
    Ready,
    /// One received line, newline-stripped.
    Line(String),
    /// The peer closed the connection.
    Closed,
    /// The connection failed.
    Failed(TransportError),
}
