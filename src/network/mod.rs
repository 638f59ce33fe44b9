//! A non-blocking network abstraction layer for embedded systems
//!
//! The traits in this module are the boundary between the PubNub core and the
//! device's TCP/IP stack. None of them may block: an implementation that
//! cannot make progress returns an error converting to
//! [`Error::WouldBlock`](error::Error::WouldBlock) and the core retries the
//! call on a later scheduler tick.
//!

#![deny(unsafe_code)]

use core::net::{IpAddr, SocketAddr};

/// Common error types for network operations
pub mod error;

/// Fixed-capacity byte buffers
pub mod buffer;

/// Protocol-specific client implementations
pub mod application;

pub use error::Error;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Clock, Close, Connect, Connection, Read, Resolve, Write};
}

/// Non-blocking read half of a byte stream.
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug + Into<Error>;
    /// Read available data into `buf`.
    ///
    /// Returns the number of bytes written into `buf`; `Ok(0)` means the peer
    /// closed the stream. When no data is available yet, returns an error
    /// converting to [`Error::WouldBlock`].
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Non-blocking write half of a byte stream.
pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug + Into<Error>;
    /// Write as much of `buf` as the transport accepts and return the count.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Push buffered data to the network.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Releases a connection.
pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A non-blocking connection handle.
pub trait Connection: Read + Write + Close {
    /// Poll the connection handshake.
    ///
    /// Returns `Ok(())` once the connection is established and
    /// [`Error::WouldBlock`] while the handshake is still running.
    fn poll_connect(&mut self) -> Result<(), <Self as Write>::Error>;
}

/// A non-blocking connector (client side).
pub trait Connect {
    /// Associated connection type
    type Connection: Connection;
    /// Associated error type
    type Error: core::fmt::Debug + Into<Error>;
    /// Start opening a connection to `remote`.
    ///
    /// The returned handle may still be handshaking; see
    /// [`Connection::poll_connect`].
    fn connect(&mut self, remote: SocketAddr) -> Result<Self::Connection, Self::Error>;
}

/// Asynchronous host name resolution.
///
/// Implementations are shared by every context, so `resolve` must be
/// idempotent: asking twice for the same host while a query is pending must
/// not start a second query.
pub trait Resolve {
    /// Associated error type
    type Error: core::fmt::Debug + Into<Error>;
    /// Look up `host`, returning [`Error::WouldBlock`] while the query is pending.
    fn resolve(&mut self, host: &str) -> Result<IpAddr, Self::Error>;
}

/// A point in time measured in ticks of the scheduler's monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant(u64);

impl Instant {
    /// Creates an instant from a raw tick count.
    pub const fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    /// The raw tick count.
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// The instant `ticks` later, saturating at the end of time.
    pub const fn after(self, ticks: u64) -> Self {
        Self(self.0.saturating_add(ticks))
    }
}

/// The scheduler's monotonic tick source.
pub trait Clock {
    /// The current time.
    fn now(&self) -> Instant;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
