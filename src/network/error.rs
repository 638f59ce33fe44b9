//! Common error types for network operations

use core::fmt;

/// A common error type for transport operations.
///
/// Every error reported by a [`Read`](super::Read), [`Write`](super::Write),
/// [`Connect`](super::Connect) or [`Resolve`](super::Resolve) implementation
/// converts into this enum. [`Error::WouldBlock`] is not a failure: it tells
/// the caller that the operation could not make progress yet and should be
/// retried on a later scheduler tick.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The operation cannot make progress right now; retry later.
    WouldBlock,
    /// An operation was attempted on a connection that is not open.
    NotOpen,
    /// An error occurred during a write operation.
    WriteError,
    /// An error occurred during a read operation.
    ReadError,
    /// A connection attempt was refused.
    ConnectionRefused,
    /// The connection was reset by the peer.
    ConnectionReset,
    /// The transport gave up waiting (e.g. a TCP retransmission timeout).
    Timeout,
    /// The connection was closed.
    ConnectionClosed,
    /// The host name could not be resolved.
    ResolveFailed,
}

impl Error {
    /// Returns `true` if this is the "not ready yet" condition.
    pub fn is_would_block(&self) -> bool {
        matches!(self, Error::WouldBlock)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Error::WouldBlock => "operation would block",
            Error::NotOpen => "connection not open",
            Error::WriteError => "write failed",
            Error::ReadError => "read failed",
            Error::ConnectionRefused => "connection refused",
            Error::ConnectionReset => "connection reset",
            Error::Timeout => "transport timed out",
            Error::ConnectionClosed => "connection closed",
            Error::ResolveFailed => "name resolution failed",
        };
        f.write_str(text)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::WouldBlock => defmt::write!(f, "WouldBlock"),
            Error::NotOpen => defmt::write!(f, "NotOpen"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::ConnectionRefused => defmt::write!(f, "ConnectionRefused"),
            Error::ConnectionReset => defmt::write!(f, "ConnectionReset"),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::ConnectionClosed => defmt::write!(f, "ConnectionClosed"),
            Error::ResolveFailed => defmt::write!(f, "ResolveFailed"),
        }
    }
}
