//! Non-blocking PubNub client.
//!
//! A [`Context`] is one logical PubNub client with a single outstanding
//! operation. It owns a transmit and a receive [`Buffer`](crate::network::buffer::Buffer)
//! whose sizes are const generics, so nothing here allocates.
//!
//! Starting an operation ([`Context::publish`], [`Context::subscribe`],
//! [`Context::leave`], [`Context::time`], [`Context::get`]) only serializes
//! the request. The exchange itself is driven by calling
//! [`Context::advance`] (or [`Registry::poll`] for every context at once)
//! from the application's scheduler. Each call does at most one transport
//! call and never blocks; a transport that is not ready reports
//! [`WouldBlock`](crate::network::Error::WouldBlock) and the call is simply
//! repeated on a later tick.
//!
//! ```rust,no_run
//! use libpubnub::network::application::pubnub::{Config, Registry, Status};
//! # use libpubnub::network::{Clock, Close, Connect, Connection, Error, Instant, Read, Resolve, Write};
//! # use core::net::{IpAddr, SocketAddr};
//! # #[derive(Debug)] struct Socket;
//! # impl Read for Socket { type Error = Error; fn read(&mut self, _: &mut [u8]) -> Result<usize, Error> { Err(Error::WouldBlock) } }
//! # impl Write for Socket {
//! #     type Error = Error;
//! #     fn write(&mut self, b: &[u8]) -> Result<usize, Error> { Ok(b.len()) }
//! #     fn flush(&mut self) -> Result<(), Error> { Ok(()) }
//! # }
//! # impl Close for Socket { type Error = Error; fn close(self) -> Result<(), Error> { Ok(()) } }
//! # impl Connection for Socket { fn poll_connect(&mut self) -> Result<(), Error> { Ok(()) } }
//! # struct Stack;
//! # impl Connect for Stack { type Connection = Socket; type Error = Error; fn connect(&mut self, _: SocketAddr) -> Result<Socket, Error> { Ok(Socket) } }
//! # impl Resolve for Stack { type Error = Error; fn resolve(&mut self, _: &str) -> Result<IpAddr, Error> { Err(Error::WouldBlock) } }
//! # struct Ticks;
//! # impl Clock for Ticks { fn now(&self) -> Instant { Instant::from_ticks(0) } }
//! # let (mut connector, mut resolver, clock) = (Stack, Stack, Ticks);
//! let mut registry: Registry<Socket> = Registry::new(());
//! let slot = registry.claim(&Config::new("demo", "demo")).unwrap();
//!
//! registry.get_mut(slot).unwrap().publish("hello_world", "\"Hello from Rust\"").unwrap();
//! loop {
//!     registry.poll(&mut connector, &mut resolver, &clock);
//!     if let Status::Finished(outcome) = registry.get(slot).unwrap().status() {
//!         println!("publish finished: {}", outcome);
//!         break;
//!     }
//! }
//! ```

use core::fmt;
use core::net::IpAddr;

/// The per-client state machine.
pub mod context;

/// Operation kinds and their request paths.
pub mod operation;

/// Completion callbacks.
pub mod notify;

/// Validation of response bodies.
pub mod reply;

/// The fixed table of contexts.
pub mod registry;

pub use context::{Context, State, Status};
pub use notify::Notify;
pub use operation::OperationKind;
pub use registry::Registry;

/// Host used when no origin is configured.
pub const DEFAULT_ORIGIN: &str = "pubsub.pubnub.com";

/// TCP port used when none is configured.
pub const DEFAULT_PORT: u16 = 80;

/// Default per-operation deadline in clock ticks.
///
/// On a millisecond clock this is five minutes and ten seconds, just longer
/// than the server holds a subscribe long-poll open.
pub const DEFAULT_TIMEOUT: u64 = 310_000;

/// Default transmit buffer size in bytes.
pub const DEFAULT_TX_CAPACITY: usize = 256;

/// Default receive buffer size in bytes.
pub const DEFAULT_RX_CAPACITY: usize = 512;

/// Default number of contexts in a [`Registry`].
pub const DEFAULT_CONTEXTS: usize = 2;

/// Longest key, origin, auth key or UUID a context stores.
pub const MAX_VALUE_LEN: usize = 64;

/// Longest time-token accepted from a subscribe reply.
pub const MAX_TIMETOKEN_LEN: usize = 63;

/// Result code of a PubNub operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The operation completed and the response was well formed.
    Ok,
    /// An operation was requested while another one was in flight.
    InProgress,
    /// The operation is actively in progress.
    Started,
    /// The operation was cancelled.
    Cancelled,
    /// The response status line or body was malformed.
    FormatError,
    /// The server answered with a non-2xx status, or refused a publish.
    HttpError,
    /// The transport failed.
    IoError,
    /// The deadline elapsed before a response was received.
    Timeout,
    /// The response did not fit the receive buffer, or unread messages of a
    /// previous subscribe are still pending.
    RxBufferNotEmpty,
    /// The request did not fit the transmit buffer.
    TxBufferTooSmall,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Ok`].
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Ok => "ok",
            Outcome::InProgress => "request already in progress",
            Outcome::Started => "request started",
            Outcome::Cancelled => "request cancelled",
            Outcome::FormatError => "malformed response",
            Outcome::HttpError => "http error",
            Outcome::IoError => "i/o error",
            Outcome::Timeout => "request timed out",
            Outcome::RxBufferNotEmpty => "receive buffer not drained",
            Outcome::TxBufferTooSmall => "transmit buffer too small",
        };
        f.write_str(text)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Outcome {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Outcome::Ok => defmt::write!(f, "Ok"),
            Outcome::InProgress => defmt::write!(f, "InProgress"),
            Outcome::Started => defmt::write!(f, "Started"),
            Outcome::Cancelled => defmt::write!(f, "Cancelled"),
            Outcome::FormatError => defmt::write!(f, "FormatError"),
            Outcome::HttpError => defmt::write!(f, "HttpError"),
            Outcome::IoError => defmt::write!(f, "IoError"),
            Outcome::Timeout => defmt::write!(f, "Timeout"),
            Outcome::RxBufferNotEmpty => defmt::write!(f, "RxBufferNotEmpty"),
            Outcome::TxBufferTooSmall => defmt::write!(f, "TxBufferTooSmall"),
        }
    }
}

/// Errors returned when an operation cannot be started or a context cannot
/// be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The context already has an operation in flight.
    InProgress,
    /// Messages from the previous subscribe have not been read yet.
    RxBufferNotEmpty,
    /// The request does not fit the transmit buffer.
    TxBufferTooSmall,
    /// The slot is out of range or not claimed.
    InvalidContext,
    /// Every slot of the registry is claimed.
    RegistryFull,
    /// A configured value is longer than [`MAX_VALUE_LEN`].
    ValueTooLong,
    /// An origin or raw path contains spaces, control characters or
    /// non-ASCII bytes.
    InvalidValue,
}

impl Error {
    /// The result code reported for this error, if it has one.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Error::InProgress => Some(Outcome::InProgress),
            Error::RxBufferNotEmpty => Some(Outcome::RxBufferNotEmpty),
            Error::TxBufferTooSmall => Some(Outcome::TxBufferTooSmall),
            Error::InvalidContext
            | Error::RegistryFull
            | Error::ValueTooLong
            | Error::InvalidValue => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Error::InProgress => "operation already in progress",
            Error::RxBufferNotEmpty => "unread messages pending",
            Error::TxBufferTooSmall => "request does not fit the transmit buffer",
            Error::InvalidContext => "invalid context",
            Error::RegistryFull => "no free context",
            Error::ValueTooLong => "value too long",
            Error::InvalidValue => "value not allowed in a request line or header",
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
            Error::InProgress => defmt::write!(f, "InProgress"),
            Error::RxBufferNotEmpty => defmt::write!(f, "RxBufferNotEmpty"),
            Error::TxBufferTooSmall => defmt::write!(f, "TxBufferTooSmall"),
            Error::InvalidContext => defmt::write!(f, "InvalidContext"),
            Error::RegistryFull => defmt::write!(f, "RegistryFull"),
            Error::ValueTooLong => defmt::write!(f, "ValueTooLong"),
            Error::InvalidValue => defmt::write!(f, "InvalidValue"),
        }
    }
}

/// Context configuration.
///
/// Values are copied into the context when it is created, so the strings
/// only need to live for the duration of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config<'a> {
    /// Key used for publishing.
    pub publish_key: &'a str,
    /// Key used for subscribing and presence.
    pub subscribe_key: &'a str,
    /// Host name sent in the `Host` header and resolved when no address is set.
    pub origin: &'a str,
    /// TCP port of the origin.
    pub port: u16,
    /// Address of the origin; skips name resolution when set.
    pub address: Option<IpAddr>,
    /// Per-operation deadline in clock ticks.
    pub timeout: u64,
    /// Restart subscribing from "now" after any failed subscribe instead of
    /// only after malformed replies. Messages published in the meantime are
    /// skipped.
    pub missed_messages_ok: bool,
}

impl<'a> Config<'a> {
    /// A configuration for the given keys with every other field defaulted.
    pub const fn new(publish_key: &'a str, subscribe_key: &'a str) -> Self {
        Self {
            publish_key,
            subscribe_key,
            origin: DEFAULT_ORIGIN,
            port: DEFAULT_PORT,
            address: None,
            timeout: DEFAULT_TIMEOUT,
            missed_messages_ok: false,
        }
    }
}
