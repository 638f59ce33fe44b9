//! # libpubnub - non-blocking PubNub client for embedded devices
//!
//! A PubNub publish/subscribe client for resource-constrained devices run by a
//! cooperative scheduler. It never allocates and never blocks: every
//! operation is a small state machine that makes one step of progress each
//! time the scheduler calls it.
//!
//! ## Features
//!
//! ### PubNub
//! - **Publish** messages to channels
//! - **Subscribe** to one or more channels, with time-token tracking
//! - **Leave** channels (presence)
//! - **Time** and raw **GET** requests
//! - Cancellation and per-operation deadlines
//! - A fixed registry of contexts with completion callbacks
//!
//! ### Network Building Blocks
//! - Non-blocking transport traits the application implements on top of its
//!   TCP/IP stack
//! - Fixed-capacity buffers
//! - HTTP/1.1 request serialization and incremental response parsing
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libpubnub = "0.1.0"
//! ```
//!
//! ### Publishing
//!
//! ```rust,no_run
//! use libpubnub::network::application::pubnub::{Config, Context, Status};
//! # use libpubnub::network::{Close, Connect, Connection, Error, Instant, Read, Resolve, Write};
//! # use core::net::{IpAddr, SocketAddr};
//! # struct Socket;
//! # impl Read for Socket { type Error = Error; fn read(&mut self, _: &mut [u8]) -> Result<usize, Error> { Ok(0) } }
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
//! # fn ticks() -> Instant { Instant::from_ticks(0) }
//! # let (mut stack, mut dns) = (Stack, Stack);
//!
//! let mut ctx: Context<Socket> = Context::new(&Config::new("demo", "demo")).unwrap();
//! ctx.set_uuid(Some("thermostat-7")).unwrap();
//! ctx.publish("hello_world", "{\"temp\":21.5}").unwrap();
//!
//! // Call from the scheduler until the operation finishes.
//! while ctx.advance(&mut stack, &mut dns, ticks()).is_none() {}
//!
//! match ctx.status() {
//!     Status::Finished(outcome) if outcome.is_ok() => {}
//!     other => panic!("publish failed: {:?} (http {})", other, ctx.last_http_code()),
//! }
//! ```
//!
//! ### Subscribing
//!
//! After a subscribe finishes with [`Outcome::Ok`](network::application::pubnub::Outcome::Ok)
//! the received messages are read one at a time:
//!
//! ```rust,ignore
//! ctx.subscribe("hello_world")?;
//! // ... drive with advance() until finished ...
//! while let Some(message) = ctx.next_message() {
//!     handle(message);
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Log through `defmt` and implement `defmt::Format` for public types
//! - `log`: Log through the `log` facade

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

/// Network abstraction layer and protocol implementations.
///
/// Contains the non-blocking transport traits, fixed-size buffers, the HTTP
/// building blocks and the PubNub client itself.
pub mod network;
