//! HTTP/1.1 protocol pieces for embedded systems.
//!
//! This module does not contain a client. It provides the two halves a
//! non-blocking exchange needs, both working on fixed-size buffers:
//!
//! - [`request::RequestWriter`] serializes a `GET` request line with
//!   percent-encoded path segments and query parameters, followed by a fixed
//!   header block.
//! - [`response::ResponseParser`] consumes a response in pieces of any size,
//!   validates the status line and frames the body by `Content-Length`,
//!   chunked transfer encoding or end of stream.
//!
//! # Usage
//!
//! ```rust
//! use libpubnub::network::buffer::Buffer;
//! use libpubnub::network::application::http::{RequestWriter, ResponseParser};
//!
//! let mut tx: Buffer<128> = Buffer::new();
//! let mut request = RequestWriter::get(&mut tx).unwrap();
//! request.segment("time").unwrap().raw_segment("0").unwrap();
//! request.finish("pubsub.pubnub.com").unwrap();
//! assert!(tx.as_slice().starts_with(b"GET /time/0 HTTP/1.1\r\n"));
//!
//! let mut rx: Buffer<64> = Buffer::new();
//! let mut parser = ResponseParser::new();
//! parser
//!     .feed(b"HTTP/1.1 200 OK\r\nContent-Length: 19\r\n\r\n[14178940800777403]", &mut rx)
//!     .unwrap();
//! assert!(parser.is_complete());
//! assert_eq!(rx.as_slice(), b"[14178940800777403]");
//! ```

/// Request serialization.
pub mod request;

/// Incremental response parsing.
pub mod response;

pub use request::{RequestWriter, USER_AGENT, percent_encode};
pub use response::{ParseError, ResponseParser};
