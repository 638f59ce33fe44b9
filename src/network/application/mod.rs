//! # Application Layer Network Protocols
//!
//! Everything above the transport traits of [`crate::network`].
//!
//! ## Available Protocols
//!
//! - **[`http`]**: HTTP/1.1 request serialization and incremental response
//!   parsing over fixed buffers
//! - **[`pubnub`]**: non-blocking PubNub publish/subscribe contexts built on
//!   top of [`http`]
//!
//! ## Design Principles
//!
//! - **Connection Agnostic**: Work with any type implementing [`Connection`](crate::network::Connection)
//! - **Never Blocking**: Progress is made in small steps driven by the caller's scheduler
//! - **No Heap**: Fixed-size buffers sized by const generics

/// HTTP/1.1 building blocks.
///
/// Request serialization and response framing, shared by the PubNub contexts.
pub mod http;

/// PubNub client contexts.
///
/// Per-context state machines, the fixed context registry and completion
/// notification.
pub mod pubnub;
