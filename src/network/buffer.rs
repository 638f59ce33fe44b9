//! Fixed-capacity byte buffers.
//!
//! Every PubNub context owns one transmit and one receive [`Buffer`]. The
//! capacity is a const generic, so the memory used by a context is known at
//! compile time and never grows.

use heapless::Vec;

/// Returned when an append would exceed a buffer's capacity.
///
/// Nothing is written when this error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferFull;

impl core::fmt::Display for BufferFull {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("buffer full")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BufferFull {}

#[cfg(feature = "defmt")]
impl defmt::Format for BufferFull {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "BufferFull")
    }
}

/// A byte region with a fixed capacity `N` and a logical length.
#[derive(Debug, Clone, Default)]
pub struct Buffer<const N: usize> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> Buffer<N> {
    /// Creates an empty buffer.
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Clears the logical contents. Capacity is unchanged.
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    /// Appends `data` as a whole, or fails without writing anything.
    pub fn append(&mut self, data: &[u8]) -> Result<(), BufferFull> {
        self.bytes.extend_from_slice(data).map_err(|_| BufferFull)
    }

    /// Appends a single byte.
    pub fn push(&mut self, byte: u8) -> Result<(), BufferFull> {
        self.bytes.push(byte).map_err(|_| BufferFull)
    }

    /// Drops the first `count` bytes, moving the rest to the front.
    ///
    /// Consuming more than [`len`](Self::len) bytes empties the buffer.
    pub fn consume(&mut self, count: usize) {
        let len = self.bytes.len();
        if count >= len {
            self.bytes.clear();
            return;
        }
        self.bytes.copy_within(count..len, 0);
        self.bytes.truncate(len - count);
    }

    /// The current logical contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes currently held.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The fixed capacity `N`.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes that can still be appended.
    pub fn remaining(&self) -> usize {
        N - self.bytes.len()
    }
}

impl<const N: usize> core::fmt::Write for Buffer<N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.append(s.as_bytes()).map_err(|_| core::fmt::Error)
    }
}
