//! HTTP/1.1 GET request serialization into a fixed buffer.

use crate::network::buffer::{Buffer, BufferFull};

/// Value sent in the `User-Agent` header.
pub const USER_AGENT: &str = concat!("libpubnub/", env!("CARGO_PKG_VERSION"));

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Returns `true` for bytes that are copied into a URL unchanged.
///
/// RFC 3986 unreserved characters plus a few reserved ones that are safe in
/// PubNub paths (`,` separates channel lists, the rest show up in JSON).
fn is_url_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'_' | b'.' | b'~' | b',' | b'=' | b':' | b';' | b'@' | b'[' | b']'
        )
}

/// Appends `text` to `buf`, percent-encoding every byte outside the safe set.
///
/// On [`BufferFull`] the buffer may hold a partially encoded value; callers
/// reset it before reuse.
pub fn percent_encode<const N: usize>(buf: &mut Buffer<N>, text: &str) -> Result<(), BufferFull> {
    let bytes = text.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        let run = bytes[start..]
            .iter()
            .position(|&b| !is_url_safe(b))
            .unwrap_or(bytes.len() - start);
        buf.append(&bytes[start..start + run])?;
        start += run;

        if let Some(&byte) = bytes.get(start) {
            buf.append(&[
                b'%',
                HEX[(byte >> 4) as usize],
                HEX[(byte & 0x0F) as usize],
            ])?;
            start += 1;
        }
    }
    Ok(())
}

/// Writes a single GET request into a transmit buffer.
///
/// The request line is built piecewise (`path`, `segment`, `query`) and closed
/// with [`finish`](Self::finish), which appends the fixed header block.
#[derive(Debug)]
pub struct RequestWriter<'b, const N: usize> {
    buf: &'b mut Buffer<N>,
    has_query: bool,
}

impl<'b, const N: usize> RequestWriter<'b, N> {
    /// Clears `buf` and starts a `GET` request line.
    pub fn get(buf: &'b mut Buffer<N>) -> Result<Self, BufferFull> {
        buf.reset();
        buf.append(b"GET ")?;
        Ok(Self {
            buf,
            has_query: false,
        })
    }

    /// Appends `path` verbatim. A `?` in it starts the query string.
    pub fn path(&mut self, path: &str) -> Result<&mut Self, BufferFull> {
        self.buf.append(path.as_bytes())?;
        self.has_query |= path.contains('?');
        Ok(self)
    }

    /// Appends `/` followed by the percent-encoded `value`.
    pub fn segment(&mut self, value: &str) -> Result<&mut Self, BufferFull> {
        self.buf.push(b'/')?;
        percent_encode(self.buf, value)?;
        Ok(self)
    }

    /// Appends `/` followed by `value` verbatim.
    pub fn raw_segment(&mut self, value: &str) -> Result<&mut Self, BufferFull> {
        self.buf.push(b'/')?;
        self.buf.append(value.as_bytes())?;
        Ok(self)
    }

    /// Appends a `name=value` query parameter with a percent-encoded value.
    pub fn query(&mut self, name: &str, value: &str) -> Result<&mut Self, BufferFull> {
        self.buf.push(if self.has_query { b'&' } else { b'?' })?;
        self.has_query = true;
        self.buf.append(name.as_bytes())?;
        self.buf.push(b'=')?;
        percent_encode(self.buf, value)?;
        Ok(self)
    }

    /// Like [`query`](Self::query) but copies an already encoded value.
    pub fn raw_query(&mut self, name: &str, value: &str) -> Result<&mut Self, BufferFull> {
        self.buf.push(if self.has_query { b'&' } else { b'?' })?;
        self.has_query = true;
        self.buf.append(name.as_bytes())?;
        self.buf.push(b'=')?;
        self.buf.append(value.as_bytes())?;
        Ok(self)
    }

    /// Closes the request line and writes the header block.
    ///
    /// Returns the total request length in bytes.
    pub fn finish(self, host: &str) -> Result<usize, BufferFull> {
        self.buf.append(b" HTTP/1.1\r\nHost: ")?;
        self.buf.append(host.as_bytes())?;
        self.buf.append(b"\r\nUser-Agent: ")?;
        self.buf.append(USER_AGENT.as_bytes())?;
        self.buf.append(b"\r\nConnection: close\r\n\r\n")?;
        Ok(self.buf.len())
    }
}
