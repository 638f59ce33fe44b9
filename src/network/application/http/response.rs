//! Incremental HTTP/1.1 response parser.
//!
//! [`ResponseParser`] is fed whatever the transport delivered, in pieces of
//! any size, and writes the decoded body into a caller-owned [`Buffer`]. It
//! keeps only a small line buffer for the status line, headers and chunk
//! sizes, so the whole response never has to be held twice.

use crate::network::buffer::Buffer;
use heapless::Vec;

/// Bytes kept from a single status, header or chunk-size line.
///
/// Longer lines are truncated; only their prefix is inspected.
pub const LINE_CAPACITY: usize = 128;

/// Why a response could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The status line is not `HTTP/1.x NNN ...`.
    MalformedStatus,
    /// A `Content-Length` header could not be parsed.
    MalformedHeader,
    /// A chunk size line or chunk terminator is invalid.
    MalformedChunk,
    /// The body does not fit into the receive buffer.
    BodyTooLarge,
    /// The stream ended before the body was complete.
    UnexpectedEnd,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ParseError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ParseError::MalformedStatus => defmt::write!(f, "MalformedStatus"),
            ParseError::MalformedHeader => defmt::write!(f, "MalformedHeader"),
            ParseError::MalformedChunk => defmt::write!(f, "MalformedChunk"),
            ParseError::BodyTooLarge => defmt::write!(f, "BodyTooLarge"),
            ParseError::UnexpectedEnd => defmt::write!(f, "UnexpectedEnd"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    StatusLine,
    Headers,
    /// Body framed by `Content-Length`; bytes still expected.
    Length(usize),
    /// Body runs until the peer closes the connection.
    UntilClose,
    ChunkSize,
    ChunkData(usize),
    /// The CRLF that follows every chunk's data.
    ChunkEnd,
    Done,
}

/// Incremental parser for one HTTP response.
#[derive(Debug, Clone)]
pub struct ResponseParser {
    phase: Phase,
    line: Vec<u8, LINE_CAPACITY>,
    status: u16,
    content_length: Option<usize>,
    chunked: bool,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    /// Creates a parser waiting for a status line.
    pub const fn new() -> Self {
        Self {
            phase: Phase::StatusLine,
            line: Vec::new(),
            status: 0,
            content_length: None,
            chunked: false,
        }
    }

    /// Forgets everything about the current response.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The status code, or `0` before the status line has been parsed.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns `true` once the whole body has been received.
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Parses `input`, appending body bytes to `body`.
    ///
    /// Returns how many bytes of `input` belong to the response. Bytes after
    /// the end of the response are not consumed.
    pub fn feed<const N: usize>(
        &mut self,
        input: &[u8],
        body: &mut Buffer<N>,
    ) -> Result<usize, ParseError> {
        let mut pos = 0;
        while pos < input.len() && self.phase != Phase::Done {
            let rest = &input[pos..];
            match self.phase {
                Phase::StatusLine | Phase::Headers | Phase::ChunkSize | Phase::ChunkEnd => {
                    let (used, complete) = self.take_line(rest);
                    pos += used;
                    if complete {
                        self.on_line(body.remaining())?;
                    }
                }
                Phase::Length(expected) => {
                    let n = expected.min(rest.len());
                    body.append(&rest[..n])
                        .map_err(|_| ParseError::BodyTooLarge)?;
                    pos += n;
                    self.phase = if n == expected {
                        Phase::Done
                    } else {
                        Phase::Length(expected - n)
                    };
                }
                Phase::ChunkData(expected) => {
                    let n = expected.min(rest.len());
                    body.append(&rest[..n])
                        .map_err(|_| ParseError::BodyTooLarge)?;
                    pos += n;
                    self.phase = if n == expected {
                        Phase::ChunkEnd
                    } else {
                        Phase::ChunkData(expected - n)
                    };
                }
                Phase::UntilClose => {
                    body.append(rest).map_err(|_| ParseError::BodyTooLarge)?;
                    pos = input.len();
                }
                Phase::Done => break,
            }
        }
        Ok(pos)
    }

    /// Signals that the peer closed the stream.
    ///
    /// Completes a body that runs until close; anything else still pending
    /// is an [`ParseError::UnexpectedEnd`].
    pub fn finish(&mut self) -> Result<(), ParseError> {
        match self.phase {
            Phase::Done => Ok(()),
            Phase::UntilClose => {
                self.phase = Phase::Done;
                Ok(())
            }
            _ => Err(ParseError::UnexpectedEnd),
        }
    }

    /// Accumulates bytes up to and including `\n`.
    ///
    /// Returns the number of bytes used and whether a full line is available.
    fn take_line(&mut self, input: &[u8]) -> (usize, bool) {
        let (content, used, complete) = match input.iter().position(|&b| b == b'\n') {
            Some(i) => (&input[..i], i + 1, true),
            None => (input, input.len(), false),
        };
        let room = LINE_CAPACITY - self.line.len();
        let kept = &content[..content.len().min(room)];
        // Cannot fail: `kept` fits in the remaining room.
        let _ = self.line.extend_from_slice(kept);
        (used, complete)
    }

    fn on_line(&mut self, body_room: usize) -> Result<(), ParseError> {
        let mut line = core::mem::take(&mut self.line);
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        let result = match self.phase {
            Phase::StatusLine => self.status_line(&line),
            Phase::Headers if line.is_empty() => self.start_body(body_room),
            Phase::Headers => self.header(&line),
            Phase::ChunkSize => self.chunk_size(&line, body_room),
            Phase::ChunkEnd if line.is_empty() => {
                self.phase = Phase::ChunkSize;
                Ok(())
            }
            Phase::ChunkEnd => Err(ParseError::MalformedChunk),
            _ => Ok(()),
        };
        line.clear();
        self.line = line;
        result
    }

    fn status_line(&mut self, line: &[u8]) -> Result<(), ParseError> {
        // "HTTP/1.x NNN" optionally followed by " reason"
        if line.len() < 12 || !line.starts_with(b"HTTP/1.") || line[8] != b' ' {
            return Err(ParseError::MalformedStatus);
        }
        let code = &line[9..12];
        if !code.iter().all(u8::is_ascii_digit) || line.get(12).is_some_and(|&b| b != b' ') {
            return Err(ParseError::MalformedStatus);
        }
        self.status = code
            .iter()
            .fold(0u16, |acc, &d| acc * 10 + u16::from(d - b'0'));
        self.phase = Phase::Headers;
        Ok(())
    }

    fn header(&mut self, line: &[u8]) -> Result<(), ParseError> {
        let Some(colon) = line.iter().position(|&b| b == b':') else {
            return Ok(());
        };
        let name = line[..colon].trim_ascii();
        let value = line[colon + 1..].trim_ascii();

        if name.eq_ignore_ascii_case(b"content-length") {
            let length = core::str::from_utf8(value)
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .ok_or(ParseError::MalformedHeader)?;
            self.content_length = Some(length);
        } else if name.eq_ignore_ascii_case(b"transfer-encoding") {
            self.chunked = value
                .windows(7)
                .any(|w| w.eq_ignore_ascii_case(b"chunked"));
        }
        Ok(())
    }

    fn start_body(&mut self, body_room: usize) -> Result<(), ParseError> {
        self.phase = match (self.chunked, self.content_length) {
            (true, _) => Phase::ChunkSize,
            (false, Some(0)) => Phase::Done,
            (false, Some(length)) if length > body_room => return Err(ParseError::BodyTooLarge),
            (false, Some(length)) => Phase::Length(length),
            (false, None) => Phase::UntilClose,
        };
        Ok(())
    }

    fn chunk_size(&mut self, line: &[u8], body_room: usize) -> Result<(), ParseError> {
        // Chunk extensions after ';' are ignored
        let digits = line
            .split(|&b| b == b';')
            .next()
            .unwrap_or_default()
            .trim_ascii();
        let size = core::str::from_utf8(digits)
            .ok()
            .filter(|d| !d.is_empty())
            .and_then(|d| usize::from_str_radix(d, 16).ok())
            .ok_or(ParseError::MalformedChunk)?;

        self.phase = match size {
            0 => Phase::Done,
            size if size > body_room => return Err(ParseError::BodyTooLarge),
            size => Phase::ChunkData(size),
        };
        Ok(())
    }
}
