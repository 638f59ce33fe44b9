//! Checks that a 2xx response body has the shape the operation expects.
//!
//! Publish, leave and time acknowledgements are small fixed documents and are
//! deserialized with `serde-json-core`. Subscribe replies carry arbitrary
//! JSON messages, so they are scanned structurally instead and only the
//! positions of the message list, the time-token and the channel list are
//! recorded.

use super::{MAX_TIMETOKEN_LEN, Outcome};
use serde::Deserialize;

/// A byte range inside a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// First byte.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

impl Span {
    /// Returns `true` if the range holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Positions found in a subscribe reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    /// Contents of the message array, without the brackets.
    pub messages: Span,
    /// The time-token, without quotes.
    pub timetoken: Span,
    /// The comma separated channel list, without quotes, if present.
    pub channels: Option<Span>,
}

/// `[1,"Sent","14178940800777403"]`
#[derive(Debug, Deserialize)]
struct PublishAck<'a>(u8, &'a str, &'a str);

/// `{"status": 200, "message": "OK", "action": "leave", "service": "Presence"}`
#[derive(Debug, Deserialize)]
struct PresenceAck<'a> {
    status: u16,
    #[serde(borrow)]
    message: &'a str,
    #[serde(borrow)]
    action: Option<&'a str>,
    #[serde(borrow)]
    service: Option<&'a str>,
}

fn trimmed(body: &[u8]) -> &[u8] {
    body.trim_ascii()
}

/// Validates a publish acknowledgement.
///
/// A flag other than `1` means the server refused the message and is
/// reported as [`Outcome::HttpError`].
pub fn publish(body: &[u8]) -> Result<(), Outcome> {
    let (PublishAck(flag, description, _timetoken), _) =
        serde_json_core::from_slice::<PublishAck<'_>>(trimmed(body))
            .map_err(|_| Outcome::FormatError)?;
    if flag == 1 {
        Ok(())
    } else {
        warn!("publish refused: {}", description);
        Err(Outcome::HttpError)
    }
}

/// Validates a leave acknowledgement: `[]` or a presence status object.
pub fn leave(body: &[u8]) -> Result<(), Outcome> {
    let body = trimmed(body);
    if body == b"[]" {
        return Ok(());
    }
    let (ack, _) = serde_json_core::from_slice::<PresenceAck<'_>>(body)
        .map_err(|_| Outcome::FormatError)?;
    trace!(
        "presence {} {}: {}",
        ack.service.unwrap_or(""),
        ack.action.unwrap_or(""),
        ack.message
    );
    if (200..300).contains(&ack.status) {
        Ok(())
    } else {
        Err(Outcome::HttpError)
    }
}

/// Validates a time reply and returns the time-token.
pub fn time(body: &[u8]) -> Result<u64, Outcome> {
    serde_json_core::from_slice::<(u64,)>(trimmed(body))
        .map(|((timetoken,), _)| timetoken)
        .map_err(|_| Outcome::FormatError)
}

/// Locates the parts of `[[<messages>],"<timetoken>"(,"<channels>")?]`.
///
/// The whole body must be valid UTF-8, every message must be balanced JSON
/// and the time-token must be at most [`MAX_TIMETOKEN_LEN`] decimal digits.
/// Spans index into `body` as given, surrounding whitespace included.
pub fn subscribe(body: &[u8]) -> Result<Subscription, Outcome> {
    if core::str::from_utf8(body).is_err() {
        return Err(Outcome::FormatError);
    }
    let body = body.trim_ascii_end();
    let open = body.len() - body.trim_ascii_start().len();

    if !body[open..].starts_with(b"[[") {
        return Err(Outcome::FormatError);
    }
    let close = matching_bracket(body, open + 1).ok_or(Outcome::FormatError)?;
    let messages = Span {
        start: open + 2,
        end: close,
    };

    let mut pos = close + 1;
    let timetoken = next_string(body, &mut pos).ok_or(Outcome::FormatError)?;
    let digits = &body[timetoken.start..timetoken.end];
    // Echoed into the next request line.
    if digits.is_empty()
        || digits.len() > MAX_TIMETOKEN_LEN
        || !digits.iter().all(u8::is_ascii_digit)
    {
        return Err(Outcome::FormatError);
    }
    let channels = match body.get(pos) {
        Some(b',') => Some(next_string(body, &mut pos).ok_or(Outcome::FormatError)?),
        _ => None,
    };
    if pos + 1 != body.len() || body[pos] != b']' {
        return Err(Outcome::FormatError);
    }

    Ok(Subscription {
        messages,
        timetoken,
        channels,
    })
}

/// Splits the next top-level item off `body[span]`.
///
/// Returns the item and advances `span.start` past the separating comma.
pub fn next_item(body: &[u8], span: &mut Span) -> Option<Span> {
    if span.is_empty() {
        return None;
    }
    let start = span.start;
    match top_level_comma(&body[start..span.end]) {
        Some(i) => {
            span.start = start + i + 1;
            Some(Span { start, end: start + i })
        }
        None => {
            span.start = span.end;
            Some(Span { start, end: span.end })
        }
    }
}

/// Index of the first comma outside strings, arrays and objects.
fn top_level_comma(bytes: &[u8]) -> Option<usize> {
    let mut scan = Scanner::default();
    bytes
        .iter()
        .position(|&b| scan.step(b) && scan.depth == 0 && b == b',')
}

/// Index of the bracket closing the one at `open`.
fn matching_bracket(body: &[u8], open: usize) -> Option<usize> {
    let mut scan = Scanner::default();
    for (i, &b) in body.iter().enumerate().skip(open) {
        if scan.step(b) && scan.depth == 0 {
            return Some(i);
        }
    }
    None
}

/// Expects `,"..."` at `*pos` and returns the string contents.
fn next_string(body: &[u8], pos: &mut usize) -> Option<Span> {
    if body.get(*pos) != Some(&b',') || body.get(*pos + 1) != Some(&b'"') {
        return None;
    }
    let start = *pos + 2;
    let len = body[start..].iter().position(|&b| b == b'"')?;
    let span = Span {
        start,
        end: start + len,
    };
    // Time-tokens and channel names never contain escapes.
    if body[span.start..span.end].contains(&b'\\') {
        return None;
    }
    *pos = span.end + 1;
    Some(span)
}

/// Tracks string and nesting state while walking JSON text.
#[derive(Default)]
struct Scanner {
    depth: i32,
    in_string: bool,
    escaped: bool,
}

impl Scanner {
    /// Consumes one byte. Returns `true` if the byte is structural, i.e. not
    /// part of a string.
    fn step(&mut self, byte: u8) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }
        if self.in_string {
            match byte {
                b'\\' => self.escaped = true,
                b'"' => self.in_string = false,
                _ => {}
            }
            return false;
        }
        match byte {
            b'"' => {
                self.in_string = true;
                return false;
            }
            b'[' | b'{' => self.depth += 1,
            b']' | b'}' => self.depth -= 1,
            _ => {}
        }
        true
    }
}
