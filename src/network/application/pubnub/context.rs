//! One PubNub client and its request/response state machine.
//!
//! A context goes through
//!
//! ```text
//! Idle -> [Resolving] -> Connecting -> TxInProgress -> AwaitingResponse
//!      -> RxInProgress -> Finished(outcome)
//! ```
//!
//! `Resolving` is skipped when the origin address is configured or was
//! resolved by an earlier operation. Any active state may end early in
//! `Finished(Cancelled)`, `Finished(Timeout)` or `Finished(IoError)`.

use super::operation::{Identity, OperationKind, Request};
use super::reply::{self, Span, Subscription};
use super::{
    Config, DEFAULT_RX_CAPACITY, DEFAULT_TX_CAPACITY, Error, MAX_TIMETOKEN_LEN, MAX_VALUE_LEN,
    Outcome,
};
use crate::network::application::http::{ParseError, ResponseParser};
use crate::network::buffer::Buffer;
use crate::network::{Close, Connect, Connection, Instant, Read, Resolve, Write};
use core::net::{IpAddr, SocketAddr};
use heapless::String;

/// Bytes pulled from the transport per read.
const READ_CHUNK: usize = 64;

type Value = String<MAX_VALUE_LEN>;

/// Where a context is in its current exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No operation outstanding.
    Idle,
    /// Looking up the origin's address.
    Resolving,
    /// Opening the TCP connection.
    Connecting,
    /// Draining the transmit buffer into the connection.
    TxInProgress,
    /// Request sent, nothing received yet.
    AwaitingResponse,
    /// Receiving the response.
    RxInProgress,
    /// The operation ended. Stays here until acknowledged or a new operation
    /// starts.
    Finished(Outcome),
}

impl State {
    /// Returns `true` while an operation is in flight.
    pub fn is_active(&self) -> bool {
        !matches!(self, State::Idle | State::Finished(_))
    }
}

/// Coarse view of [`State`] for polling applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// No operation outstanding.
    Idle,
    /// An operation is in flight.
    InProgress,
    /// The last operation ended with this outcome.
    Finished(Outcome),
}

/// A single PubNub client with at most one operation in flight.
///
/// `C` is the connection type produced by the application's
/// [`Connect`] implementation. `TX` and `RX` are the sizes of the transmit
/// and receive buffers in bytes.
#[derive(Debug)]
pub struct Context<C, const TX: usize = DEFAULT_TX_CAPACITY, const RX: usize = DEFAULT_RX_CAPACITY>
{
    slot: usize,
    state: State,
    kind: Option<OperationKind>,
    result: Outcome,
    http_code: u16,

    publish_key: Value,
    subscribe_key: Value,
    origin: Value,
    port: u16,
    address: Option<IpAddr>,
    resolved: Option<IpAddr>,
    auth: Option<Value>,
    uuid: Option<Value>,
    timeout: u64,
    missed_messages_ok: bool,

    deadline: Option<Instant>,
    connection: Option<C>,
    tx: Buffer<TX>,
    sent: usize,
    rx: Buffer<RX>,
    parser: ResponseParser,

    timetoken: String<MAX_TIMETOKEN_LEN>,
    messages: Span,
    channels: Span,

    /// Set when an operation ends, taken by the registry to notify.
    completion: Option<(OperationKind, Outcome)>,
}

fn value(text: &str) -> Result<Value, Error> {
    Value::try_from(text).map_err(|_| Error::ValueTooLong)
}

/// Origins and raw paths are copied into the request unencoded, so they must
/// be visible ASCII: no spaces, control characters or line breaks.
fn verbatim(text: &str) -> Result<&str, Error> {
    if text.bytes().all(|b| b.is_ascii_graphic()) {
        Ok(text)
    } else {
        Err(Error::InvalidValue)
    }
}

fn transport<E: Into<crate::network::Error>>(error: E) -> crate::network::Error {
    error.into()
}

fn parse_failure(error: ParseError) -> Outcome {
    match error {
        ParseError::MalformedStatus | ParseError::MalformedHeader | ParseError::MalformedChunk => {
            Outcome::FormatError
        }
        ParseError::BodyTooLarge => Outcome::RxBufferNotEmpty,
        ParseError::UnexpectedEnd => Outcome::IoError,
    }
}

impl<C: Connection, const TX: usize, const RX: usize> Context<C, TX, RX> {
    /// Creates an idle context.
    ///
    /// Fails with [`Error::ValueTooLong`] if a key or the origin is longer
    /// than [`MAX_VALUE_LEN`](super::MAX_VALUE_LEN).
    pub fn new(config: &Config<'_>) -> Result<Self, Error> {
        let mut timetoken = String::new();
        let _ = timetoken.push('0');
        Ok(Self {
            slot: 0,
            state: State::Idle,
            kind: None,
            result: Outcome::Ok,
            http_code: 0,
            publish_key: value(config.publish_key)?,
            subscribe_key: value(config.subscribe_key)?,
            origin: value(verbatim(config.origin)?)?,
            port: config.port,
            address: config.address,
            resolved: None,
            auth: None,
            uuid: None,
            timeout: config.timeout,
            missed_messages_ok: config.missed_messages_ok,
            deadline: None,
            connection: None,
            tx: Buffer::new(),
            sent: 0,
            rx: Buffer::new(),
            parser: ResponseParser::new(),
            timetoken,
            messages: Span::default(),
            channels: Span::default(),
            completion: None,
        })
    }

    pub(crate) fn with_slot(mut self, slot: usize) -> Self {
        self.slot = slot;
        self
    }

    /// The last finished operation, if it was not reported yet.
    pub(crate) fn take_completion(&mut self) -> Option<(OperationKind, Outcome)> {
        self.completion.take()
    }

    /// Index of this context in its registry.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// The exact state of the state machine.
    pub fn state(&self) -> State {
        self.state
    }

    /// Idle, in progress or finished.
    pub fn status(&self) -> Status {
        match self.state {
            State::Idle => Status::Idle,
            State::Finished(outcome) => Status::Finished(outcome),
            _ => Status::InProgress,
        }
    }

    /// Returns `true` while an operation is in flight.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// The kind of the current or last operation.
    pub fn operation(&self) -> Option<OperationKind> {
        self.kind
    }

    /// Result of the last operation, or [`Outcome::Started`] while one is in
    /// flight.
    ///
    /// A context that never ran an operation reports [`Outcome::Ok`].
    pub fn last_result(&self) -> Outcome {
        if self.is_active() {
            Outcome::Started
        } else {
            self.result
        }
    }

    /// HTTP status of the last response, or `0` if none was received.
    pub fn last_http_code(&self) -> u16 {
        self.http_code
    }

    /// The time-token the next subscribe will send.
    pub fn timetoken(&self) -> &str {
        &self.timetoken
    }

    /// The configured origin host.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The configured auth key.
    pub fn auth(&self) -> Option<&str> {
        self.auth.as_deref()
    }

    /// The configured device UUID.
    pub fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    /// Sets or clears the auth key sent with subsequent operations.
    pub fn set_auth(&mut self, auth: Option<&str>) -> Result<(), Error> {
        self.ensure_idle()?;
        self.auth = auth.map(value).transpose()?;
        Ok(())
    }

    /// Sets or clears the device UUID sent with subsequent operations.
    pub fn set_uuid(&mut self, uuid: Option<&str>) -> Result<(), Error> {
        self.ensure_idle()?;
        self.uuid = uuid.map(value).transpose()?;
        Ok(())
    }

    /// Changes the origin host. Forgets any address resolved for the old one.
    pub fn set_origin(&mut self, origin: &str) -> Result<(), Error> {
        self.ensure_idle()?;
        self.origin = value(verbatim(origin)?)?;
        self.resolved = None;
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), Error> {
        if self.is_active() {
            Err(Error::InProgress)
        } else {
            Ok(())
        }
    }

    /// Starts publishing `message` to `channel`.
    ///
    /// `message` is sent as is and should be valid JSON, e.g. `"\"hello\""`
    /// for a string.
    pub fn publish(&mut self, channel: &str, message: &str) -> Result<(), Error> {
        self.start(Request::Publish { channel, message })
    }

    /// Starts a subscribe long-poll on `channel` (a comma separated list is
    /// accepted) from the stored time-token.
    ///
    /// Refused with [`Error::RxBufferNotEmpty`] while messages of the
    /// previous reply are unread.
    pub fn subscribe(&mut self, channel: &str) -> Result<(), Error> {
        self.start(Request::Subscribe { channel })
    }

    /// Starts leaving `channel`. The next subscribe starts from "now".
    pub fn leave(&mut self, channel: &str) -> Result<(), Error> {
        self.start(Request::Leave { channel })
    }

    /// Starts fetching the server time-token.
    pub fn time(&mut self) -> Result<(), Error> {
        self.start(Request::Time)
    }

    /// Starts a `GET` of `path`, sent verbatim. Any 2xx response is accepted.
    ///
    /// `path` must already be percent-encoded; anything but visible ASCII is
    /// refused with [`Error::InvalidValue`].
    pub fn get(&mut self, path: &str) -> Result<(), Error> {
        self.start(Request::Get {
            path: verbatim(path)?,
        })
    }

    fn start(&mut self, request: Request<'_>) -> Result<(), Error> {
        self.ensure_idle()?;
        let kind = request.kind();
        if kind == OperationKind::Subscribe && !self.messages.is_empty() {
            return Err(Error::RxBufferNotEmpty);
        }

        let identity = Identity {
            publish_key: &self.publish_key,
            subscribe_key: &self.subscribe_key,
            origin: &self.origin,
            uuid: self.uuid.as_deref(),
            auth: self.auth.as_deref(),
            timetoken: &self.timetoken,
        };
        if request.write(&identity, &mut self.tx).is_err() {
            self.tx.reset();
            warn!("context {}: {:?} request exceeds {} bytes", self.slot, kind, TX);
            return Err(Error::TxBufferTooSmall);
        }
        if kind == OperationKind::Leave {
            self.reset_timetoken();
        }

        self.kind = Some(kind);
        self.result = Outcome::Started;
        self.http_code = 0;
        self.deadline = None;
        self.sent = 0;
        self.rx.reset();
        self.parser.reset();
        self.messages = Span::default();
        self.channels = Span::default();

        let next = if self.address.or(self.resolved).is_some() {
            State::Connecting
        } else {
            State::Resolving
        };
        debug!("context {}: {:?} started", self.slot, kind);
        self.enter(next);
        Ok(())
    }

    /// Aborts the operation in flight.
    ///
    /// Closes the connection and discards the partial response. Returns
    /// `false`, changing nothing, if no operation is in flight.
    ///
    /// Inside a [`Registry`](super::Registry) the cancellation is reported
    /// on the next poll.
    pub fn cancel(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.finish(Outcome::Cancelled);
        true
    }

    /// Returns a finished context to [`State::Idle`].
    ///
    /// The result, status code and response body stay readable.
    pub fn acknowledge(&mut self) {
        if let State::Finished(_) = self.state {
            self.enter(State::Idle);
        }
    }

    /// The body of the last response.
    ///
    /// Empty while an operation is in flight.
    pub fn body(&self) -> &[u8] {
        if self.is_active() {
            &[]
        } else {
            self.rx.as_slice()
        }
    }

    /// Moves up to `out.len()` bytes of the last response body into `out`.
    ///
    /// Returns the number of bytes copied. Reading the body invalidates the
    /// message and channel iterators.
    pub fn read_body(&mut self, out: &mut [u8]) -> usize {
        if self.is_active() {
            return 0;
        }
        let count = out.len().min(self.rx.len());
        out[..count].copy_from_slice(&self.rx.as_slice()[..count]);
        self.rx.consume(count);
        self.messages = Span::default();
        self.channels = Span::default();
        count
    }

    /// Returns `true` while messages of the last subscribe reply are unread.
    pub fn has_unread_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    /// The next unread message of the last subscribe reply, as JSON text.
    pub fn next_message(&mut self) -> Option<&str> {
        let item = reply::next_item(self.rx.as_slice(), &mut self.messages)?;
        core::str::from_utf8(&self.rx.as_slice()[item.start..item.end]).ok()
    }

    /// The channel the next unread channel entry of the last subscribe reply
    /// names.
    ///
    /// Only replies to multi-channel subscribes carry a channel list; the
    /// n-th channel belongs to the n-th message.
    pub fn next_channel(&mut self) -> Option<&str> {
        let item = reply::next_item(self.rx.as_slice(), &mut self.channels)?;
        core::str::from_utf8(&self.rx.as_slice()[item.start..item.end]).ok()
    }

    /// Advances the operation in flight by one step.
    ///
    /// Performs at most one state transition and at most one transport call.
    /// Returns the outcome if this call ended the operation; returns `None`
    /// when the operation is still running, when the transport reported
    /// [`WouldBlock`](crate::network::Error::WouldBlock), or when nothing is
    /// in flight.
    ///
    /// The deadline is armed on the first call after the operation started
    /// and checked before any I/O.
    ///
    /// For a context owned by a [`Registry`](super::Registry), an operation
    /// ended here is reported to the observer on the next
    /// [`Registry::poll`](super::Registry::poll).
    pub fn advance<K, R>(&mut self, connector: &mut K, resolver: &mut R, now: Instant) -> Option<Outcome>
    where
        K: Connect<Connection = C>,
        R: Resolve,
    {
        if !self.is_active() {
            return None;
        }
        match self.deadline {
            None => self.deadline = Some(now.after(self.timeout)),
            Some(deadline) if now >= deadline => {
                warn!("context {}: deadline passed in {:?}", self.slot, self.state);
                return Some(self.finish(Outcome::Timeout));
            }
            Some(_) => {}
        }

        let step = match self.state {
            State::Resolving => self.resolve(resolver),
            State::Connecting => self.connect(connector),
            State::TxInProgress => self.transmit(),
            State::AwaitingResponse | State::RxInProgress => self.receive(),
            State::Idle | State::Finished(_) => Ok(None),
        };
        match step {
            Ok(Some(outcome)) => Some(self.finish(outcome)),
            Ok(None) => None,
            Err(e) if e.is_would_block() => None,
            Err(e) => {
                warn!("context {}: transport error {:?} in {:?}", self.slot, e, self.state);
                Some(self.finish(Outcome::IoError))
            }
        }
    }

    fn resolve<R: Resolve>(&mut self, resolver: &mut R) -> Result<Option<Outcome>, crate::network::Error> {
        let address = resolver.resolve(&self.origin).map_err(transport)?;
        self.resolved = Some(address);
        self.enter(State::Connecting);
        Ok(None)
    }

    fn connect<K>(&mut self, connector: &mut K) -> Result<Option<Outcome>, crate::network::Error>
    where
        K: Connect<Connection = C>,
    {
        if let Some(connection) = self.connection.as_mut() {
            connection.poll_connect().map_err(transport)?;
            self.enter(State::TxInProgress);
            return Ok(None);
        }
        let address = self
            .address
            .or(self.resolved)
            .ok_or(crate::network::Error::ResolveFailed)?;
        let connection = connector
            .connect(SocketAddr::new(address, self.port))
            .map_err(transport)?;
        trace!("context {}: connecting to port {}", self.slot, self.port);
        self.connection = Some(connection);
        Ok(None)
    }

    fn transmit(&mut self) -> Result<Option<Outcome>, crate::network::Error> {
        let connection = self
            .connection
            .as_mut()
            .ok_or(crate::network::Error::NotOpen)?;
        if self.sent < self.tx.len() {
            let written = connection
                .write(&self.tx.as_slice()[self.sent..])
                .map_err(transport)?;
            self.sent = (self.sent + written).min(self.tx.len());
            trace!("context {}: sent {}/{}", self.slot, self.sent, self.tx.len());
        } else {
            connection.flush().map_err(transport)?;
            self.enter(State::AwaitingResponse);
        }
        Ok(None)
    }

    fn receive(&mut self) -> Result<Option<Outcome>, crate::network::Error> {
        if self.parser.is_complete() {
            return Ok(Some(self.classify()));
        }
        let connection = self
            .connection
            .as_mut()
            .ok_or(crate::network::Error::NotOpen)?;
        let mut chunk = [0u8; READ_CHUNK];
        let received = connection.read(&mut chunk).map_err(transport)?;

        if received == 0 {
            trace!("context {}: end of stream", self.slot);
            let outcome = match self.parser.finish() {
                Ok(()) => self.classify(),
                Err(e) => parse_failure(e),
            };
            return Ok(Some(outcome));
        }
        let fed = self.parser.feed(&chunk[..received], &mut self.rx);
        // Kept even when the body fails to frame.
        self.http_code = self.parser.status();
        if let Err(e) = fed {
            warn!("context {}: bad response {:?}", self.slot, e);
            return Ok(Some(parse_failure(e)));
        }
        if self.state == State::AwaitingResponse {
            self.enter(State::RxInProgress);
        }
        Ok(None)
    }

    /// Turns a complete HTTP response into the operation's outcome.
    fn classify(&mut self) -> Outcome {
        if !(200..300).contains(&self.http_code) {
            return Outcome::HttpError;
        }
        let verdict = match self.kind {
            Some(OperationKind::Publish) => reply::publish(self.rx.as_slice()),
            Some(OperationKind::Leave) => reply::leave(self.rx.as_slice()),
            Some(OperationKind::Time) => reply::time(self.rx.as_slice()).map(|_| ()),
            Some(OperationKind::Subscribe) => match reply::subscribe(self.rx.as_slice()) {
                Ok(found) => self.accept_subscription(found),
                Err(outcome) => Err(outcome),
            },
            Some(OperationKind::Get) | None => Ok(()),
        };
        verdict.err().unwrap_or(Outcome::Ok)
    }

    fn accept_subscription(&mut self, found: Subscription) -> Result<(), Outcome> {
        let token = &self.rx.as_slice()[found.timetoken.start..found.timetoken.end];
        let token = core::str::from_utf8(token).map_err(|_| Outcome::FormatError)?;
        self.timetoken = String::try_from(token).map_err(|_| Outcome::FormatError)?;
        self.messages = found.messages;
        self.channels = found.channels.unwrap_or_default();
        Ok(())
    }

    /// Ends the operation: releases the connection and applies the
    /// time-token policy.
    fn finish(&mut self, outcome: Outcome) -> Outcome {
        if let Some(connection) = self.connection.take() {
            if connection.close().is_err() {
                warn!("context {}: close failed", self.slot);
            }
        }
        if matches!(outcome, Outcome::Cancelled | Outcome::Timeout) {
            self.rx.reset();
        }
        if outcome != Outcome::Ok {
            self.messages = Span::default();
            self.channels = Span::default();
        }
        if self.kind == Some(OperationKind::Subscribe)
            && (outcome == Outcome::FormatError || (self.missed_messages_ok && outcome != Outcome::Ok))
        {
            self.reset_timetoken();
        }

        self.deadline = None;
        self.result = outcome;
        self.completion = self.kind.map(|kind| (kind, outcome));
        debug!(
            "context {}: {:?} finished with {:?}, http {}",
            self.slot, self.kind, outcome, self.http_code
        );
        self.enter(State::Finished(outcome));
        outcome
    }

    fn reset_timetoken(&mut self) {
        self.timetoken.clear();
        // Cannot fail, the capacity is far above one byte.
        let _ = self.timetoken.push('0');
    }

    fn enter(&mut self, next: State) {
        trace!("context {}: {:?} -> {:?}", self.slot, self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Error as NetError;

    /// A connection that is never opened by these tests.
    #[derive(Debug)]
    struct Unused;

    impl Read for Unused {
        type Error = NetError;
        fn read(&mut self, _buf: &mut [u8]) -> Result<usize, NetError> {
            Err(NetError::NotOpen)
        }
    }

    impl Write for Unused {
        type Error = NetError;
        fn write(&mut self, _buf: &[u8]) -> Result<usize, NetError> {
            Err(NetError::NotOpen)
        }
        fn flush(&mut self) -> Result<(), NetError> {
            Err(NetError::NotOpen)
        }
    }

    impl Close for Unused {
        type Error = NetError;
        fn close(self) -> Result<(), NetError> {
            Ok(())
        }
    }

    impl Connection for Unused {
        fn poll_connect(&mut self) -> Result<(), NetError> {
            Err(NetError::NotOpen)
        }
    }

    type Small = Context<Unused, 256, 128>;

    #[test]
    fn test_new_context_is_idle() {
        let ctx = Small::new(&Config::new("demo", "demo")).unwrap();
        assert_eq!(ctx.status(), Status::Idle);
        assert_eq!(ctx.timetoken(), "0");
        assert_eq!(ctx.origin(), "pubsub.pubnub.com");
        assert_eq!(ctx.last_http_code(), 0);
        assert!(ctx.body().is_empty());
    }

    #[test]
    fn test_values_too_long() {
        let long = "k".repeat(MAX_VALUE_LEN + 1);
        assert_eq!(
            Small::new(&Config::new(&long, "demo")).err(),
            Some(Error::ValueTooLong)
        );

        let mut ctx = Small::new(&Config::new("demo", "demo")).unwrap();
        assert_eq!(ctx.set_auth(Some(&long)), Err(Error::ValueTooLong));
        assert_eq!(ctx.set_uuid(Some("device-7")), Ok(()));
        assert_eq!(ctx.uuid(), Some("device-7"));
        assert_eq!(ctx.set_uuid(None), Ok(()));
        assert_eq!(ctx.uuid(), None);
    }

    #[test]
    fn test_start_while_in_flight() {
        let mut ctx = Small::new(&Config::new("demo", "demo")).unwrap();
        ctx.time().unwrap();
        assert_eq!(ctx.state(), State::Resolving);
        assert_eq!(ctx.last_result(), Outcome::Started);

        assert_eq!(ctx.publish("room1", "1"), Err(Error::InProgress));
        assert_eq!(ctx.set_origin("example.com"), Err(Error::InProgress));
        assert_eq!(ctx.operation(), Some(OperationKind::Time));
        assert_eq!(ctx.state(), State::Resolving);
    }

    #[test]
    fn test_tx_buffer_too_small_changes_nothing() {
        let mut ctx = Small::new(&Config::new("demo", "demo")).unwrap();
        let message = "x".repeat(200);
        assert_eq!(ctx.publish("room1", &message), Err(Error::TxBufferTooSmall));
        assert_eq!(ctx.state(), State::Idle);
        assert_eq!(ctx.operation(), None);
        assert_eq!(Error::TxBufferTooSmall.outcome(), Some(Outcome::TxBufferTooSmall));
    }

    #[test]
    fn test_cancel_and_acknowledge() {
        let mut ctx = Small::new(&Config::new("demo", "demo")).unwrap();
        assert!(!ctx.cancel());
        assert_eq!(ctx.status(), Status::Idle);

        ctx.leave("room1").unwrap();
        assert!(ctx.cancel());
        assert_eq!(ctx.status(), Status::Finished(Outcome::Cancelled));
        assert!(!ctx.cancel());
        assert_eq!(ctx.last_result(), Outcome::Cancelled);

        ctx.acknowledge();
        assert_eq!(ctx.state(), State::Idle);
        assert_eq!(ctx.last_result(), Outcome::Cancelled);
    }

    #[test]
    fn test_header_injection_is_refused() {
        let config = Config {
            origin: "pubsub.pubnub.com\r\nX-Evil: 1",
            ..Config::new("demo", "demo")
        };
        assert_eq!(Small::new(&config).err(), Some(Error::InvalidValue));

        let mut ctx = Small::new(&Config::new("demo", "demo")).unwrap();
        assert_eq!(ctx.set_origin("ps.pndsn.com X"), Err(Error::InvalidValue));
        assert_eq!(ctx.origin(), "pubsub.pubnub.com");
        assert_eq!(ctx.set_origin("ps.pndsn.com"), Ok(()));

        assert_eq!(
            ctx.get("/time/0 HTTP/1.1\r\nX-Injected: 1\r\n\r\nGET /x"),
            Err(Error::InvalidValue)
        );
        assert_eq!(ctx.get("/caf\u{e9}"), Err(Error::InvalidValue));
        assert_eq!(ctx.state(), State::Idle);
        assert_eq!(ctx.operation(), None);
        assert_eq!(Error::InvalidValue.outcome(), None);
    }

    #[test]
    fn test_configured_address_skips_resolving() {
        let config = Config {
            address: Some(IpAddr::from([127, 0, 0, 1])),
            ..Config::new("demo", "demo")
        };
        let mut ctx = Small::new(&config).unwrap();
        ctx.get("/time/0").unwrap();
        assert_eq!(ctx.state(), State::Connecting);
    }
}
