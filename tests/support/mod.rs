//! Scripted transport used by the integration tests.
//!
//! A [`Wire`] is shared between the test, the connector and the connection it
//! hands out, so the test can queue server bytes and inspect what the client
//! sent even after the context closed (and consumed) its connection.

#![allow(dead_code)]

use libpubnub::network::application::pubnub::{Context, Outcome};
use libpubnub::network::{Clock, Close, Connect, Connection, Error, Instant, Read, Resolve, Write};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::rc::Rc;

/// What the next `read` returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Data(Vec<u8>),
    WouldBlock,
    Eof,
    Fail(Error),
}

#[derive(Debug, Default)]
pub struct Wire {
    /// Every byte the client wrote, across connections.
    pub sent: Vec<u8>,
    pub incoming: VecDeque<Step>,
    pub connects: usize,
    pub closes: usize,
    pub flushes: usize,
    /// Handshake polls answered with `WouldBlock` before succeeding.
    pub handshake_delay: usize,
    /// Largest number of bytes accepted per write; `0` means no limit.
    pub write_limit: usize,
    /// Fail the next connect with this error.
    pub refuse: Option<Error>,
    /// Transport calls made, connect included.
    pub calls: usize,
    pub last_remote: Option<SocketAddr>,
}

pub type SharedWire = Rc<RefCell<Wire>>;

pub fn wire() -> SharedWire {
    Rc::new(RefCell::new(Wire::default()))
}

impl Wire {
    pub fn queue(&mut self, bytes: &[u8]) {
        self.incoming.push_back(Step::Data(bytes.to_vec()));
    }

    /// Queues `bytes` split into pieces of at most `size` bytes.
    pub fn queue_in_pieces(&mut self, bytes: &[u8], size: usize) {
        for piece in bytes.chunks(size.max(1)) {
            self.queue(piece);
        }
    }

    pub fn sent_text(&self) -> String {
        String::from_utf8_lossy(&self.sent).into_owned()
    }
}

#[derive(Debug)]
pub struct MockConnection {
    wire: SharedWire,
    handshake_polls: usize,
}

impl Read for MockConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut wire = self.wire.borrow_mut();
        wire.calls += 1;
        match wire.incoming.pop_front() {
            None | Some(Step::WouldBlock) => Err(Error::WouldBlock),
            Some(Step::Eof) => {
                wire.incoming.push_front(Step::Eof);
                Ok(0)
            }
            Some(Step::Fail(error)) => Err(error),
            Some(Step::Data(mut bytes)) => {
                let len = buf.len().min(bytes.len());
                buf[..len].copy_from_slice(&bytes[..len]);
                if len < bytes.len() {
                    wire.incoming.push_front(Step::Data(bytes.split_off(len)));
                }
                Ok(len)
            }
        }
    }
}

impl Write for MockConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let mut wire = self.wire.borrow_mut();
        wire.calls += 1;
        let len = match wire.write_limit {
            0 => buf.len(),
            limit => buf.len().min(limit),
        };
        wire.sent.extend_from_slice(&buf[..len]);
        Ok(len)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        let mut wire = self.wire.borrow_mut();
        wire.calls += 1;
        wire.flushes += 1;
        Ok(())
    }
}

impl Close for MockConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        self.wire.borrow_mut().closes += 1;
        Ok(())
    }
}

impl Connection for MockConnection {
    fn poll_connect(&mut self) -> Result<(), Error> {
        let mut wire = self.wire.borrow_mut();
        wire.calls += 1;
        if self.handshake_polls < wire.handshake_delay {
            self.handshake_polls += 1;
            return Err(Error::WouldBlock);
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockNetwork {
    pub wire: SharedWire,
}

impl Connect for MockNetwork {
    type Connection = MockConnection;
    type Error = Error;

    fn connect(&mut self, remote: SocketAddr) -> Result<Self::Connection, Self::Error> {
        let mut wire = self.wire.borrow_mut();
        wire.calls += 1;
        wire.last_remote = Some(remote);
        if let Some(error) = wire.refuse.take() {
            return Err(error);
        }
        wire.connects += 1;
        Ok(MockConnection {
            wire: self.wire.clone(),
            handshake_polls: 0,
        })
    }
}

/// Resolves every host to `address` after `pending` would-block answers.
#[derive(Debug)]
pub struct MockResolver {
    pub address: IpAddr,
    pub pending: usize,
    pub fail: bool,
    pub calls: usize,
}

impl Default for MockResolver {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::new(54, 246, 196, 140)),
            pending: 0,
            fail: false,
            calls: 0,
        }
    }
}

impl Resolve for MockResolver {
    type Error = Error;

    fn resolve(&mut self, _host: &str) -> Result<IpAddr, Self::Error> {
        self.calls += 1;
        if self.fail {
            return Err(Error::ResolveFailed);
        }
        if self.pending > 0 {
            self.pending -= 1;
            return Err(Error::WouldBlock);
        }
        Ok(self.address)
    }
}

/// A clock the test moves by hand.
#[derive(Debug, Default)]
pub struct ManualClock(pub Cell<u64>);

impl ManualClock {
    pub fn tick(&self, ticks: u64) {
        self.0.set(self.0.get() + ticks);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.0.get())
    }
}

/// A complete response framed with `Content-Length`.
pub fn response(status: &str, body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: text/javascript; charset=\"UTF-8\"\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    )
    .into_bytes()
}

/// The same response with a chunked body, split into `chunk`-sized chunks.
pub fn chunked_response(status: &str, body: &str, chunk: usize) -> Vec<u8> {
    let mut out = format!("HTTP/1.1 {}\r\nTransfer-Encoding: chunked\r\n\r\n", status).into_bytes();
    for piece in body.as_bytes().chunks(chunk.max(1)) {
        out.extend_from_slice(format!("{:x}\r\n", piece.len()).as_bytes());
        out.extend_from_slice(piece);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(b"0\r\n\r\n");
    out
}

/// Calls `advance` at a constant time until the operation finishes.
pub fn drive<const TX: usize, const RX: usize>(
    ctx: &mut Context<MockConnection, TX, RX>,
    network: &mut MockNetwork,
    resolver: &mut MockResolver,
) -> Outcome {
    for _ in 0..10_000 {
        if let Some(outcome) = ctx.advance(network, resolver, Instant::from_ticks(0)) {
            return outcome;
        }
    }
    panic!("operation did not finish, stuck in {:?}", ctx.state());
}
