use crate::network::application::http::RequestWriter;
use crate::network::buffer::{Buffer, BufferFull};

/// `pnsdk` query value, already percent-encoded.
const SDK_ID: &str = concat!("libpubnub%2F", env!("CARGO_PKG_VERSION"));

/// The kind of operation a context runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationKind {
    /// Publish one message to a channel.
    Publish,
    /// Long-poll for messages on one or more channels.
    Subscribe,
    /// Announce leaving one or more channels.
    Leave,
    /// Fetch the server time-token.
    Time,
    /// Raw `GET` of a caller supplied path.
    Get,
}

/// One request, borrowing its arguments from the caller.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Request<'a> {
    Publish { channel: &'a str, message: &'a str },
    Subscribe { channel: &'a str },
    Leave { channel: &'a str },
    Time,
    Get { path: &'a str },
}

/// Context values that end up in a request.
pub(crate) struct Identity<'a> {
    pub publish_key: &'a str,
    pub subscribe_key: &'a str,
    pub origin: &'a str,
    pub uuid: Option<&'a str>,
    pub auth: Option<&'a str>,
    pub timetoken: &'a str,
}

impl Request<'_> {
    pub fn kind(&self) -> OperationKind {
        match self {
            Request::Publish { .. } => OperationKind::Publish,
            Request::Subscribe { .. } => OperationKind::Subscribe,
            Request::Leave { .. } => OperationKind::Leave,
            Request::Time => OperationKind::Time,
            Request::Get { .. } => OperationKind::Get,
        }
    }

    /// Serializes the request into `tx`, replacing its contents.
    pub fn write<const N: usize>(
        &self,
        id: &Identity<'_>,
        tx: &mut Buffer<N>,
    ) -> Result<usize, BufferFull> {
        let mut req = RequestWriter::get(tx)?;
        match *self {
            Request::Publish { channel, message } => {
                req.raw_segment("publish")?
                    .segment(id.publish_key)?
                    .segment(id.subscribe_key)?
                    .raw_segment("0")?
                    .segment(channel)?
                    .raw_segment("0")?
                    .segment(message)?;
            }
            Request::Subscribe { channel } => {
                req.raw_segment("subscribe")?
                    .segment(id.subscribe_key)?
                    .segment(channel)?
                    .raw_segment("0")?
                    .raw_segment(id.timetoken)?;
            }
            Request::Leave { channel } => {
                req.path("/v2/presence/sub-key")?
                    .segment(id.subscribe_key)?
                    .raw_segment("channel")?
                    .segment(channel)?
                    .raw_segment("leave")?;
            }
            Request::Time => {
                req.path("/time/0")?;
            }
            Request::Get { path } => {
                req.path(path)?;
                return req.finish(id.origin);
            }
        }

        if let Some(uuid) = id.uuid {
            req.query("uuid", uuid)?;
        }
        if let Some(auth) = id.auth {
            req.query("auth", auth)?;
        }
        req.raw_query("pnsdk", SDK_ID)?;
        req.finish(id.origin)
    }
}
