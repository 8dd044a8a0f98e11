use bytes::Bytes;

use crate::protocol::{HeaderList, RequestHead};

/// One object produced by the request decoder.
///
/// Each decoded request yields exactly one [`Message::Header`] followed by its
/// [`Message::Payload`] fragments, the last of which has [`ContentFragment::is_last`] set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The request head and the framing mode resolved from its headers
    Header(RequestHead, FramingMode),
    /// A fragment of the request body
    Payload(ContentFragment),
}

impl Message {
    /// Returns true if this message contains payload data
    #[inline]
    pub fn is_payload(&self) -> bool {
        matches!(self, Message::Payload(_))
    }

    /// Returns true if this message contains header information
    #[inline]
    pub fn is_header(&self) -> bool {
        matches!(self, Message::Header(..))
    }

    /// Converts the message into a `ContentFragment` if it contains payload data
    ///
    /// Returns None if the message contains header information
    pub fn into_payload(self) -> Option<ContentFragment> {
        match self {
            Message::Header(..) => None,
            Message::Payload(fragment) => Some(fragment),
        }
    }

    /// Converts the message into its head and framing mode if it contains header information
    pub fn into_header(self) -> Option<(RequestHead, FramingMode)> {
        match self {
            Message::Header(head, framing) => Some((head, framing)),
            Message::Payload(_) => None,
        }
    }
}

/// A span of body bytes.
///
/// Every message body ends with exactly one fragment whose `is_last` flag is set; it may
/// carry data (the tail of a fixed-length body) or be empty (end of a chunked body, or a
/// message without body). For chunked bodies the final fragment also carries the trailer
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFragment {
    data: Bytes,
    last: bool,
    trailers: HeaderList,
}

impl ContentFragment {
    pub fn new(data: Bytes, last: bool) -> Self {
        Self { data, last, trailers: HeaderList::new() }
    }

    /// Creates the empty final fragment.
    pub fn eof() -> Self {
        Self::new(Bytes::new(), true)
    }

    /// Creates the empty final fragment of a chunked body.
    pub fn eof_with_trailers(trailers: HeaderList) -> Self {
        Self { data: Bytes::new(), last: true, trailers }
    }

    /// Returns true if this fragment ends the message body
    #[inline]
    pub fn is_last(&self) -> bool {
        self.last
    }

    #[inline]
    pub fn bytes(&self) -> &Bytes {
        &self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Trailer fields sent after the last chunk; empty for every other fragment.
    pub fn trailers(&self) -> &HeaderList {
        &self.trailers
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

/// How the body of a request is delimited.
///
/// Resolved once from the request headers and fixed for the rest of the message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FramingMode {
    /// Body with a known length in bytes
    FixedLength(u64),
    /// Body using chunked transfer encoding
    Chunked,
    /// No body
    NoContent,
}

impl FramingMode {
    /// Returns true if the body uses chunked transfer encoding
    #[inline]
    pub fn is_chunked(&self) -> bool {
        matches!(self, FramingMode::Chunked)
    }

    /// Returns true if the message carries no body
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, FramingMode::NoContent)
    }
}
