//! HTTP request decoder module
//!
//! This module provides functionality for decoding HTTP requests using a streaming approach.
//! It handles the request line, the header block and the payload through a state machine
//! whose state survives between calls, so input may be split at any byte.
//!
//! # Components
//!
//! - [`RequestDecoder`]: Main decoder that coordinates request line, header and payload parsing
//! - Header parsing: Uses [`HeaderDecoder`] for the header block of each request
//! - Payload handling: Uses [`PayloadDecoder`] for request bodies
//!
//! # Example
//!
//! ```
//! use micro_http_codec::codec::RequestDecoder;
//! use micro_http_codec::protocol::Message;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from("GET /p HTTP/1.1\r\nHost: h\r\nContent-Length: 3\r\n\r\nab");
//!
//! let Some(Message::Header(head, _framing)) = decoder.decode(&mut buffer).unwrap() else { panic!() };
//! assert_eq!(head.target(), "/p");
//!
//! let fragment = decoder.decode(&mut buffer).unwrap().unwrap().into_payload().unwrap();
//! assert!(!fragment.is_last());
//!
//! // the rest of the body arrives later
//! buffer.extend_from_slice(b"c");
//! let fragment = decoder.decode(&mut buffer).unwrap().unwrap().into_payload().unwrap();
//! assert!(fragment.is_last());
//! ```

use crate::codec::DecoderConfig;
use crate::codec::body::PayloadDecoder;
use crate::codec::header::HeaderDecoder;
use crate::codec::line_scanner::LineScanner;
use crate::codec::request_line::RequestLine;
use crate::protocol::{ErrorKind, Message, ParseError};
use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::{debug, trace};

/// A decoder for a stream of pipelined HTTP/1.x requests
///
/// The decoder cycles through three phases per request:
/// 1. Request line: skips blank lines, then parses method, target and version
/// 2. Header parsing: decodes the header block using [`HeaderDecoder`]
/// 3. Payload parsing: decodes the body using [`PayloadDecoder`] until the final fragment
///
/// and then starts over for the next request, keeping any bytes already buffered for it.
///
/// # State Machine
///
/// The state is exclusively owned by the decoder and persists across calls. Any error moves
/// it to a failed state that never consumes input again: every later call returns
/// [`ParseError::Failed`] with the original [`ErrorKind`].
#[derive(Debug)]
pub struct RequestDecoder {
    config: DecoderConfig,
    request_line_scanner: LineScanner,
    state: State,
}

#[derive(Debug)]
enum State {
    AwaitingRequestLine,
    AwaitingHeaders(HeaderDecoder),
    ReadingPayload(PayloadDecoder),
    Failed(ErrorKind),
}

/// Where a [`RequestDecoder`] currently is within the request stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Between requests, waiting for a request line
    AwaitingRequestLine,
    /// Request line parsed, collecting header fields
    AwaitingHeaders,
    /// Reading a `Content-Length` body with `remaining` bytes left
    ReadingFixedLengthBody { remaining: u64 },
    /// Waiting for a chunk size line, or the line break after chunk data
    ReadingChunkSize,
    /// Reading chunk data with `remaining` bytes left in the chunk
    ReadingChunkData { remaining: u64 },
    /// Reading trailer fields after the last chunk
    ReadingChunkTrailer,
    /// Decoding stopped on an error of the given kind
    Failed(ErrorKind),
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance with default limits
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a new `RequestDecoder` instance with the given limits
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            config,
            request_line_scanner: LineScanner::new(config.max_initial_line_length()),
            state: State::AwaitingRequestLine,
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Returns the current phase of the state machine
    pub fn phase(&self) -> Phase {
        match &self.state {
            State::AwaitingRequestLine => Phase::AwaitingRequestLine,
            State::AwaitingHeaders(_) => Phase::AwaitingHeaders,
            State::ReadingPayload(payload_decoder) => payload_decoder.phase(),
            State::Failed(kind) => Phase::Failed(*kind),
        }
    }

    /// Returns true once the decoder has failed; it will not consume input anymore
    pub fn is_failed(&self) -> bool {
        matches!(self.state, State::Failed(_))
    }

    fn fail(&mut self, error: ParseError) -> ParseError {
        let kind = error.kind();
        debug!(%error, ?kind, "request decoder failed");
        self.state = State::Failed(kind);
        error
    }

    fn decode_next(&mut self, src: &mut BytesMut) -> Result<Option<Message>, ParseError> {
        loop {
            match &mut self.state {
                State::Failed(kind) => return Err(ParseError::failed(*kind)),

                State::AwaitingRequestLine => {
                    let Some(line) = self
                        .request_line_scanner
                        .next_line(src)
                        .map_err(|overflow| ParseError::line_too_long(overflow.current_size, overflow.max_size))?
                    else {
                        return Ok(None);
                    };

                    // blank lines between pipelined requests are padding
                    if line.trim_ascii().is_empty() {
                        continue;
                    }

                    let request_line = RequestLine::parse(&line)?;
                    self.state = State::AwaitingHeaders(HeaderDecoder::new(request_line, &self.config));
                }

                State::AwaitingHeaders(header_decoder) => {
                    let Some((head, framing)) = header_decoder.decode(src)? else {
                        return Ok(None);
                    };

                    self.state = State::ReadingPayload(PayloadDecoder::new(framing, self.config));
                    return Ok(Some(Message::Header(head, framing)));
                }

                State::ReadingPayload(payload_decoder) => {
                    let Some(fragment) = payload_decoder.decode(src)? else {
                        return Ok(None);
                    };

                    if fragment.is_last() {
                        trace!("finished reading request, awaiting next request line");
                        self.state = State::AwaitingRequestLine;
                    }
                    return Ok(Some(Message::Payload(fragment)));
                }
            }
        }
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::with_config(DecoderConfig::default())
    }
}

impl Decoder for RequestDecoder {
    type Item = Message;
    type Error = ParseError;

    /// Attempts to decode the next object from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Message::Header(..)))`: Successfully decoded a request head
    /// - `Ok(Some(Message::Payload(_)))`: Successfully decoded a body fragment
    /// - `Ok(None)`: Need more data to proceed
    /// - `Err(_)`: Encountered a parsing error; the decoder has failed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode_next(src) {
            Err(error) if !self.is_failed() => Err(self.fail(error)),
            result => result,
        }
    }

    /// Decodes what is left once the input stream has ended
    ///
    /// Objects still producible from buffered bytes are returned first. After that the
    /// stream must stand between requests with nothing buffered; anything else is
    /// reported as [`ParseError::TruncatedStream`].
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(message) = self.decode(src)? {
            return Ok(Some(message));
        }

        match self.state {
            State::AwaitingRequestLine if src.is_empty() => Ok(None),
            _ => {
                let error = ParseError::truncated(self.phase());
                Err(self.fail(error))
            }
        }
    }
}
