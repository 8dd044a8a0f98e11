//! An incremental HTTP/1.x request decoder
//!
//! This crate turns an arbitrarily fragmented byte stream into an ordered sequence of
//! request heads and body fragments. The same sequence comes out whether the bytes arrive
//! one at a time or all at once, which makes the decoder safe to feed straight from a
//! socket read loop.
//!
//! # Features
//!
//! - Resumable parsing: state is saved between calls, nothing ever blocks
//! - LF and CRLF line endings, mixed per line
//! - Content-Length and chunked bodies, with exact byte accounting
//! - Pipelined requests decoded back to back by one decoder
//! - Ordered header fields with duplicates kept
//! - Distinct, sticky error kinds for every framing failure
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use micro_http_codec::codec::RequestDecoder;
//! use micro_http_codec::protocol::{FramingMode, Message};
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::new();
//! let mut messages = Vec::new();
//!
//! // bytes arrive in arbitrary fragments
//! for fragment in ["POST /submit HT", "TP/1.1\r\nContent-Len", "gth: 5\r\n\r\nhel", "lo"] {
//!     buffer.extend_from_slice(fragment.as_bytes());
//!     while let Some(message) = decoder.decode(&mut buffer).unwrap() {
//!         messages.push(message);
//!     }
//! }
//! assert_eq!(decoder.decode_eof(&mut buffer).unwrap(), None);
//!
//! let Message::Header(head, framing) = &messages[0] else { panic!("expected a request head") };
//! assert_eq!(head.target(), "/submit");
//! assert_eq!(framing, &FramingMode::FixedLength(5));
//!
//! let body: Vec<u8> = messages[1..]
//!     .iter()
//!     .filter_map(|message| match message {
//!         Message::Payload(fragment) => Some(fragment.bytes().to_vec()),
//!         Message::Header(..) => None,
//!     })
//!     .flatten()
//!     .collect();
//! assert_eq!(body, b"hello");
//! ```
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - [`codec`]: the [`codec::RequestDecoder`] state machine and its sub-parsers
//! - [`protocol`]: the values it produces and its error types
//!
//! ## Driving the decoder
//!
//! [`codec::RequestDecoder`] implements `tokio_util::codec::Decoder`. The caller owns the
//! `BytesMut` buffer, appends bytes as they arrive and calls `decode` until it returns
//! `Ok(None)`. When the stream ends, `decode_eof` flushes what is left and reports a
//! truncated request. Wrapped in `tokio_util::codec::FramedRead` it decodes straight from
//! any `AsyncRead`.
//!
//! ## Error Handling
//!
//! - [`protocol::ParseError`]: every decoding failure, with a reason
//! - [`protocol::ErrorKind`]: the failure kind the decoder keeps once failed
//!
//! Errors are not recoverable: HTTP/1.x framing cannot be resynchronized, so the owner of
//! the connection should answer and close.
//!
//! # Limitations
//!
//! - Requests only, HTTP/1.0 and HTTP/1.1
//! - Default maximum request line: 4KB
//! - Default maximum header size: 8KB
//! - Default maximum number of headers: 64

pub mod codec;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
