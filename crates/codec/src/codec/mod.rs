//! HTTP codec module for decoding HTTP/1.x requests
//!
//! This module provides streaming request decoding. It uses a state machine that saves its
//! progress between calls, so bytes may arrive split at any boundary: one byte at a time,
//! a whole request at once, or several pipelined requests in one read.
//!
//! # Architecture
//!
//! The codec module is organized into several components, leaves first:
//!
//! - Line scanning: finds LF or CRLF terminated lines without consuming partial lines
//! - Request line parsing: splits method, target and version
//! - Header parsing via the `header` module: collects fields and resolves the framing mode
//! - Payload decoding via the `body` module: fixed-length and chunked readers
//! - [`RequestDecoder`]: drives the above and emits [`Message`](crate::protocol::Message)s
//!
//! # Example
//!
//! ```
//! use micro_http_codec::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from("GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
//!
//! let header = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert!(header.is_header());
//!
//! let body = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert!(body.into_payload().unwrap().is_last());
//! ```
//!
//! # Features
//!
//! - LF and CRLF line endings, mixed freely
//! - Chunked transfer encoding with trailers
//! - Content-Length based payload handling with exact byte accounting
//! - Pipelined requests on one decoder
//! - Configurable line, header and fragment limits

mod body;
mod config;
mod header;
mod line_scanner;
mod request_decoder;
mod request_line;

pub use config::DecoderConfig;
pub use config::{DEFAULT_MAX_HEADER_COUNT, DEFAULT_MAX_HEADER_SIZE, DEFAULT_MAX_INITIAL_LINE_LENGTH};
pub use request_decoder::Phase;
pub use request_decoder::RequestDecoder;
