//! HTTP body handling module for decoding request payloads
//!
//! This module consumes body bytes according to the framing mode resolved from the
//! request headers. It supports both chunked transfer encoding and content-length based
//! transfers.
//!
//! # Components
//!
//! - [`ChunkedDecoder`]: Handles chunked transfer encoded payloads
//! - [`LengthDecoder`]: Processes fixed-length payloads
//! - [`PayloadDecoder`]: Main decoder that coordinates different decoding strategies
//!
//! # Features
//!
//! - Exact byte accounting: a body never takes bytes of the next pipelined request
//! - Streaming processing of message bodies, one fragment per call
//! - Efficient memory usage through `BytesMut::split_to`
//! - Resumable at any byte boundary

mod chunked_decoder;
mod length_decoder;
mod payload_decoder;

pub use payload_decoder::PayloadDecoder;
