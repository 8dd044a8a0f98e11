//! Decoder implementation for HTTP messages with Content-Length header.
//!
//! This module provides functionality to decode HTTP messages where the payload size
//! is specified by the Content-Length header, as defined in
//! [RFC 9112 Section 6.2](https://www.rfc-editor.org/rfc/rfc9112.html#section-6.2).

use crate::codec::DecoderConfig;
use crate::protocol::{ContentFragment, ParseError};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// A decoder for handling HTTP messages with a known content length.
///
/// The decoder tracks the remaining bytes to be read and never takes more than that,
/// so bytes of a pipelined request stay in the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// The number of bytes remaining to be read from the payload
    length: u64,
    config: DecoderConfig,
}

impl LengthDecoder {
    /// Creates a new `LengthDecoder` instance.
    ///
    /// # Arguments
    /// * `length` - The total content length to decode, specified by Content-Length header
    pub fn new(length: u64, config: DecoderConfig) -> Self {
        Self { length, config }
    }

    /// Bytes still owed by the body.
    pub fn remaining(&self) -> u64 {
        self.length
    }
}

impl Decoder for LengthDecoder {
    type Item = ContentFragment;
    type Error = ParseError;

    /// Decodes bytes from the input buffer according to the content length.
    ///
    /// # Returns
    /// * `Ok(Some(fragment))` with up to the remaining bytes; `is_last` is set on the
    ///   fragment that brings the remaining count to zero, and a zero-length body yields
    ///   one empty final fragment
    /// * `Ok(None)` when more data is needed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.length == 0 {
            return Ok(Some(ContentFragment::eof()));
        }

        if src.is_empty() {
            return Ok(None);
        }

        // Read the minimum of remaining length and available bytes
        let len = self.config.fragment_len(self.length, src.len());
        let bytes = src.split_to(len).freeze();

        self.length -= bytes.len() as u64;
        Ok(Some(ContentFragment::new(bytes, self.length == 0)))
    }
}
