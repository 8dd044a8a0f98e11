//! Decoder implementation for HTTP request payloads.
//!
//! This module provides a unified decoder for handling different types of HTTP message bodies:
//! - Content-Length based payloads
//! - Chunked transfer encoding
//! - Messages with no body
//!
//! The decoder is built from the [`FramingMode`] resolved from the request headers.

use crate::codec::DecoderConfig;
use crate::codec::body::chunked_decoder::ChunkedDecoder;
use crate::codec::body::length_decoder::LengthDecoder;
use crate::codec::request_decoder::Phase;
use crate::protocol::{ContentFragment, FramingMode, ParseError};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// A unified decoder for handling HTTP message payloads.
///
/// This decoder supports three payload types:
/// - Fixed length payloads (using Content-Length)
/// - Chunked transfer encoding
/// - No body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadDecoder {
    /// The specific decoding strategy to use
    kind: Kind,
}

/// Enum representing different payload decoding strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    /// Decode payload with a fixed content length
    Length(LengthDecoder),

    /// Decode payload using chunked transfer encoding
    Chunked(ChunkedDecoder),

    /// Handle messages with no body
    NoBody,
}

impl PayloadDecoder {
    /// Creates the decoder matching a resolved framing mode.
    pub fn new(framing: FramingMode, config: DecoderConfig) -> Self {
        let kind = match framing {
            FramingMode::FixedLength(length) => Kind::Length(LengthDecoder::new(length, config)),
            FramingMode::Chunked => Kind::Chunked(ChunkedDecoder::new(config)),
            FramingMode::NoContent => Kind::NoBody,
        };
        Self { kind }
    }

    /// Reports which body phase the decoder is in.
    pub(crate) fn phase(&self) -> Phase {
        match &self.kind {
            Kind::Length(length_decoder) => Phase::ReadingFixedLengthBody { remaining: length_decoder.remaining() },
            Kind::NoBody => Phase::ReadingFixedLengthBody { remaining: 0 },
            Kind::Chunked(chunked_decoder) => match chunked_decoder.chunk_remaining() {
                Some(remaining) => Phase::ReadingChunkData { remaining },
                None if chunked_decoder.is_reading_trailer() => Phase::ReadingChunkTrailer,
                None => Phase::ReadingChunkSize,
            },
        }
    }
}

impl Decoder for PayloadDecoder {
    type Item = ContentFragment;
    type Error = ParseError;

    /// Decodes bytes from the input buffer using the appropriate strategy.
    ///
    /// # Arguments
    /// * `src` - Source buffer containing the payload data
    ///
    /// # Returns
    /// * Delegates to the specific decoder implementation, or
    /// * Returns the empty final fragment immediately for no-body messages
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match &mut self.kind {
            Kind::Length(length_decoder) => length_decoder.decode(src),
            Kind::Chunked(chunked_decoder) => chunked_decoder.decode(src),
            Kind::NoBody => Ok(Some(ContentFragment::eof())),
        }
    }
}
