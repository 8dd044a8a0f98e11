//! Decoder implementation for HTTP chunked transfer encoding.
//!
//! This module provides functionality to decode HTTP messages that use chunked transfer encoding
//! as specified in [RFC 9112 Section 7.1](https://www.rfc-editor.org/rfc/rfc9112.html#section-7.1).
//!
//! The chunked encoding allows the sender to transmit message data in a series of chunks,
//! indicating the size of each chunk before its data. Size lines, the line break after
//! chunk data and trailer lines are all scanned as lines, so LF and CRLF are both accepted.

use crate::codec::DecoderConfig;
use crate::codec::header::HeaderBlock;
use crate::codec::line_scanner::LineScanner;
use crate::ensure;
use crate::protocol::{ContentFragment, ParseError};
use crate::utils::latin1;
use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;
use ChunkedState::*;

/// A decoder for handling HTTP chunked transfer encoding.
///
/// The decoder processes incoming bytes according to the chunked format:
/// - Each chunk starts with its size in hexadecimal, optionally followed by extensions
/// - Then the chunk data and a line break
/// - A zero-sized chunk starts the trailer section, ended by an empty line
///
/// Chunk data is emitted as non-final fragments; the end of the body is one empty final
/// fragment carrying the trailer fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedDecoder {
    state: ChunkedState,
    scanner: LineScanner,
    config: DecoderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChunkedState {
    /// Read the chunk size line
    Size,
    /// Read chunk data
    Data { remaining: u64 },
    /// Read the line break after chunk data
    DataEnd,
    /// Read trailer fields after the last chunk
    Trailer(HeaderBlock),
    /// Final state after the trailer section
    End,
}

impl ChunkedDecoder {
    /// Creates a new `ChunkedDecoder` instance.
    ///
    /// The decoder starts in the Size state, ready to read the size of the first chunk.
    pub fn new(config: DecoderConfig) -> Self {
        Self { state: Size, scanner: LineScanner::new(config.max_initial_line_length()), config }
    }

    /// Bytes left in the current chunk, if chunk data is being read.
    pub fn chunk_remaining(&self) -> Option<u64> {
        match self.state {
            Data { remaining } => Some(remaining),
            _ => None,
        }
    }

    /// Returns true once the last chunk has been read and trailers are expected.
    pub fn is_reading_trailer(&self) -> bool {
        matches!(self.state, Trailer(_) | End)
    }
}

impl Decoder for ChunkedDecoder {
    type Item = ContentFragment;
    type Error = ParseError;

    /// Decodes chunked transfer encoded data from the input buffer.
    ///
    /// # Returns
    /// - `Ok(Some(fragment))` with chunk data, or the empty final fragment with trailers
    /// - `Ok(None)` when more data is needed
    /// - `Err(ParseError)` if the chunked encoding is invalid
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match &mut self.state {
                Size => {
                    let Some(line) = self.scanner.next_line(src).map_err(|overflow| {
                        ParseError::invalid_chunk_size(format!(
                            "size line of {} bytes exceed the limit {}",
                            overflow.current_size, overflow.max_size
                        ))
                    })?
                    else {
                        return Ok(None);
                    };

                    let size = parse_chunk_size(&line)?;
                    trace!(size, "read chunk size");

                    self.state = if size == 0 {
                        Trailer(HeaderBlock::new(self.config.max_header_size(), self.config.max_header_count()))
                    } else {
                        Data { remaining: size }
                    };
                }

                Data { remaining } => {
                    if src.is_empty() {
                        // need more data
                        return Ok(None);
                    }

                    let len = self.config.fragment_len(*remaining, src.len());
                    let bytes = src.split_to(len).freeze();
                    *remaining -= bytes.len() as u64;

                    if *remaining == 0 {
                        self.state = DataEnd;
                    }

                    trace!(len = bytes.len(), "read chunked bytes");
                    return Ok(Some(ContentFragment::new(bytes, false)));
                }

                DataEnd => {
                    let Some(line) = self.scanner.next_line(src).map_err(|overflow| {
                        ParseError::invalid_chunk_size(format!("{} bytes after chunk data", overflow.current_size))
                    })?
                    else {
                        return Ok(None);
                    };

                    ensure!(
                        line.is_empty(),
                        ParseError::invalid_chunk_size(format!("expected line break after chunk data, got {:?}", latin1(&line)))
                    );
                    self.state = Size;
                }

                Trailer(block) => {
                    let Some(trailers) = block.decode(src)? else {
                        return Ok(None);
                    };

                    trace!(trailer_count = trailers.len(), "finished reading chunked data");
                    self.state = End;
                    return Ok(Some(ContentFragment::eof_with_trailers(trailers)));
                }

                End => return Ok(None),
            }
        }
    }
}

/// Parses the hexadecimal size at the start of a chunk size line.
///
/// Leading whitespace is skipped and the digits end at `;` (chunk extensions, ignored),
/// whitespace or a control byte.
fn parse_chunk_size(line: &[u8]) -> Result<u64, ParseError> {
    let line = line.trim_ascii_start();
    let end = line.iter().position(|b| *b == b';' || b.is_ascii_whitespace() || b.is_ascii_control()).unwrap_or(line.len());
    let digits = &line[..end];

    ensure!(!digits.is_empty(), ParseError::invalid_chunk_size(format!("no size in line {:?}", latin1(line))));

    digits
        .iter()
        .try_fold(0u64, |size, b| {
            let digit = char::from(*b).to_digit(16)?;
            size.checked_mul(16)?.checked_add(u64::from(digit))
        })
        .ok_or_else(|| ParseError::invalid_chunk_size(format!("invalid size {:?}", latin1(digits))))
}
