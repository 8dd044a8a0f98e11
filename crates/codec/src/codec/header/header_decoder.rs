//! HTTP header decoder implementation for parsing HTTP request headers
//!
//! This module turns the header block that follows a request line into a [`RequestHead`]
//! and resolves how the request body is framed.
//!
//! # Implementation Details
//!
//! The decoder works in two stages:
//!
//! 1. Collect field lines through a [`HeaderBlock`] until the empty line, across as many
//!    calls as the bytes need
//! 2. Build the [`RequestHead`] and pick the [`FramingMode`] from `Transfer-Encoding` and
//!    `Content-Length`
//!
//! Framing precedence, first match wins:
//!
//! - `Transfer-Encoding` containing `chunked`: [`FramingMode::Chunked`]
//! - `Content-Length`: [`FramingMode::FixedLength`]
//! - neither: [`FramingMode::NoContent`]; a request without framing has no body

use bytes::BytesMut;
use tracing::trace;

use crate::codec::DecoderConfig;
use crate::codec::header::header_block::HeaderBlock;
use crate::codec::request_line::RequestLine;
use crate::protocol::{FramingMode, HeaderList, ParseError, RequestHead};

/// Decoder for the header block of one request.
///
/// Created once the request line is parsed; holds the fields collected so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeaderDecoder {
    request_line: RequestLine,
    block: HeaderBlock,
}

impl HeaderDecoder {
    pub(crate) fn new(request_line: RequestLine, config: &DecoderConfig) -> Self {
        Self { request_line, block: HeaderBlock::new(config.max_header_size(), config.max_header_count()) }
    }

    /// Attempts to finish the header block from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((head, framing)))` if the header block is complete
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if a field line is malformed, a limit is exceeded or the
    ///   framing headers are invalid
    pub(crate) fn decode(&mut self, src: &mut BytesMut) -> Result<Option<(RequestHead, FramingMode)>, ParseError> {
        let Some(headers) = self.block.decode(src)? else {
            return Ok(None);
        };

        let framing = resolve_framing(&headers)?;
        trace!(header_count = headers.len(), ?framing, "parsed request header");

        let RequestLine { method, target, version } = self.request_line.clone();
        Ok(Some((RequestHead::new(method, target, version, headers), framing)))
    }
}

/// Determines how the request body is framed.
///
/// # Errors
///
/// Returns `ParseError::InvalidContentLength` if, without chunked transfer encoding, a
/// `Content-Length` value is not a plain decimal number or several values disagree.
pub(crate) fn resolve_framing(headers: &HeaderList) -> Result<FramingMode, ParseError> {
    if headers.get_all("transfer-encoding").any(is_chunked) {
        return Ok(FramingMode::Chunked);
    }

    let mut length = None;
    for value in headers.get_all("content-length") {
        let parsed = parse_content_length(value)?;
        match length {
            Some(previous) if previous != parsed => {
                return Err(ParseError::invalid_content_length(format!(
                    "conflicting values {previous} and {parsed}"
                )));
            }
            _ => length = Some(parsed),
        }
    }

    Ok(length.map_or(FramingMode::NoContent, FramingMode::FixedLength))
}

fn parse_content_length(value: &str) -> Result<u64, ParseError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::invalid_content_length(format!("value {value:?} is not a non-negative integer")));
    }

    value.parse::<u64>().map_err(|e| ParseError::invalid_content_length(format!("value {value:?}: {e}")))
}

/// Checks if a Transfer-Encoding value mentions chunked, ignoring case.
fn is_chunked(value: &str) -> bool {
    const CHUNKED: &[u8] = b"chunked";
    value.as_bytes().windows(CHUNKED.len()).any(|window| window.eq_ignore_ascii_case(CHUNKED))
}
