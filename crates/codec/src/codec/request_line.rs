//! Request line parsing.
//!
//! A request line is split on runs of whitespace into method, target and version. The
//! target is kept as raw text; only the method token and the version are validated.

use http::{Method, Version};
use tracing::trace;

use crate::ensure;
use crate::protocol::ParseError;
use crate::utils::latin1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestLine {
    pub(crate) method: Method,
    pub(crate) target: String,
    pub(crate) version: Version,
}

impl RequestLine {
    /// Parses one scanned line, already stripped of its terminator.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MalformedRequestLine` if the line has fewer than three tokens,
    /// the method is not a valid token, or the version is not HTTP/1.0 or HTTP/1.1.
    pub(crate) fn parse(line: &[u8]) -> Result<Self, ParseError> {
        let (method, rest) = next_token(line);
        let (target, rest) = next_token(rest);
        let version = rest.trim_ascii();

        ensure!(
            !method.is_empty() && !target.is_empty() && !version.is_empty(),
            ParseError::malformed_request_line(format!("expected method, target and version in {:?}", latin1(line)))
        );

        let method = Method::from_bytes(method)
            .map_err(|e| ParseError::malformed_request_line(format!("invalid method {:?}: {e}", latin1(method))))?;

        let version = parse_version(version)
            .ok_or_else(|| ParseError::malformed_request_line(format!("invalid http version {:?}", latin1(version))))?;

        let request_line = Self { method, target: latin1(target), version };
        trace!(method = %request_line.method, target = %request_line.target, version = ?request_line.version, "parsed request line");
        Ok(request_line)
    }
}

/// Splits off the first whitespace-delimited token, skipping leading whitespace.
fn next_token(bytes: &[u8]) -> (&[u8], &[u8]) {
    let bytes = bytes.trim_ascii_start();
    let end = bytes.iter().position(u8::is_ascii_whitespace).unwrap_or(bytes.len());
    bytes.split_at(end)
}

fn parse_version(token: &[u8]) -> Option<Version> {
    if token.eq_ignore_ascii_case(b"HTTP/1.1") {
        Some(Version::HTTP_11)
    } else if token.eq_ignore_ascii_case(b"HTTP/1.0") {
        Some(Version::HTTP_10)
    } else {
        // HTTP/2 and HTTP/3 are not framed as text
        None
    }
}
