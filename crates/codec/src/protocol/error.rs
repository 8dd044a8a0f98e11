use std::fmt;
use std::io;

use thiserror::Error;

use crate::codec::Phase;

/// Errors produced while decoding a request stream.
///
/// Every variant is unrecoverable for the stream: the decoder enters its failed state and
/// the connection owner is expected to answer (e.g. with a client error) and close.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed request line: {reason}")]
    MalformedRequestLine { reason: String },

    #[error("malformed header line: {reason}")]
    MalformedHeaderLine { reason: String },

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("invalid chunk size: {reason}")]
    InvalidChunkSize { reason: String },

    #[error("stream ended inside a message while {phase:?}")]
    TruncatedStream { phase: Phase },

    #[error("line too long, current: {current_size} exceed the limit {max_size}")]
    LineTooLong { current_size: usize, max_size: usize },

    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("decoder already failed: {kind}")]
    Failed { kind: ErrorKind },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_request_line<S: ToString>(str: S) -> Self {
        Self::MalformedRequestLine { reason: str.to_string() }
    }

    pub fn malformed_header_line<S: ToString>(str: S) -> Self {
        Self::MalformedHeaderLine { reason: str.to_string() }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn invalid_chunk_size<S: ToString>(str: S) -> Self {
        Self::InvalidChunkSize { reason: str.to_string() }
    }

    pub fn truncated(phase: Phase) -> Self {
        Self::TruncatedStream { phase }
    }

    pub fn line_too_long(current_size: usize, max_size: usize) -> Self {
        Self::LineTooLong { current_size, max_size }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn failed(kind: ErrorKind) -> Self {
        Self::Failed { kind }
    }

    /// Returns the failure kind, the value the decoder keeps once it has failed.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::MalformedRequestLine { .. } => ErrorKind::MalformedRequestLine,
            ParseError::MalformedHeaderLine { .. } => ErrorKind::MalformedHeaderLine,
            ParseError::InvalidContentLength { .. } => ErrorKind::InvalidContentLength,
            ParseError::InvalidChunkSize { .. } => ErrorKind::InvalidChunkSize,
            ParseError::TruncatedStream { .. } => ErrorKind::TruncatedStream,
            ParseError::LineTooLong { .. } => ErrorKind::LineTooLong,
            ParseError::TooLargeHeader { .. } => ErrorKind::TooLargeHeader,
            ParseError::TooManyHeaders { .. } => ErrorKind::TooManyHeaders,
            ParseError::Failed { kind } => *kind,
            ParseError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// The kind of a [`ParseError`], without its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedRequestLine,
    MalformedHeaderLine,
    InvalidContentLength,
    InvalidChunkSize,
    TruncatedStream,
    LineTooLong,
    TooLargeHeader,
    TooManyHeaders,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedRequestLine => "malformed request line",
            ErrorKind::MalformedHeaderLine => "malformed header line",
            ErrorKind::InvalidContentLength => "invalid content-length",
            ErrorKind::InvalidChunkSize => "invalid chunk size",
            ErrorKind::TruncatedStream => "truncated stream",
            ErrorKind::LineTooLong => "line too long",
            ErrorKind::TooLargeHeader => "header too large",
            ErrorKind::TooManyHeaders => "too many headers",
            ErrorKind::Io => "io error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
