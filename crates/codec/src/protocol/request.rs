//! HTTP request head representation.
//!
//! [`RequestHead`] is what the decoder produces once the request line and the header block
//! are complete. It keeps the request target as raw text and the header fields in a
//! [`HeaderList`], so nothing the client sent is normalized away.

use http::uri::InvalidUri;
use http::{Method, Request, Uri, Version};

use crate::protocol::HeaderList;

/// The parsed head of one HTTP/1.x request.
///
/// Immutable once produced: the decoder emits exactly one per message, before any of the
/// message's body fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    method: Method,
    target: String,
    version: Version,
    headers: HeaderList,
}

impl RequestHead {
    pub fn new(method: Method, target: String, version: Version, headers: HeaderList) -> Self {
        Self { method, target, version, headers }
    }

    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request target exactly as sent.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the request's HTTP version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the header fields in arrival order.
    pub fn headers(&self) -> &HeaderList {
        &self.headers
    }

    /// Parses the request target as a URI.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUri`] if the target is not a valid URI reference.
    pub fn uri(&self) -> Result<Uri, InvalidUri> {
        self.target.parse()
    }

    /// Determines if the connection should stay open after this request.
    ///
    /// HTTP/1.1 connections are persistent unless a `Connection` field lists `close`;
    /// HTTP/1.0 connections are persistent only when a `Connection` field lists `keep-alive`.
    pub fn is_keep_alive(&self) -> bool {
        let has_token = |token: &str| {
            self.headers
                .get_all("connection")
                .flat_map(|value| value.split(','))
                .any(|item| item.trim().eq_ignore_ascii_case(token))
        };

        if self.version == Version::HTTP_10 { has_token("keep-alive") } else { !has_token("close") }
    }

    /// Consumes the head and returns its parts.
    pub fn into_parts(self) -> (Method, String, Version, HeaderList) {
        (self.method, self.target, self.version, self.headers)
    }

    /// Converts the head into a bodyless `http::Request`.
    ///
    /// Every header field is appended in order, so duplicates survive.
    ///
    /// # Errors
    ///
    /// Returns `http::Error` if the target, a header name or a header value is not
    /// acceptable to the `http` crate.
    pub fn into_request(self) -> Result<Request<()>, http::Error> {
        let mut builder = Request::builder().method(self.method).uri(self.target).version(self.version);

        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }

        builder.body(())
    }
}
