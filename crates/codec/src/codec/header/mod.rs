//! HTTP header processing for request decoding
//!
//! # Components
//!
//! - [`HeaderDecoder`]: Decodes the header block of a request
//!   - Accepts LF and CRLF line endings, mixed freely
//!   - Keeps field order, casing and duplicates
//!   - Resolves the body framing mode
//!
//! - [`HeaderBlock`]: Collects `name: value` lines up to the empty line
//!   - Shared with chunked trailers
//!   - Enforces header size and count limits
//!   - Joins obsolete folded lines

mod header_block;
mod header_decoder;

pub(crate) use header_block::HeaderBlock;
pub(crate) use header_decoder::HeaderDecoder;
