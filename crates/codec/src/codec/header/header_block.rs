//! Field block parsing shared by request headers and chunked trailers.
//!
//! A block is a run of `name: value` lines ended by an empty line. Lines are taken one at
//! a time through a [`LineScanner`], so a block may arrive in any number of fragments;
//! fields parsed so far are kept between calls.

use std::mem;

use bytes::BytesMut;

use crate::codec::line_scanner::LineScanner;
use crate::ensure;
use crate::protocol::{HeaderList, ParseError};
use crate::utils::latin1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeaderBlock {
    headers: HeaderList,
    scanner: LineScanner,
    /// Summed length of the lines taken so far
    size: usize,
    max_size: usize,
    max_count: usize,
}

impl HeaderBlock {
    pub(crate) fn new(max_size: usize, max_count: usize) -> Self {
        Self { headers: HeaderList::new(), scanner: LineScanner::new(max_size), size: 0, max_size, max_count }
    }

    /// Consumes field lines from `src` until the terminating empty line.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(headers))` once the empty line has been consumed
    /// - `Ok(None)` if more data is needed; parsed fields are kept
    /// - `Err(ParseError)` on a malformed line or an exceeded limit
    pub(crate) fn decode(&mut self, src: &mut BytesMut) -> Result<Option<HeaderList>, ParseError> {
        loop {
            let line = match self.scanner.next_line(src) {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(None),
                Err(overflow) => {
                    return Err(ParseError::too_large_header(self.size + overflow.current_size, self.max_size));
                }
            };

            if line.is_empty() {
                return Ok(Some(mem::take(&mut self.headers)));
            }

            self.size += line.len();
            ensure!(self.size <= self.max_size, ParseError::too_large_header(self.size, self.max_size));

            if matches!(line[0], b' ' | b'\t') {
                // obsolete line folding continues the previous field
                let value = self
                    .headers
                    .last_value_mut()
                    .ok_or_else(|| ParseError::malformed_header_line("continuation line before any header field"))?;
                let continuation = latin1(line.trim_ascii());
                if !continuation.is_empty() {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(&continuation);
                }
                continue;
            }

            let (name, value) = split_field(&line)?;
            ensure!(self.headers.len() < self.max_count, ParseError::too_many_headers(self.max_count));
            self.headers.append(name, value);
        }
    }
}

/// Splits a field line on its first colon into a name and a trimmed value.
fn split_field(line: &[u8]) -> Result<(String, String), ParseError> {
    let colon = line
        .iter()
        .position(|b| *b == b':')
        .ok_or_else(|| ParseError::malformed_header_line(format!("missing colon in {:?}", latin1(line))))?;

    let name = line[..colon].trim_ascii_end();
    ensure!(!name.is_empty(), ParseError::malformed_header_line(format!("empty field name in {:?}", latin1(line))));

    let value = line[colon + 1..].trim_ascii();
    Ok((latin1(name), latin1(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ErrorKind;
    use indoc::indoc;

    fn block() -> HeaderBlock {
        HeaderBlock::new(8 * 1024, 64)
    }

    #[test]
    fn from_curl() {
        let str = indoc! {r##"
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        123"##};

        let mut buf = BytesMut::from(str);
        let headers = block().decode(&mut buf).unwrap().unwrap();

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("host"), Some("127.0.0.1:8080"));
        assert_eq!(headers.get("User-Agent"), Some("curl/7.79.1"));
        assert_eq!(headers.get("accept"), Some("*/*"));
        assert_eq!(&buf[..], b"123");
    }

    #[test]
    fn value_whitespace_trimmed_and_colons_kept() {
        let mut buf = BytesMut::from(&b"Origin:   http://localhost:8080  \r\nX-Empty:\r\n\r\n"[..]);
        let headers = block().decode(&mut buf).unwrap().unwrap();

        assert_eq!(headers.get("origin"), Some("http://localhost:8080"));
        assert_eq!(headers.get("x-empty"), Some(""));
    }

    #[test]
    fn name_trailing_whitespace_removed() {
        let mut buf = BytesMut::from(&b"Host : h\r\n\r\n"[..]);
        let headers = block().decode(&mut buf).unwrap().unwrap();

        assert_eq!(headers.iter().next(), Some(("Host", "h")));
    }

    #[test]
    fn resumes_between_lines() {
        let mut decoder = block();
        let mut buf = BytesMut::from(&b"Accept: a\r\nAcc"[..]);

        assert_eq!(decoder.decode(&mut buf).unwrap(), None);
        assert_eq!(&buf[..], b"Acc");

        buf.extend_from_slice(b"ept: b\n\r\n");
        let headers = decoder.decode(&mut buf).unwrap().unwrap();
        assert_eq!(headers.get_all("accept").collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn folded_value() {
        let mut buf = BytesMut::from(&b"X-Long: first\r\n  second\r\n\tthird\r\n\r\n"[..]);
        let headers = block().decode(&mut buf).unwrap().unwrap();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("x-long"), Some("first second third"));
    }

    #[test]
    fn folding_without_field() {
        let mut buf = BytesMut::from(&b" orphan\r\n\r\n"[..]);
        let error = block().decode(&mut buf).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedHeaderLine);
    }

    #[test]
    fn missing_colon() {
        let mut buf = BytesMut::from(&b"Host h\r\n\r\n"[..]);
        let error = block().decode(&mut buf).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedHeaderLine);
    }

    #[test]
    fn empty_name() {
        let mut buf = BytesMut::from(&b": value\r\n\r\n"[..]);
        let error = block().decode(&mut buf).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedHeaderLine);
    }

    #[test]
    fn too_many_headers() {
        let mut buf = BytesMut::from(&b"A: 1\r\nB: 2\r\nC: 3\r\n\r\n"[..]);
        let error = HeaderBlock::new(1024, 2).decode(&mut buf).unwrap_err();
        assert!(matches!(error, ParseError::TooManyHeaders { max_num: 2 }));
    }

    #[test]
    fn too_large_header() {
        let mut buf = BytesMut::from(&b"A: 0123456789\r\nB: 0123456789\r\n\r\n"[..]);
        let error = HeaderBlock::new(20, 64).decode(&mut buf).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TooLargeHeader);
    }

    #[test]
    fn too_large_unterminated_line() {
        let mut buf = BytesMut::from(vec![b'a'; 64].as_slice());
        let error = HeaderBlock::new(32, 64).decode(&mut buf).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TooLargeHeader);
    }
}
