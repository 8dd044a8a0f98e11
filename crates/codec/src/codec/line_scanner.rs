//! Resumable line scanning over a growing buffer.
//!
//! Lines end with either LF or CRLF, decided independently for every line. A line that is
//! not terminated yet stays in the buffer untouched; the scanner only remembers how far it
//! already looked so the next call does not search the same bytes again.

use bytes::{Bytes, BytesMut};

/// A line exceeded the scanner's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineOverflow {
    pub(crate) current_size: usize,
    pub(crate) max_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineScanner {
    /// Bytes at the front of the buffer already known to contain no LF
    scanned: usize,
    max_len: usize,
}

impl LineScanner {
    pub(crate) fn new(max_len: usize) -> Self {
        Self { scanned: 0, max_len }
    }

    /// Takes the next complete line off the front of `src`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(line))` with the terminator (and one trailing CR) removed
    /// - `Ok(None)` if `src` holds no complete line yet; nothing is consumed
    /// - `Err(LineOverflow)` if the line is longer than the limit
    pub(crate) fn next_line(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>, LineOverflow> {
        let start = self.scanned.min(src.len());

        let Some(offset) = src[start..].iter().position(|b| *b == b'\n') else {
            self.scanned = src.len();
            // a trailing CR may still turn out to be part of the terminator
            let pending = src.strip_suffix(b"\r").map_or(src.len(), <[u8]>::len);
            if pending > self.max_len {
                return Err(LineOverflow { current_size: pending, max_size: self.max_len });
            }
            return Ok(None);
        };

        let lf = start + offset;
        self.scanned = 0;

        let mut line = src.split_to(lf + 1);
        line.truncate(lf);
        if line.last() == Some(&b'\r') {
            line.truncate(lf - 1);
        }

        if line.len() > self.max_len {
            return Err(LineOverflow { current_size: line.len(), max_size: self.max_len });
        }

        Ok(Some(line.freeze()))
    }
}
