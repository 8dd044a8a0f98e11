//! Decoder limits.

/// Default maximum length of a request line or chunk-size line
pub const DEFAULT_MAX_INITIAL_LINE_LENGTH: usize = 4096;

/// Default maximum size in bytes of one header or trailer block
pub const DEFAULT_MAX_HEADER_SIZE: usize = 8 * 1024;

/// Default maximum number of fields in one header or trailer block
pub const DEFAULT_MAX_HEADER_COUNT: usize = 64;

/// Limits applied by [`RequestDecoder`](crate::codec::RequestDecoder).
///
/// # Example
///
/// ```
/// use micro_http_codec::codec::{DecoderConfig, RequestDecoder};
///
/// let config = DecoderConfig::default().with_max_header_count(16).with_max_fragment_size(Some(8 * 1024));
/// let decoder = RequestDecoder::with_config(config);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    max_initial_line_length: usize,
    max_header_size: usize,
    max_header_count: usize,
    max_fragment_size: Option<usize>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_initial_line_length: DEFAULT_MAX_INITIAL_LINE_LENGTH,
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            max_header_count: DEFAULT_MAX_HEADER_COUNT,
            max_fragment_size: None,
        }
    }
}

impl DecoderConfig {
    #[must_use]
    pub fn with_max_initial_line_length(mut self, max: usize) -> Self {
        self.max_initial_line_length = max;
        self
    }

    #[must_use]
    pub fn with_max_header_size(mut self, max: usize) -> Self {
        self.max_header_size = max;
        self
    }

    #[must_use]
    pub fn with_max_header_count(mut self, max: usize) -> Self {
        self.max_header_count = max;
        self
    }

    /// Caps the size of one emitted body fragment; `None` emits whatever is available.
    ///
    /// A cap of zero is treated as one byte.
    #[must_use]
    pub fn with_max_fragment_size(mut self, max: Option<usize>) -> Self {
        self.max_fragment_size = max.map(|max| max.max(1));
        self
    }

    pub fn max_initial_line_length(&self) -> usize {
        self.max_initial_line_length
    }

    pub fn max_header_size(&self) -> usize {
        self.max_header_size
    }

    pub fn max_header_count(&self) -> usize {
        self.max_header_count
    }

    pub fn max_fragment_size(&self) -> Option<usize> {
        self.max_fragment_size
    }

    /// Number of body bytes to take given what the body still owes and what is buffered.
    pub(crate) fn fragment_len(&self, remaining: u64, available: usize) -> usize {
        // cap remaining bytes at the max capacity of usize
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        let len = remaining.min(available);
        match self.max_fragment_size {
            Some(max) => len.min(max),
            None => len,
        }
    }
}
