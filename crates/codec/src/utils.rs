//! Utility macros and functions for the codec crate.
//!
//! This module provides helper macros and functions that are used internally
//! by the decoder implementation.

/// A macro for early returns with an error if a condition is not met.
///
/// This is similar to the `assert!` macro, but returns an error instead of panicking.
/// It's useful for limit checks where the decoder must stop with a specific error
/// if some condition is not satisfied.
///
/// # Arguments
///
/// * `$predicate` - A boolean expression that should evaluate to true
/// * `$error` - The error value to return if the predicate is false
///
/// # Example
///
/// ```ignore
/// ensure!(headers.len() < max_header_count, ParseError::too_many_headers(max_header_count));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

/// Decodes raw header bytes as single-byte-per-character text (ISO-8859-1).
///
/// Every byte maps to the char with the same code point, so the conversion never fails
/// and never reinterprets multi-byte sequences.
pub(crate) fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
