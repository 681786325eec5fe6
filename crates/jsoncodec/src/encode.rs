//! The growable output buffer for one encode call.

use alloc::vec::Vec;
use core::fmt;

/// Owns the byte buffer that encoded JSON text is written into.
///
/// The one non-obvious operation is [`append_or_replace`], which lets the
/// object and array encoders emit an unconditional `,` after every element
/// and then turn the trailing separator into the closing delimiter, instead
/// of tracking "is this the first element" state in the main loop.
///
/// [`append_or_replace`]: EncodeContext::append_or_replace
#[derive(Debug, Default)]
pub struct EncodeContext {
    out: Vec<u8>,
}

impl EncodeContext {
    /// Creates an empty output buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an output buffer with `capacity` bytes preallocated.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
        }
    }

    /// Appends a single byte.
    pub fn append(&mut self, byte: u8) {
        self.out.push(byte);
    }

    /// Appends a byte slice.
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }

    /// Replaces a trailing `separator` with `terminator`, or appends
    /// `terminator` if the last byte is anything else (including an empty
    /// buffer).
    pub fn append_or_replace(&mut self, separator: u8, terminator: u8) {
        match self.out.last_mut() {
            Some(last) if *last == separator => *last = terminator,
            _ => self.out.push(terminator),
        }
    }

    /// The encoded bytes so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    /// Consumes the context, returning the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }
}

impl fmt::Write for EncodeContext {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_bytes(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_or_replace_swaps_trailing_separator() {
        let mut ctx = EncodeContext::new();
        ctx.append(b'{');
        ctx.append_bytes(b"\"a\":1,");
        ctx.append_or_replace(b',', b'}');
        assert_eq!(ctx.as_bytes(), b"{\"a\":1}");
    }

    #[test]
    fn append_or_replace_appends_when_no_separator() {
        let mut ctx = EncodeContext::new();
        ctx.append(b'{');
        ctx.append_or_replace(b',', b'}');
        assert_eq!(ctx.as_bytes(), b"{}");

        let mut empty = EncodeContext::new();
        empty.append_or_replace(b',', b']');
        assert_eq!(empty.as_bytes(), b"]");
    }

    #[test]
    fn write_str_appends_utf8() {
        use core::fmt::Write as _;

        let mut ctx = EncodeContext::new();
        write!(ctx, "{}", 485_000u64).unwrap();
        assert_eq!(ctx.into_bytes(), b"485000");
    }
}
