//! Low-level scanning over a JSON byte buffer.
//!
//! [`DecodeContext`] is an exclusively-owned cursor over the input: the
//! current read position and the buffer's end. Every primitive either
//! advances the position or returns a [`DecodeError`] carrying the offset at
//! which the problem was detected; combinators check each result explicitly,
//! so no failure state needs to be latched on the cursor itself.
//!
//! The cursor walks the buffer without backtracking or copying. String
//! bodies and number tokens are handed out as raw sub-slices of the input;
//! interpreting them (unescaping, numeric parsing) is the nested codec's
//! job.

use crate::{
    codec::Codec,
    error::{DecodeError, DecodeErrorKind},
};

/// Cursor over the JSON input of one decode call.
///
/// Created per decode call and discarded after; the position only moves
/// forward and never exceeds the buffer's end.
#[derive(Debug)]
pub struct DecodeContext<'buf> {
    input: &'buf [u8],
    pos: usize,
}

impl<'buf> DecodeContext<'buf> {
    /// Creates a cursor positioned at the start of `input`.
    #[must_use]
    pub fn new(input: &'buf [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the next unread byte.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Whether the whole input has been consumed.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos == self.input.len()
    }

    /// Builds an error at the current offset.
    #[must_use]
    pub fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError {
            kind,
            offset: self.pos,
        }
    }

    /// Builds an error pointing `back` bytes before the current offset, at
    /// the start of an already consumed offending token.
    #[must_use]
    pub fn error_back(&self, kind: DecodeErrorKind, back: usize) -> DecodeError {
        DecodeError {
            kind,
            offset: self.pos.saturating_sub(back),
        }
    }

    /// Returns the current byte without advancing, or `0` at end of input.
    #[must_use]
    pub fn peek(&self) -> u8 {
        self.input.get(self.pos).copied().unwrap_or(0)
    }

    /// Returns the current byte and advances past it.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::UnexpectedEndOfInput`] if no bytes remain.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<u8, DecodeError> {
        let byte = self
            .input
            .get(self.pos)
            .copied()
            .ok_or_else(|| self.error(DecodeErrorKind::UnexpectedEndOfInput))?;
        self.pos += 1;
        Ok(byte)
    }

    /// Checks that at least `n` bytes remain without advancing.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::UnexpectedEndOfInput`] if fewer than `n` remain.
    pub fn require(&self, n: usize) -> Result<(), DecodeError> {
        if self.remaining() < n {
            return Err(self.error(DecodeErrorKind::UnexpectedEndOfInput));
        }
        Ok(())
    }

    /// Advances past one specific byte.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::UnexpectedInput`] pointing at the mismatched byte,
    /// or end-of-input if nothing remains.
    pub fn advance_past(&mut self, expected: u8) -> Result<(), DecodeError> {
        if self.next()? != expected {
            return Err(self.error_back(DecodeErrorKind::UnexpectedInput, 1));
        }
        Ok(())
    }

    /// Advances past an exact byte sequence, used for the `true` / `false` /
    /// `null` literals (callers that dispatched on the first byte match only
    /// the remaining tail, e.g. `alse`).
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::UnexpectedEndOfInput`] if the input is too short,
    /// [`DecodeErrorKind::UnexpectedInput`] on a mismatch.
    pub fn advance_past_literal(&mut self, literal: &[u8]) -> Result<(), DecodeError> {
        self.require(literal.len())?;
        if &self.input[self.pos..self.pos + literal.len()] != literal {
            return Err(self.error(DecodeErrorKind::UnexpectedInput));
        }
        self.pos += literal.len();
        Ok(())
    }

    /// Skips the four JSON whitespace bytes. Never fails.
    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), b' ' | b'\t' | b'\n' | b'\r') {
            self.pos += 1;
        }
    }

    /// Advances from an opening `"` to just past the closing `"`, validating
    /// every escape sequence on the way. Returns the raw body (between the
    /// quotes) without unescaping it; that is the string codec's job.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::UnterminatedString`] on premature end,
    /// [`DecodeErrorKind::InvalidEscapeCharacter`] on an unrecognized escape,
    /// [`DecodeErrorKind::InvalidUnicodeEscape`] on malformed `\u` digits.
    pub fn scan_string_body(&mut self) -> Result<&'buf [u8], DecodeError> {
        self.advance_past(b'"')?;
        let start = self.pos;
        loop {
            if self.at_end() {
                return Err(self.error(DecodeErrorKind::UnterminatedString));
            }
            let byte = self.input[self.pos];
            self.pos += 1;
            match byte {
                b'"' => return Ok(&self.input[start..self.pos - 1]),
                b'\\' => self.scan_escape()?,
                _ => {}
            }
        }
    }

    fn scan_escape(&mut self) -> Result<(), DecodeError> {
        if self.at_end() {
            return Err(self.error(DecodeErrorKind::UnterminatedString));
        }
        let byte = self.input[self.pos];
        self.pos += 1;
        match byte {
            b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => Ok(()),
            b'u' => {
                if self.remaining() < 4 {
                    return Err(self.error(DecodeErrorKind::InvalidUnicodeEscape));
                }
                let mut all_hex = true;
                for _ in 0..4 {
                    all_hex &= self.input[self.pos].is_ascii_hexdigit();
                    self.pos += 1;
                }
                if all_hex {
                    Ok(())
                } else {
                    Err(self.error(DecodeErrorKind::InvalidUnicodeEscape))
                }
            }
            _ => Err(self.error_back(DecodeErrorKind::InvalidEscapeCharacter, 1)),
        }
    }

    /// Consumes the maximal run of number-token bytes and returns it.
    ///
    /// The grammar check is deliberately loose; the number codec's parse of
    /// the returned token does the real validation.
    ///
    /// # Errors
    ///
    /// [`DecodeErrorKind::UnexpectedInput`] if the input does not start with
    /// `-` or a digit.
    pub fn scan_number_token(&mut self) -> Result<&'buf [u8], DecodeError> {
        let start = self.pos;
        match self.peek() {
            b'-' | b'0'..=b'9' => self.pos += 1,
            _ => return Err(self.error(DecodeErrorKind::UnexpectedInput)),
        }
        while matches!(self.peek(), b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-') {
            self.pos += 1;
        }
        Ok(&self.input[start..self.pos])
    }

    /// Drives the comma-separated entity shared by JSON arrays and objects:
    /// advances past `open`, then alternates `element` / whitespace / (`,`
    /// continue or `close` stop), and advances past `close` on exit.
    ///
    /// `element` must consume at least one byte or fail; otherwise this loop
    /// could never terminate. Every element parse in this crate begins by
    /// requiring a non-`close`, non-end byte, and forward progress is also
    /// asserted in debug builds.
    ///
    /// # Errors
    ///
    /// Whatever `element` fails with, plus [`DecodeErrorKind`] errors for
    /// missing separators or premature end of input.
    pub fn advance_past_comma_separated<F>(
        &mut self,
        open: u8,
        close: u8,
        mut element: F,
    ) -> Result<(), DecodeError>
    where
        F: FnMut(&mut Self) -> Result<(), DecodeError>,
    {
        self.advance_past(open)?;
        self.skip_whitespace();

        if self.peek() != close {
            let before = self.pos;
            element(self)?;
            debug_assert!(self.pos > before, "element must consume input");
            self.skip_whitespace();

            while self.peek() != close {
                self.advance_past(b',')?;
                self.skip_whitespace();
                let before = self.pos;
                element(self)?;
                debug_assert!(self.pos > before, "element must consume input");
                self.skip_whitespace();
            }
        }

        self.advance_past(close)
    }

    /// Drives an object scan. For each pair the key is decoded with
    /// `key_codec`, then `pair` is invoked past the `:` and is responsible
    /// for parsing and storing the value.
    ///
    /// `pair` may run zero or more times even if the overall decode
    /// ultimately fails.
    ///
    /// # Errors
    ///
    /// Whatever `key_codec` or `pair` fail with, plus structural errors from
    /// the comma-separated scan.
    pub fn advance_past_object<K, F>(&mut self, key_codec: &K, mut pair: F) -> Result<(), DecodeError>
    where
        K: Codec,
        F: FnMut(&mut Self, K::Value) -> Result<(), DecodeError>,
    {
        self.advance_past_comma_separated(b'{', b'}', |ctx| {
            let key = key_codec.decode(ctx)?;
            ctx.skip_whitespace();
            ctx.advance_past(b':')?;
            ctx.skip_whitespace();
            pair(ctx, key)
        })
    }
}
