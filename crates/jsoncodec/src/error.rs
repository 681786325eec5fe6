use thiserror::Error;

/// A failed decode: what went wrong and the byte offset in the original
/// input where the problem was detected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct DecodeError {
    /// The failure category.
    pub kind: DecodeErrorKind,
    /// Byte offset into the decoded buffer. For errors about an already
    /// consumed token this points at the start of the offending token, not
    /// past it.
    pub offset: usize,
}

/// Decode failure categories. All are fatal to the current decode call;
/// there is no field-level recovery.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Required bytes were not available.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A required literal character or token did not match.
    #[error("unexpected input")]
    UnexpectedInput,
    /// A string body ended before its closing quote.
    #[error("unterminated string")]
    UnterminatedString,
    /// A backslash escape used an unrecognized character.
    #[error("invalid escape character")]
    InvalidEscapeCharacter,
    /// A `\u` escape was truncated, had non-hex digits, or formed a broken
    /// surrogate pair.
    #[error("invalid \\u escape sequence")]
    InvalidUnicodeEscape,
    /// A full object scan completed without seeing every required field.
    #[error("missing required field(s)")]
    MissingRequiredFields,
}

/// A failed encode.
///
/// Encoding cannot fail on well-formed values; these are programmer-error
/// class failures that the `should_encode`-gated object path never hits.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// A value whose presence was never established (e.g. an empty optional)
    /// was forced through a non-optional-aware encode path.
    #[error("attempted to encode an uninitialized value")]
    UninitializedValue,
    /// JSON has no representation for NaN or infinite numbers.
    #[error("JSON cannot represent a non-finite number")]
    NonFiniteNumber,
}
