//! The codec capability and the whole-buffer entry points.

use alloc::vec::Vec;

use crate::{
    decode::DecodeContext,
    encode::EncodeContext,
    error::{DecodeError, DecodeErrorKind, EncodeError},
};

/// A paired decode/encode strategy for a single type.
///
/// Codecs are plain values: build one, then share it (`&`, `Arc`) across as
/// many concurrent decode/encode calls as needed. All per-call state lives
/// in the contexts.
pub trait Codec {
    /// The typed value this codec reads and writes.
    type Value;

    /// Decodes one JSON value from the cursor's current position, consuming
    /// exactly its bytes.
    ///
    /// # Errors
    ///
    /// A [`DecodeError`] carrying the byte offset where the problem was
    /// detected.
    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Self::Value, DecodeError>;

    /// Encodes `value` as JSON text into the output buffer.
    ///
    /// # Errors
    ///
    /// An [`EncodeError`] for values JSON cannot represent; well-formed
    /// values never fail.
    fn encode(&self, ctx: &mut EncodeContext, value: &Self::Value) -> Result<(), EncodeError>;

    /// Whether `value` should be emitted at all when encoded as an object
    /// field. Codecs without a notion of optionality keep the default
    /// (always emit); wrappers like the option codec suppress emission for
    /// absent values, letting optional-field and optional-value semantics
    /// compose.
    fn should_encode(&self, _value: &Self::Value) -> bool {
        true
    }
}

/// Decodes a complete JSON text into a typed value.
///
/// Surrounding whitespace is accepted; anything after the value is not.
///
/// # Errors
///
/// The codec's [`DecodeError`], or [`DecodeErrorKind::UnexpectedInput`] at
/// the first trailing byte.
pub fn decode<C: Codec>(codec: &C, input: &[u8]) -> Result<C::Value, DecodeError> {
    let mut ctx = DecodeContext::new(input);
    ctx.skip_whitespace();
    let value = codec.decode(&mut ctx)?;
    ctx.skip_whitespace();
    if ctx.at_end() {
        Ok(value)
    } else {
        Err(ctx.error(DecodeErrorKind::UnexpectedInput))
    }
}

/// Encodes a typed value into a fresh buffer of JSON text.
///
/// # Errors
///
/// The codec's [`EncodeError`].
pub fn encode<C: Codec>(codec: &C, value: &C::Value) -> Result<Vec<u8>, EncodeError> {
    let mut ctx = EncodeContext::new();
    codec.encode(&mut ctx, value)?;
    Ok(ctx.into_bytes())
}
