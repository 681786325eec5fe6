//! Codec adapter for optional values.

use crate::{
    codec::Codec,
    decode::DecodeContext,
    encode::EncodeContext,
    error::{DecodeError, EncodeError},
};

/// Wraps a codec so that JSON `null` maps to `None`.
///
/// `should_encode` is `is_some()`, so an object field bound to an option
/// codec is simply left out when the value is absent. Encoding a `None`
/// directly (outside that gate) is an [`EncodeError::UninitializedValue`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionCodec<C> {
    inner: C,
}

impl<C> OptionCodec<C> {
    /// Wraps `inner`.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Codec> Codec for OptionCodec<C> {
    type Value = Option<C::Value>;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Option<C::Value>, DecodeError> {
        if ctx.peek() == b'n' {
            ctx.advance_past_literal(b"null")?;
            Ok(None)
        } else {
            self.inner.decode(ctx).map(Some)
        }
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &Option<C::Value>) -> Result<(), EncodeError> {
        match value {
            Some(inner) => self.inner.encode(ctx, inner),
            None => Err(EncodeError::UninitializedValue),
        }
    }

    fn should_encode(&self, value: &Option<C::Value>) -> bool {
        value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codec::{decode, encode},
        codecs::NumberCodec,
    };

    #[test]
    fn null_is_none() {
        let codec = OptionCodec::new(NumberCodec::<u32>::new());
        assert_eq!(decode(&codec, b"null").unwrap(), None);
        assert_eq!(decode(&codec, b"7").unwrap(), Some(7));
    }

    #[test]
    fn some_encodes_inner() {
        let codec = OptionCodec::new(NumberCodec::<u32>::new());
        assert_eq!(encode(&codec, &Some(7)).unwrap(), b"7");
    }

    #[test]
    fn none_refuses_direct_encode() {
        let codec = OptionCodec::new(NumberCodec::<u32>::new());
        assert_eq!(
            encode(&codec, &None).unwrap_err(),
            EncodeError::UninitializedValue
        );
        assert!(!codec.should_encode(&None));
        assert!(codec.should_encode(&Some(7)));
    }
}
