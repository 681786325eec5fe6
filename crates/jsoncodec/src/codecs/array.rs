//! Codec for homogeneous JSON arrays.

use alloc::vec::Vec;

use crate::{
    codec::Codec,
    decode::DecodeContext,
    encode::EncodeContext,
    error::{DecodeError, EncodeError},
};

/// Codec for a `Vec` of values sharing one element codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayCodec<C> {
    element: C,
}

impl<C> ArrayCodec<C> {
    /// Creates an array codec with `element` for each item.
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<C: Codec> Codec for ArrayCodec<C> {
    type Value = Vec<C::Value>;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Vec<C::Value>, DecodeError> {
        let mut out = Vec::new();
        ctx.advance_past_comma_separated(b'[', b']', |ctx| {
            out.push(self.element.decode(ctx)?);
            Ok(())
        })?;
        Ok(out)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &Vec<C::Value>) -> Result<(), EncodeError> {
        ctx.append(b'[');
        for item in value {
            self.element.encode(ctx, item)?;
            ctx.append(b',');
        }
        ctx.append_or_replace(b',', b']');
        Ok(())
    }
}
