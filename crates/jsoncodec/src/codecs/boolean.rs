//! Codec for JSON booleans.

use crate::{
    codec::Codec,
    decode::DecodeContext,
    encode::EncodeContext,
    error::{DecodeError, DecodeErrorKind, EncodeError},
};

/// Codec for `true` / `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCodec;

impl Codec for BooleanCodec {
    type Value = bool;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<bool, DecodeError> {
        match ctx.peek() {
            b't' => {
                ctx.advance_past_literal(b"true")?;
                Ok(true)
            }
            b'f' => {
                // the dispatch byte is known; match only the tail
                ctx.next()?;
                ctx.advance_past_literal(b"alse")?;
                Ok(false)
            }
            _ => Err(ctx.error(DecodeErrorKind::UnexpectedInput)),
        }
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &bool) -> Result<(), EncodeError> {
        ctx.append_bytes(if *value { b"true" } else { b"false" });
        Ok(())
    }
}
