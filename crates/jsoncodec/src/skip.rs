//! Structural skip: consume one JSON value without interpreting it.

use crate::{
    decode::DecodeContext,
    error::DecodeError,
};

/// Consumes exactly one JSON value of any shape, validating its structure
/// but building no representation.
///
/// This is what makes unknown object keys free: the object codec calls this
/// for every key it has no binding for, so new fields added to a wire format
/// never break old readers.
///
/// # Errors
///
/// The same structural [`DecodeError`]s a real decode of the value would
/// report.
pub fn skip_value(ctx: &mut DecodeContext<'_>) -> Result<(), DecodeError> {
    match ctx.peek() {
        b'"' => ctx.scan_string_body().map(|_| ()),
        b'{' => ctx.advance_past_comma_separated(b'{', b'}', |ctx| {
            ctx.scan_string_body()?;
            ctx.skip_whitespace();
            ctx.advance_past(b':')?;
            ctx.skip_whitespace();
            skip_value(ctx)
        }),
        b'[' => ctx.advance_past_comma_separated(b'[', b']', skip_value),
        b't' => ctx.advance_past_literal(b"true"),
        b'n' => ctx.advance_past_literal(b"null"),
        b'f' => {
            // dispatch already identified the 'f'; match the tail
            ctx.next()?;
            ctx.advance_past_literal(b"alse")
        }
        _ => ctx.scan_number_token().map(|_| ()),
    }
}
