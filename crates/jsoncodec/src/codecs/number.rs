//! Codecs for the numeric primitives.

use core::{
    fmt::{Display, Write as _},
    marker::PhantomData,
    str::FromStr,
};

use crate::{
    codec::Codec,
    decode::DecodeContext,
    encode::EncodeContext,
    error::{DecodeError, DecodeErrorKind, EncodeError},
};

mod sealed {
    pub trait Sealed {}
}

/// Numeric primitives with a JSON text representation.
///
/// Decoding parses the scanned number token with the type's own `FromStr`,
/// so range and format checks come for free (a fraction fails to parse as
/// an integer, an overflowing literal fails outright).
pub trait JsonNumber: sealed::Sealed + Display + FromStr {
    /// `false` for NaN and infinities, which JSON cannot represent.
    fn is_json_finite(&self) -> bool {
        true
    }
}

macro_rules! impl_integer_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl JsonNumber for $ty {}
        )*
    };
}

macro_rules! impl_float_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl JsonNumber for $ty {
                fn is_json_finite(&self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

impl_integer_number!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, isize, usize);
impl_float_number!(f32, f64);

/// Codec for a single numeric primitive type.
#[derive(Debug, Clone, Copy)]
pub struct NumberCodec<N> {
    _marker: PhantomData<N>,
}

impl<N> NumberCodec<N> {
    /// Creates the codec.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<N> Default for NumberCodec<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: JsonNumber> Codec for NumberCodec<N> {
    type Value = N;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<N, DecodeError> {
        let start = ctx.offset();
        let token = ctx.scan_number_token()?;
        let invalid = DecodeError {
            kind: DecodeErrorKind::UnexpectedInput,
            offset: start,
        };
        // the token is all ASCII by construction
        let text = core::str::from_utf8(token).map_err(|_| invalid)?;
        text.parse().map_err(|_| invalid)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &N) -> Result<(), EncodeError> {
        if !value.is_json_finite() {
            return Err(EncodeError::NonFiniteNumber);
        }
        write!(ctx, "{value}").expect("writing to a byte buffer cannot fail");
        Ok(())
    }
}
