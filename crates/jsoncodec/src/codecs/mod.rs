//! Codecs for primitive scalars and containers.
//!
//! These are the leaf converters that plug into the object codec engine:
//! strings, numbers, booleans, optionals, and arrays. Each is an ordinary
//! [`Codec`](crate::Codec) implementation, so they nest freely.

mod array;
mod boolean;
mod number;
mod option;
mod string;

pub use array::ArrayCodec;
pub use boolean::BooleanCodec;
pub use number::{JsonNumber, NumberCodec};
pub use option::OptionCodec;
pub use string::StringCodec;

pub(crate) use string::write_escaped;
