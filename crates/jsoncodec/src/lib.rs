//! A schema-driven JSON codec: field bindings are registered against a
//! target type once, compiled into an [`ObjectCodec`], and then reused for
//! any number of decode and encode calls.
//!
//! Decoding scans the input bytes directly, dispatching known keys through
//! the registered bindings and structurally skipping unknown ones. Encoding
//! walks the bindings in registration order, so output field order is the
//! schema's order.
//!
//! ```rust
//! use jsoncodec::{
//!     codecs::{NumberCodec, OptionCodec, StringCodec},
//!     decode, encode, Field, ObjectCodec,
//! };
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Track {
//!     title: String,
//!     duration_ms: u64,
//!     isrc: Option<String>,
//! }
//!
//! let mut codec = ObjectCodec::<Track>::new();
//! codec
//!     .required(
//!         "title",
//!         Field::member(StringCodec, |t: &Track| &t.title, |t, v| t.title = v),
//!     )
//!     .required(
//!         "duration_ms",
//!         Field::member(
//!             NumberCodec::<u64>::new(),
//!             |t: &Track| &t.duration_ms,
//!             |t, v| t.duration_ms = v,
//!         ),
//!     )
//!     .optional(
//!         "isrc",
//!         Field::member(
//!             OptionCodec::new(StringCodec),
//!             |t: &Track| &t.isrc,
//!             |t, v| t.isrc = v,
//!         ),
//!     );
//!
//! let track = decode(&codec, br#"{"duration_ms":215000,"title":"Hyperballad"}"#)?;
//! assert_eq!(track.title, "Hyperballad");
//! assert_eq!(track.isrc, None);
//!
//! let bytes = encode(&codec, &track)?;
//! assert_eq!(bytes, br#"{"title":"Hyperballad","duration_ms":215000}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod bitset;
mod codec;
mod decode;
mod encode;
mod error;
mod object;
mod skip;

pub mod codecs;

pub use codec::{Codec, decode, encode};
pub use decode::DecodeContext;
pub use encode::EncodeContext;
pub use error::{DecodeError, DecodeErrorKind, EncodeError};
pub use object::{Field, ObjectCodec};
pub use skip::skip_value;
