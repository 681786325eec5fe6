//! The object codec compiler: named field bindings turned into one
//! reusable codec.
//!
//! Overview
//! - A [`Field`] binds a nested codec to a storage strategy on the target
//!   type: value-only (validate and discard), member slot, accessor pair,
//!   or custom closures. The four styles are a closed sum dispatched by
//!   pattern matching; member and accessor access is captured as closures
//!   at construction, so the schema stays a plain value.
//! - An [`ObjectCodec`] accumulates named bindings in registration order
//!   (the encode order) alongside a name-keyed index table (the decode
//!   dispatch). Keys are escaped once at registration; required fields get
//!   dense bitset slots as they are registered.
//!
//! Sealing
//! - Registration must finish before the codec is shared: build it, then
//!   hand out `&`/`Arc` references for concurrent decode/encode calls.
//!   Nothing enforces this at runtime; registering on a codec that has
//!   already been used is a caller bug. Decode and encode take `&self` and
//!   keep all per-call state (cursor, output, coverage bitset) local, so a
//!   sealed codec is freely shared across threads.

use alloc::{
    boxed::Box,
    collections::BTreeMap,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};

use crate::{
    bitset::Bitset,
    codec::Codec,
    codecs::{self, StringCodec},
    decode::DecodeContext,
    encode::EncodeContext,
    error::{DecodeError, DecodeErrorKind, EncodeError},
    skip::skip_value,
};

type ConstructFn<T> = Box<dyn Fn() -> T + Send + Sync>;
type DecodeValueFn = Box<dyn Fn(&mut DecodeContext<'_>) -> Result<(), DecodeError> + Send + Sync>;
type EncodeValueFn = Box<dyn Fn(&mut EncodeContext, &str) -> Result<(), EncodeError> + Send + Sync>;
type DecodeIntoFn<T> =
    Box<dyn Fn(&mut DecodeContext<'_>, &mut T) -> Result<(), DecodeError> + Send + Sync>;
type EncodeFromFn<T> =
    Box<dyn Fn(&mut EncodeContext, &str, &T) -> Result<(), EncodeError> + Send + Sync>;

/// One field binding: how a named JSON field reaches into `T`.
///
/// Built with one of the four constructors and handed to
/// [`ObjectCodec::required`] / [`ObjectCodec::optional`].
pub struct Field<T> {
    kind: FieldKind<T>,
}

enum FieldKind<T> {
    /// No storage: decode parses and discards, encode emits the nested
    /// codec's default value.
    ValueOnly {
        decode: DecodeValueFn,
        encode: EncodeValueFn,
    },
    /// Direct slot access through borrow/assign closures.
    Member {
        decode: DecodeIntoFn<T>,
        encode: EncodeFromFn<T>,
    },
    /// Getter/setter pair; the getter returns by value.
    Accessors {
        decode: DecodeIntoFn<T>,
        encode: EncodeFromFn<T>,
    },
    /// Caller-supplied get/set closures for storage that is not a simple
    /// slot (computed or packed fields).
    Custom {
        decode: DecodeIntoFn<T>,
        encode: EncodeFromFn<T>,
    },
}

/// Emits one `"key":value,` group if the codec wants the value encoded.
fn emit_field<C: Codec>(
    ctx: &mut EncodeContext,
    codec: &C,
    escaped_key: &str,
    value: &C::Value,
) -> Result<(), EncodeError> {
    if codec.should_encode(value) {
        ctx.append_bytes(escaped_key.as_bytes());
        codec.encode(ctx, value)?;
        ctx.append(b',');
    }
    Ok(())
}

impl<T> Field<T> {
    /// Binds a codec with no storage: the value is parsed (and validated)
    /// on decode but not retained, and encode emits the nested codec's
    /// default value. Useful for fixed or sentinel fields.
    pub fn value_only<C>(codec: C) -> Self
    where
        C: Codec + Send + Sync + 'static,
        C::Value: Default,
    {
        let codec = Arc::new(codec);
        let decode_codec = Arc::clone(&codec);
        Self {
            kind: FieldKind::ValueOnly {
                decode: Box::new(move |ctx| decode_codec.decode(ctx).map(|_| ())),
                encode: Box::new(move |ctx, escaped_key| {
                    emit_field(ctx, &*codec, escaped_key, &C::Value::default())
                }),
            },
        }
    }

    /// Binds a codec to a member slot: `get` borrows the slot for encoding
    /// and `set` assigns the decoded value into it.
    pub fn member<C, G, S>(codec: C, get: G, set: S) -> Self
    where
        C: Codec + Send + Sync + 'static,
        G: Fn(&T) -> &C::Value + Send + Sync + 'static,
        S: Fn(&mut T, C::Value) + Send + Sync + 'static,
    {
        let codec = Arc::new(codec);
        let decode_codec = Arc::clone(&codec);
        Self {
            kind: FieldKind::Member {
                decode: Box::new(move |ctx, object| {
                    let value = decode_codec.decode(ctx)?;
                    set(object, value);
                    Ok(())
                }),
                encode: Box::new(move |ctx, escaped_key, object| {
                    emit_field(ctx, &*codec, escaped_key, get(object))
                }),
            },
        }
    }

    /// Binds a codec through a getter/setter pair, for fields exposed as
    /// methods rather than public slots. The getter returns by value.
    pub fn accessors<C, G, S>(codec: C, get: G, set: S) -> Self
    where
        C: Codec + Send + Sync + 'static,
        G: Fn(&T) -> C::Value + Send + Sync + 'static,
        S: Fn(&mut T, C::Value) + Send + Sync + 'static,
    {
        let codec = Arc::new(codec);
        let decode_codec = Arc::clone(&codec);
        Self {
            kind: FieldKind::Accessors {
                decode: Box::new(move |ctx, object| {
                    let value = decode_codec.decode(ctx)?;
                    set(object, value);
                    Ok(())
                }),
                encode: Box::new(move |ctx, escaped_key, object| {
                    let value = get(object);
                    emit_field(ctx, &*codec, escaped_key, &value)
                }),
            },
        }
    }

    /// Binds a codec through arbitrary get/set closures, the escape hatch
    /// for computed or packed storage.
    pub fn custom<C, G, S>(codec: C, get: G, set: S) -> Self
    where
        C: Codec + Send + Sync + 'static,
        G: Fn(&T) -> C::Value + Send + Sync + 'static,
        S: Fn(&mut T, C::Value) + Send + Sync + 'static,
    {
        let codec = Arc::new(codec);
        let decode_codec = Arc::clone(&codec);
        Self {
            kind: FieldKind::Custom {
                decode: Box::new(move |ctx, object| {
                    let value = decode_codec.decode(ctx)?;
                    set(object, value);
                    Ok(())
                }),
                encode: Box::new(move |ctx, escaped_key, object| {
                    let value = get(object);
                    emit_field(ctx, &*codec, escaped_key, &value)
                }),
            },
        }
    }

    fn decode_into(&self, ctx: &mut DecodeContext<'_>, object: &mut T) -> Result<(), DecodeError> {
        match &self.kind {
            FieldKind::ValueOnly { decode, .. } => decode(ctx),
            FieldKind::Member { decode, .. }
            | FieldKind::Accessors { decode, .. }
            | FieldKind::Custom { decode, .. } => decode(ctx, object),
        }
    }

    fn encode_from(
        &self,
        ctx: &mut EncodeContext,
        escaped_key: &str,
        object: &T,
    ) -> Result<(), EncodeError> {
        match &self.kind {
            FieldKind::ValueOnly { encode, .. } => encode(ctx, escaped_key),
            FieldKind::Member { encode, .. }
            | FieldKind::Accessors { encode, .. }
            | FieldKind::Custom { encode, .. } => encode(ctx, escaped_key, object),
        }
    }
}

struct BoundField<T> {
    /// The key pre-rendered as `"name":`, escaped once at registration.
    escaped_key: String,
    /// Dense coverage-bitset index; `Some` iff the field is required.
    required_slot: Option<usize>,
    field: Field<T>,
}

/// A compiled object schema: decode dispatch table plus ordered encode
/// list, reusable across arbitrarily many concurrent calls once built.
pub struct ObjectCodec<T> {
    construct: ConstructFn<T>,
    fields: Vec<BoundField<T>>,
    lookup: BTreeMap<String, usize>,
    num_required: usize,
}

impl<T: Default + 'static> ObjectCodec<T> {
    /// Creates a codec that default-constructs its output value.
    #[must_use]
    pub fn new() -> Self {
        Self::with_construct(T::default)
    }
}

impl<T: Default + 'static> Default for ObjectCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ObjectCodec<T> {
    /// Creates a codec with an explicit factory for the output value.
    /// Required when `T` has no meaningful `Default`.
    pub fn with_construct<F>(construct: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            construct: Box::new(construct),
            fields: Vec::new(),
            lookup: BTreeMap::new(),
            num_required: 0,
        }
    }

    /// Registers a required field. Decoding fails with
    /// [`DecodeErrorKind::MissingRequiredFields`] unless the field appears.
    ///
    /// If `name` is already registered the new binding is silently dropped:
    /// first registration wins.
    pub fn required(&mut self, name: &str, field: Field<T>) -> &mut Self {
        self.save_field(name, true, field);
        self
    }

    /// Registers an optional field. Absent fields leave the constructed
    /// value untouched; present fields decode normally.
    ///
    /// First registration of a name wins, as with [`required`].
    ///
    /// [`required`]: ObjectCodec::required
    pub fn optional(&mut self, name: &str, field: Field<T>) -> &mut Self {
        self.save_field(name, false, field);
        self
    }

    /// Number of distinct fields registered as required.
    #[must_use]
    pub fn num_required_fields(&self) -> usize {
        self.num_required
    }

    fn save_field(&mut self, name: &str, required: bool, field: Field<T>) {
        if self.lookup.contains_key(name) {
            return;
        }
        let required_slot = if required {
            let slot = self.num_required;
            self.num_required += 1;
            Some(slot)
        } else {
            None
        };
        self.lookup.insert(name.to_string(), self.fields.len());
        self.fields.push(BoundField {
            escaped_key: escape_key(name),
            required_slot,
            field,
        });
    }
}

/// Renders `name` as quoted, escaped JSON text followed by `:`, computed
/// once per registration so encode calls never re-escape schema keys.
fn escape_key(name: &str) -> String {
    let mut ctx = EncodeContext::with_capacity(name.len() + 3);
    codecs::write_escaped(&mut ctx, name);
    ctx.append(b':');
    String::from_utf8(ctx.into_bytes()).expect("escaped key is valid UTF-8")
}

impl<T> Codec for ObjectCodec<T> {
    type Value = T;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<T, DecodeError> {
        let mut seen = Bitset::new(self.num_required);
        let mut distinct_seen = 0usize;
        let mut output = (self.construct)();

        ctx.advance_past_object(&StringCodec, |ctx, key: String| {
            let Some(&index) = self.lookup.get(key.as_str()) else {
                return skip_value(ctx);
            };
            let bound = &self.fields[index];
            bound.field.decode_into(ctx, &mut output)?;
            if let Some(slot) = bound.required_slot {
                // a duplicate required key counts toward coverage only once
                if !seen.test_and_set(slot) {
                    distinct_seen += 1;
                }
            }
            Ok(())
        })?;

        if distinct_seen != self.num_required {
            return Err(ctx.error(DecodeErrorKind::MissingRequiredFields));
        }
        Ok(output)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &T) -> Result<(), EncodeError> {
        ctx.append(b'{');
        for bound in &self.fields {
            bound.field.encode_from(ctx, &bound.escaped_key, value)?;
        }
        ctx.append_or_replace(b',', b'}');
        Ok(())
    }
}

#[cfg(test)]
mod tests;
