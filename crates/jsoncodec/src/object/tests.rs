use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use super::*;
use crate::{
    codec::{decode, encode},
    codecs::{ArrayCodec, BooleanCodec, NumberCodec, OptionCodec},
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Track {
    title: String,
    duration_ms: u64,
    explicit: bool,
    isrc: Option<String>,
    tags: Vec<String>,
}

fn track_codec() -> ObjectCodec<Track> {
    let mut codec = ObjectCodec::<Track>::new();
    codec
        .required(
            "title",
            Field::member(StringCodec, |t: &Track| &t.title, |t, v| t.title = v),
        )
        .required(
            "duration_ms",
            Field::member(
                NumberCodec::<u64>::new(),
                |t: &Track| &t.duration_ms,
                |t, v| t.duration_ms = v,
            ),
        )
        .optional(
            "explicit",
            Field::member(BooleanCodec, |t: &Track| &t.explicit, |t, v| t.explicit = v),
        )
        .optional(
            "isrc",
            Field::member(
                OptionCodec::new(StringCodec),
                |t: &Track| &t.isrc,
                |t, v| t.isrc = v,
            ),
        )
        .optional(
            "tags",
            Field::member(ArrayCodec::new(StringCodec), |t: &Track| &t.tags, |t, v| {
                t.tags = v;
            }),
        );
    codec
}

#[test]
fn decodes_member_bound_fields() {
    let codec = track_codec();
    let track = decode(
        &codec,
        br#"{"title":"Weightless","duration_ms":485000,"explicit":false,"tags":["ambient","calm"]}"#,
    )
    .unwrap();
    assert_eq!(
        track,
        Track {
            title: "Weightless".to_string(),
            duration_ms: 485_000,
            explicit: false,
            isrc: None,
            tags: vec!["ambient".to_string(), "calm".to_string()],
        }
    );
}

#[test]
fn encodes_in_registration_order() {
    let codec = track_codec();
    let track = Track {
        title: "Weightless".to_string(),
        duration_ms: 485_000,
        explicit: true,
        isrc: Some("GBSKR1100026".to_string()),
        tags: vec![],
    };
    assert_eq!(
        encode(&codec, &track).unwrap(),
        br#"{"title":"Weightless","duration_ms":485000,"explicit":true,"isrc":"GBSKR1100026","tags":[]}"#
    );
}

#[test]
fn registration_order_beats_lookup_order() {
    // "b" registered before "a"; encode must follow registration, not the
    // lexicographic lookup table
    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        a: u32,
        b: u32,
    }
    let mut codec = ObjectCodec::<Pair>::new();
    codec
        .required(
            "b",
            Field::member(NumberCodec::<u32>::new(), |p: &Pair| &p.b, |p, v| p.b = v),
        )
        .required(
            "a",
            Field::member(NumberCodec::<u32>::new(), |p: &Pair| &p.a, |p, v| p.a = v),
        );
    let pair = Pair { a: 1, b: 2 };
    assert_eq!(encode(&codec, &pair).unwrap(), br#"{"b":2,"a":1}"#);
}

#[test]
fn optional_fields_suppress_when_absent() {
    let codec = track_codec();
    let track = Track {
        title: "Weightless".to_string(),
        duration_ms: 485_000,
        explicit: false,
        isrc: None,
        tags: vec![],
    };
    // `isrc` is gated by the option codec's should_encode; the other
    // optionals have no optionality predicate and always emit
    let out = encode(&codec, &track).unwrap();
    assert_eq!(
        out,
        br#"{"title":"Weightless","duration_ms":485000,"explicit":false,"tags":[]}"#
    );
}

#[test]
fn round_trip_preserves_values() {
    let codec = track_codec();
    let original = Track {
        title: "Some \"quoted\" title".to_string(),
        duration_ms: 123,
        explicit: true,
        isrc: Some("x".to_string()),
        tags: vec!["a".to_string()],
    };
    let encoded = encode(&codec, &original).unwrap();
    assert_eq!(decode(&codec, &encoded).unwrap(), original);
}

#[test]
fn missing_required_field_fails() {
    let codec = track_codec();
    let err = decode(&codec, br#"{"title":"x"}"#).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::MissingRequiredFields);

    let err = decode(&codec, br#"{}"#).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::MissingRequiredFields);
}

#[test]
fn required_fields_found_in_any_order() {
    let codec = track_codec();
    let track = decode(
        &codec,
        br#"{"explicit":true,"duration_ms":1,"title":"t"}"#,
    )
    .unwrap();
    assert_eq!(track.duration_ms, 1);
    assert!(track.explicit);
}

#[test]
fn duplicate_required_key_counts_once_and_keeps_last() {
    let codec = track_codec();
    // both required fields present, one of them twice: no false
    // missing-required error, and the later value wins
    let track = decode(
        &codec,
        br#"{"title":"first","title":"second","duration_ms":9}"#,
    )
    .unwrap();
    assert_eq!(track.title, "second");
    assert_eq!(track.duration_ms, 9);

    // a duplicate must not mask a genuinely missing required field
    let err = decode(&codec, br#"{"title":"a","title":"b"}"#).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::MissingRequiredFields);
}

#[test]
fn duplicate_optional_key_keeps_last() {
    let codec = track_codec();
    let track = decode(
        &codec,
        br#"{"title":"t","duration_ms":1,"isrc":"one","isrc":"two"}"#,
    )
    .unwrap();
    assert_eq!(track.isrc.as_deref(), Some("two"));
}

#[test]
fn unknown_keys_are_skipped_structurally() {
    let codec = track_codec();
    let track = decode(
        &codec,
        br#"{"title":"t","bogus":{"x":[1,2,{"deep":"A"}]},"duration_ms":7,"later":null}"#,
    )
    .unwrap();
    assert_eq!(track.title, "t");
    assert_eq!(track.duration_ms, 7);
}

#[test]
fn registration_is_idempotent() {
    let mut codec = ObjectCodec::<Track>::new();
    codec.required(
        "title",
        Field::member(StringCodec, |t: &Track| &t.title, |t, v| t.title = v),
    );
    // second registration of the same name is dropped entirely: no second
    // required slot, no binding replacement
    codec.required(
        "title",
        Field::custom(StringCodec, |_t| "other".to_string(), |_t, _v| {}),
    );
    assert_eq!(codec.num_required_fields(), 1);

    let track = decode(&codec, br#"{"title":"kept"}"#).unwrap();
    assert_eq!(track.title, "kept");
    assert_eq!(encode(&codec, &track).unwrap(), br#"{"title":"kept"}"#);
}

#[test]
fn empty_schema_and_empty_object() {
    let codec = ObjectCodec::<Track>::new();
    assert!(decode(&codec, b"{}").is_ok());
    assert_eq!(encode(&codec, &Track::default()).unwrap(), b"{}");
}

#[test]
fn accessor_binding_uses_getter_and_setter() {
    #[derive(Debug, Default, PartialEq)]
    struct Gauge {
        raw: i64,
    }
    impl Gauge {
        fn level(&self) -> i64 {
            self.raw
        }
        fn set_level(&mut self, level: i64) {
            self.raw = level;
        }
    }

    let mut codec = ObjectCodec::<Gauge>::new();
    codec.required(
        "level",
        Field::accessors(NumberCodec::<i64>::new(), Gauge::level, Gauge::set_level),
    );

    let gauge = decode(&codec, br#"{"level":-3}"#).unwrap();
    assert_eq!(gauge, Gauge { raw: -3 });
    assert_eq!(encode(&codec, &gauge).unwrap(), br#"{"level":-3}"#);
}

#[test]
fn custom_binding_reaches_packed_storage() {
    #[derive(Debug, Default, PartialEq)]
    struct Flags {
        bits: u8,
    }

    let mut codec = ObjectCodec::<Flags>::new();
    codec
        .required(
            "read",
            Field::custom(
                BooleanCodec,
                |f: &Flags| f.bits & 0b01 != 0,
                |f, v| f.bits = (f.bits & !0b01) | u8::from(v),
            ),
        )
        .required(
            "write",
            Field::custom(
                BooleanCodec,
                |f: &Flags| f.bits & 0b10 != 0,
                |f, v| f.bits = (f.bits & !0b10) | (u8::from(v) << 1),
            ),
        );

    let flags = decode(&codec, br#"{"read":true,"write":true}"#).unwrap();
    assert_eq!(flags.bits, 0b11);
    assert_eq!(
        encode(&codec, &flags).unwrap(),
        br#"{"read":true,"write":true}"#
    );
}

#[test]
fn value_only_binding_validates_without_storing() {
    #[derive(Debug, Default, PartialEq)]
    struct Versioned {
        payload: u32,
    }

    let mut codec = ObjectCodec::<Versioned>::new();
    codec
        .required("version", Field::value_only(NumberCodec::<u32>::new()))
        .required(
            "payload",
            Field::member(
                NumberCodec::<u32>::new(),
                |v: &Versioned| &v.payload,
                |v, x| v.payload = x,
            ),
        );

    // the version value is parsed (and therefore validated) but discarded
    let value = decode(&codec, br#"{"version":2,"payload":7}"#).unwrap();
    assert_eq!(value, Versioned { payload: 7 });

    let err = decode(&codec, br#"{"payload":7}"#).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::MissingRequiredFields);

    let err = decode(&codec, br#"{"version":"x","payload":7}"#).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::UnexpectedInput);

    // encode emits the nested codec's default in the version slot
    assert_eq!(
        encode(&codec, &value).unwrap(),
        br#"{"version":0,"payload":7}"#
    );
}

#[test]
fn new_and_default_wrap_the_default_constructor() {
    // `new` boxes `T::default` as the factory; `default` goes through `new`
    let from_new = ObjectCodec::<Track>::new();
    let from_default = ObjectCodec::<Track>::default();
    assert_eq!(decode(&from_new, b"{}").unwrap(), Track::default());
    assert_eq!(encode(&from_default, &Track::default()).unwrap(), b"{}");

    let mut codec = ObjectCodec::<Track>::default();
    codec.optional(
        "isrc",
        Field::member(
            OptionCodec::new(StringCodec),
            |t: &Track| &t.isrc,
            |t, v| t.isrc = v,
        ),
    );
    let track = decode(&codec, br#"{"isrc":"x"}"#).unwrap();
    assert_eq!(track.isrc.as_deref(), Some("x"));
    assert_eq!(track.title, String::default());
}

#[test]
fn with_construct_builds_non_default_targets() {
    #[derive(Debug, PartialEq)]
    struct Endpoint {
        url: String,
        retries: u32,
    }

    let mut codec = ObjectCodec::with_construct(|| Endpoint {
        url: String::new(),
        retries: 3,
    });
    codec.required(
        "url",
        Field::member(StringCodec, |e: &Endpoint| &e.url, |e, v| e.url = v),
    );

    let endpoint = decode(&codec, br#"{"url":"https://example.net"}"#).unwrap();
    assert_eq!(endpoint.url, "https://example.net");
    // factory-provided state survives when no field overwrites it
    assert_eq!(endpoint.retries, 3);
}

#[test]
fn keys_are_escaped_at_registration() {
    #[derive(Debug, Default, PartialEq)]
    struct Odd {
        value: u8,
    }

    let mut codec = ObjectCodec::<Odd>::new();
    codec.required(
        "we\"ird\n",
        Field::member(NumberCodec::<u8>::new(), |o: &Odd| &o.value, |o, v| {
            o.value = v;
        }),
    );

    let encoded = encode(&codec, &Odd { value: 1 }).unwrap();
    assert_eq!(encoded, br#"{"we\"ird\n":1}"#);
    assert_eq!(decode(&codec, &encoded).unwrap(), Odd { value: 1 });
}

#[test]
fn nested_object_codecs() {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Inner {
        id: u32,
    }
    #[derive(Debug, Default, PartialEq)]
    struct Outer {
        inner: Inner,
    }

    let mut inner_codec = ObjectCodec::<Inner>::new();
    inner_codec.required(
        "id",
        Field::member(NumberCodec::<u32>::new(), |i: &Inner| &i.id, |i, v| i.id = v),
    );

    let mut outer_codec = ObjectCodec::<Outer>::new();
    outer_codec.required(
        "inner",
        Field::member(inner_codec, |o: &Outer| &o.inner, |o, v| o.inner = v),
    );

    let outer = decode(&outer_codec, br#"{"inner":{"id":5}}"#).unwrap();
    assert_eq!(outer.inner.id, 5);
    assert_eq!(
        encode(&outer_codec, &outer).unwrap(),
        br#"{"inner":{"id":5}}"#
    );
}
