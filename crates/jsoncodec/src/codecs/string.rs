//! The string codec: unescaping on decode, escaping on encode.
//!
//! Scanning and interpreting are split: the cursor's `scan_string_body`
//! validates the body and hands back the raw span, and this codec turns
//! that span into a `String`. Escape sequences are known valid by the time
//! they reach the unescaper; the only errors left to detect here are broken
//! surrogate pairs. Invalid UTF-8 in the raw text is replaced with U+FFFD
//! rather than rejected.

use alloc::string::String;

use crate::{
    codec::Codec,
    decode::DecodeContext,
    encode::EncodeContext,
    error::{DecodeError, DecodeErrorKind, EncodeError},
};

/// Codec for JSON strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
    type Value = String;

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<String, DecodeError> {
        // the body starts one byte past the opening quote
        let base = ctx.offset() + 1;
        let body = ctx.scan_string_body()?;
        unescape(body, base)
    }

    fn encode(&self, ctx: &mut EncodeContext, value: &String) -> Result<(), EncodeError> {
        write_escaped(ctx, value);
        Ok(())
    }
}

/// Number of hex digits in a `\uXXXX` escape.
const UNICODE_ESCAPE_DIGITS: usize = 4;

fn hex4(digits: &[u8]) -> u32 {
    debug_assert_eq!(digits.len(), UNICODE_ESCAPE_DIGITS);
    digits.iter().fold(0, |acc, &d| {
        (acc << 4) | u32::from((d as char).to_digit(16).unwrap_or(0))
    })
}

fn is_high_surrogate(code: u32) -> bool {
    (0xD800..=0xDBFF).contains(&code)
}

fn is_low_surrogate(code: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&code)
}

/// Unescapes a string body whose escapes were already validated by the
/// scanner. `base` is the body's byte offset in the original input, used
/// for surrogate-pair error reporting.
fn unescape(body: &[u8], base: usize) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(body.len());
    let mut i = 0;

    while i < body.len() {
        if body[i] != b'\\' {
            // copy the raw run up to the next escape
            let run_end = body[i..]
                .iter()
                .position(|&b| b == b'\\')
                .map_or(body.len(), |p| i + p);
            push_raw(&mut out, &body[i..run_end]);
            i = run_end;
            continue;
        }

        let escape_start = i;
        let named = body[i + 1];
        i += 2;
        match named {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{0008}'),
            b'f' => out.push('\u{000C}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            _ => {
                // scanner guarantees this is 'u' with 4 hex digits behind it
                let code = hex4(&body[i..i + UNICODE_ESCAPE_DIGITS]);
                i += UNICODE_ESCAPE_DIGITS;
                if is_high_surrogate(code) {
                    // a high surrogate must be followed by an escaped low one
                    let tail = &body[i..];
                    if tail.len() < 6 || tail[0] != b'\\' || tail[1] != b'u' {
                        return Err(DecodeError {
                            kind: DecodeErrorKind::InvalidUnicodeEscape,
                            offset: base + escape_start,
                        });
                    }
                    let low = hex4(&body[i + 2..i + 2 + UNICODE_ESCAPE_DIGITS]);
                    if !is_low_surrogate(low) {
                        return Err(DecodeError {
                            kind: DecodeErrorKind::InvalidUnicodeEscape,
                            offset: base + i,
                        });
                    }
                    i += 2 + UNICODE_ESCAPE_DIGITS;
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                } else if is_low_surrogate(code) {
                    return Err(DecodeError {
                        kind: DecodeErrorKind::InvalidUnicodeEscape,
                        offset: base + escape_start,
                    });
                } else {
                    out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                }
            }
        }
    }

    Ok(out)
}

/// Appends raw (escape-free) body bytes, replacing invalid UTF-8 sequences
/// with U+FFFD.
fn push_raw(out: &mut String, mut raw: &[u8]) {
    match core::str::from_utf8(raw) {
        Ok(text) => out.push_str(text),
        Err(_) => {
            while !raw.is_empty() {
                let (ch, len) = bstr::decode_utf8(raw);
                out.push(ch.unwrap_or('\u{FFFD}'));
                raw = &raw[len..];
            }
        }
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Writes `value` as a quoted, escaped JSON string. Also used to pre-escape
/// object keys at schema build time.
pub(crate) fn write_escaped(ctx: &mut EncodeContext, value: &str) {
    ctx.append(b'"');
    for &byte in value.as_bytes() {
        match byte {
            b'"' => ctx.append_bytes(b"\\\""),
            b'\\' => ctx.append_bytes(b"\\\\"),
            0x08 => ctx.append_bytes(b"\\b"),
            0x0C => ctx.append_bytes(b"\\f"),
            b'\n' => ctx.append_bytes(b"\\n"),
            b'\r' => ctx.append_bytes(b"\\r"),
            b'\t' => ctx.append_bytes(b"\\t"),
            0x00..=0x1F => {
                ctx.append_bytes(b"\\u00");
                ctx.append(HEX_DIGITS[usize::from(byte >> 4)]);
                ctx.append(HEX_DIGITS[usize::from(byte & 0xF)]);
            }
            _ => ctx.append(byte),
        }
    }
    ctx.append(b'"');
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::codec::{decode, encode};

    #[test]
    fn plain_string() {
        assert_eq!(decode(&StringCodec, br#""hello""#).unwrap(), "hello");
        assert_eq!(decode(&StringCodec, br#""""#).unwrap(), "");
    }

    #[test]
    fn named_escapes() {
        assert_eq!(
            decode(&StringCodec, br#""a\"b\\c\/d\b\f\n\r\t""#).unwrap(),
            "a\"b\\c/d\u{8}\u{c}\n\r\t"
        );
    }

    #[test]
    fn unicode_escapes() {
        assert_eq!(decode(&StringCodec, br#""\u0041""#).unwrap(), "A");
        assert_eq!(decode(&StringCodec, br#""\u00e9""#).unwrap(), "é");
        // surrogate pair: U+1D11E musical G clef
        assert_eq!(
            decode(&StringCodec, br#""\ud834\udd1e""#).unwrap(),
            "\u{1D11E}"
        );
    }

    #[test]
    fn lone_surrogates_are_rejected() {
        let err = decode(&StringCodec, br#""\ud834""#).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::InvalidUnicodeEscape);
        assert_eq!(err.offset, 1);

        let err = decode(&StringCodec, br#""\udd1e""#).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::InvalidUnicodeEscape);

        // high surrogate not followed by another escape
        let err = decode(&StringCodec, br#""\ud834A""#).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::InvalidUnicodeEscape);
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn multibyte_utf8_passes_through() {
        assert_eq!(decode(&StringCodec, "\"héllo ☃\"".as_bytes()).unwrap(), "héllo ☃");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(
            decode(&StringCodec, b"\"a\xFFb\"").unwrap(),
            "a\u{FFFD}b"
        );
    }

    #[test]
    fn encode_escapes_specials() {
        let out = encode(&StringCodec, &"a\"b\\c\n\u{1}".to_string()).unwrap();
        assert_eq!(out, br#""a\"b\\c\n\u0001""#);
    }

    #[test]
    fn escape_round_trip() {
        let original = "quote\" slash\\ ctrl\u{2} tab\t snow☃".to_string();
        let encoded = encode(&StringCodec, &original).unwrap();
        assert_eq!(decode(&StringCodec, &encoded).unwrap(), original);
    }
}
