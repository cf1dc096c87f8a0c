//! Canonical payload encoding.
//!
//! Serializes an insertion-ordered key/value payload into one deterministic
//! string, in the style of `application/x-www-form-urlencoded`: keys and
//! values are percent-encoded independently (space becomes `+`), joined with
//! `=`, and pairs are joined with `&`. The encoding is what gets signed, so
//! it must be byte-for-byte stable across implementations.

use std::fmt::Write;

use crate::Payload;
use crate::auth::error::AuthError;

/// Bytes that survive encoding untouched.
///
/// ASCII alphanumerics plus `*`, `-`, `.` and `_`; everything else is
/// emitted as UTF-8 bytes in `%XX` form, except space which becomes `+`.
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'*' | b'-' | b'.' | b'_')
}

/// Encode a payload into its canonical string form.
///
/// Pairs are emitted in insertion order with no trailing delimiter. An empty
/// payload encodes to the empty string.
///
/// # Example
///
/// ```rust
/// use torch_auth::{Payload, codec};
///
/// let mut payload = Payload::new();
/// payload.insert("user".to_string(), "lazaro".to_string());
/// payload.insert("msg".to_string(), "wake up! and give me 500€".to_string());
///
/// assert_eq!(
///     codec::encode(&payload),
///     "user=lazaro&msg=wake+up%21+and+give+me+500%E2%82%AC"
/// );
/// ```
pub fn encode(payload: &Payload) -> String {
    let mut out = String::new();
    for (i, (key, value)) in payload.iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        encode_component(key, &mut out);
        out.push('=');
        encode_component(value, &mut out);
    }
    out
}

fn encode_component(s: &str, out: &mut String) {
    for &b in s.as_bytes() {
        if b == b' ' {
            out.push('+');
        } else if is_unreserved(b) {
            out.push(b as char);
        } else {
            // String formatting is infallible
            let _ = write!(out, "%{b:02X}");
        }
    }
}

/// Decode a canonical string back into a payload, preserving pair order.
///
/// The scanner walks left to right: `=` closes the pending key, `&` closes
/// the pending value and emits the pair. Two end-of-input cases are defined
/// explicitly:
///
/// - a trailing pair with nothing after its `=` keeps an empty value, so
///   `"a="` decodes to `{a: ""}`;
/// - a trailing bare segment with no `=` decodes as a key mapped to the
///   empty string, so `"abc"` decodes to `{abc: ""}`.
///
/// # Errors
///
/// Returns [`AuthError::EncodingError`] for truncated or non-hex percent
/// escapes and for byte sequences that are not valid UTF-8 after decoding.
pub fn decode(data: &str) -> Result<Payload, AuthError> {
    let mut map = Payload::new();
    let mut buf = String::new();
    let mut key = String::new();
    let mut reading_value = false;

    for c in data.chars() {
        match c {
            '=' => {
                key = decode_component(&buf)?;
                buf.clear();
                reading_value = true;
            }
            '&' => {
                let value = decode_component(&buf)?;
                buf.clear();
                map.insert(std::mem::take(&mut key), value);
                reading_value = false;
            }
            _ => buf.push(c),
        }
    }

    if reading_value {
        map.insert(key, decode_component(&buf)?);
    } else if !buf.is_empty() {
        map.insert(decode_component(&buf)?, String::new());
    }

    Ok(map)
}

fn decode_component(s: &str) -> Result<String, AuthError> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hi = bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16));
                let lo = bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16));
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        out.push(((hi << 4) | lo) as u8);
                        i += 3;
                    }
                    _ => {
                        return Err(AuthError::EncodingError(format!(
                            "invalid percent escape at byte {i}"
                        )));
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(out)
        .map_err(|_| AuthError::EncodingError("decoded bytes are not valid UTF-8".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(pairs: &[(&str, &str)]) -> Payload {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_payload_encodes_to_empty_string() {
        assert_eq!(encode(&Payload::new()), "");
        assert_eq!(decode("").unwrap(), Payload::new());
    }

    #[test]
    fn test_reference_encoding() {
        let p = payload(&[("user", "lazaro"), ("msg", "wake up! and give me 500€")]);
        assert_eq!(
            encode(&p),
            "user=lazaro&msg=wake+up%21+and+give+me+500%E2%82%AC"
        );
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let p = payload(&[("zeta", "1"), ("alpha", "2"), ("mid dle", "a&b=c"), ("€", "!")]);
        let decoded = decode(&encode(&p)).unwrap();
        assert_eq!(decoded, p);
        let keys: Vec<&String> = decoded.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid dle", "€"]);
    }

    #[test]
    fn test_delimiters_are_escaped() {
        let p = payload(&[("a=b", "c&d"), ("e,f", "g%h")]);
        let encoded = encode(&p);
        assert_eq!(encoded, "a%3Db=c%26d&e%2Cf=g%25h");
        assert_eq!(decode(&encoded).unwrap(), p);
    }

    #[test]
    fn test_single_pair_no_ampersand() {
        assert_eq!(decode("key=value").unwrap(), payload(&[("key", "value")]));
    }

    #[test]
    fn test_trailing_empty_value_kept() {
        assert_eq!(decode("a=").unwrap(), payload(&[("a", "")]));
        assert_eq!(decode("a=1&b=").unwrap(), payload(&[("a", "1"), ("b", "")]));
    }

    #[test]
    fn test_trailing_bare_key_maps_to_empty_string() {
        assert_eq!(decode("abc").unwrap(), payload(&[("abc", "")]));
        assert_eq!(decode("a=1&bare").unwrap(), payload(&[("a", "1"), ("bare", "")]));
    }

    #[test]
    fn test_plus_decodes_to_space() {
        assert_eq!(decode("k=a+b").unwrap(), payload(&[("k", "a b")]));
    }

    #[test]
    fn test_malformed_percent_escapes() {
        assert!(matches!(decode("k=%"), Err(AuthError::EncodingError(_))));
        assert!(matches!(decode("k=%2"), Err(AuthError::EncodingError(_))));
        assert!(matches!(decode("k=%zz"), Err(AuthError::EncodingError(_))));
    }

    #[test]
    fn test_invalid_utf8_after_decoding() {
        // 0xFF is never valid UTF-8
        assert!(matches!(decode("k=%FF"), Err(AuthError::EncodingError(_))));
    }

    #[test]
    fn test_duplicate_key_keeps_first_position_last_value() {
        let decoded = decode("a=1&b=2&a=3").unwrap();
        let entries: Vec<(&String, &String)> = decoded.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (&"a".to_string(), &"3".to_string()));
        assert_eq!(entries[1], (&"b".to_string(), &"2".to_string()));
    }
}
