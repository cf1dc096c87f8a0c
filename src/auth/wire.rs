//! Token wire format.
//!
//! A token is a single ASCII line of exactly four comma-separated fields:
//!
//! ```text
//! ALGNAME,UNIXTS,ENCODEDPAYLOAD,HEXHASH
//! ```
//!
//! The payload field is the canonical encoding from [`crate::codec`], which
//! never emits a raw comma, so no escaping is needed at this layer. The hash
//! is rendered as uppercase hex and accepted in either case.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::auth::algorithm::HashAlg;
use crate::auth::error::AuthError;

/// A signed authentication token.
///
/// Produced by [`crate::TokenSigner::sign`] and never mutated afterwards.
/// `Display` renders the wire string; [`Token::parse`] (or `FromStr`)
/// reverses it. Serde serializes the token as its wire string, so it can be
/// embedded directly in JSON request structures or headers.
///
/// # Example
///
/// ```rust
/// use torch_auth::Token;
///
/// let token: Token =
///     "SHA256,1503754961,,40165BDD970907E4334BBBF0FEFFC77A01CC6EA5870C6F9CD64FD8241455FC1F"
///         .parse()?;
/// assert_eq!(token.issued_at, 1503754961);
/// assert!(token.encoded_payload.is_empty());
/// # Ok::<(), torch_auth::AuthError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The keyed-hash algorithm named in the first field.
    pub algorithm: HashAlg,
    /// Unix timestamp (seconds) at which the token was signed.
    pub issued_at: i64,
    /// The canonical payload encoding, exactly as presented on the wire.
    ///
    /// Verification recomputes the hash over these bytes as-is; the decoded
    /// payload is only derived after the hash has been accepted.
    pub encoded_payload: String,
    /// The raw HMAC digest.
    pub hash: Vec<u8>,
}

impl Token {
    /// Parse a wire string into its four fields.
    ///
    /// # Errors
    ///
    /// [`AuthError::MalformedToken`] if the string does not split into
    /// exactly four comma-separated fields, the timestamp is not a decimal
    /// integer, or the hash field is not valid hex;
    /// [`AuthError::UnknownAlgorithm`] if the algorithm name is not
    /// registered.
    pub fn parse(s: &str) -> Result<Self, AuthError> {
        let fields: Vec<&str> = s.split(',').collect();
        let &[alg, ts, payload, hash] = fields.as_slice() else {
            return Err(AuthError::MalformedToken(format!(
                "expected 4 fields, found {}",
                fields.len()
            )));
        };

        Ok(Token {
            algorithm: HashAlg::from_name(alg)?,
            issued_at: ts
                .parse()
                .map_err(|_| AuthError::MalformedToken(format!("invalid timestamp: {ts:?}")))?,
            encoded_payload: payload.to_string(),
            hash: hex::decode(hash)
                .map_err(|e| AuthError::MalformedToken(format!("invalid hash hex: {e}")))?,
        })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.algorithm,
            self.issued_at,
            self.encoded_payload,
            hex::encode_upper(&self.hash)
        )
    }
}

impl FromStr for Token {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::parse(s)
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Token::parse(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_PAYLOAD_TOKEN: &str =
        "SHA256,1503754961,,40165BDD970907E4334BBBF0FEFFC77A01CC6EA5870C6F9CD64FD8241455FC1F";

    #[test]
    fn test_parse_reference_token() {
        let token = Token::parse(EMPTY_PAYLOAD_TOKEN).unwrap();
        assert_eq!(token.algorithm, HashAlg::Sha256);
        assert_eq!(token.issued_at, 1503754961);
        assert_eq!(token.encoded_payload, "");
        assert_eq!(token.hash.len(), 32);
    }

    #[test]
    fn test_display_round_trip() {
        let token = Token::parse(EMPTY_PAYLOAD_TOKEN).unwrap();
        assert_eq!(token.to_string(), EMPTY_PAYLOAD_TOKEN);
    }

    #[test]
    fn test_lowercase_hash_accepted_rendered_uppercase() {
        let lower = EMPTY_PAYLOAD_TOKEN.to_lowercase().replace("sha256", "SHA256");
        let token = Token::parse(&lower).unwrap();
        assert_eq!(token.to_string(), EMPTY_PAYLOAD_TOKEN);
    }

    #[test]
    fn test_wrong_field_count_rejected() {
        assert!(matches!(
            Token::parse("SHA256,1503754961,AABB"),
            Err(AuthError::MalformedToken(_))
        ));
        assert!(matches!(
            Token::parse("SHA256,1503754961,,AABB,extra"),
            Err(AuthError::MalformedToken(_))
        ));
        assert!(matches!(
            Token::parse(""),
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        assert!(matches!(
            Token::parse("SHA256,notanumber,,AABB"),
            Err(AuthError::MalformedToken(_))
        ));
        assert!(matches!(
            Token::parse("SHA256,,,AABB"),
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        assert!(matches!(
            Token::parse("MD5,1503754961,,AABB"),
            Err(AuthError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_bad_hex_rejected() {
        assert!(matches!(
            Token::parse("SHA256,1503754961,,ZZZZ"),
            Err(AuthError::MalformedToken(_))
        ));
        // Odd-length hex
        assert!(matches!(
            Token::parse("SHA256,1503754961,,ABC"),
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_payload_field_preserved_verbatim() {
        let token = Token::parse("SHA512,1,user=lazaro&msg=wake+up%21,AABBCC").unwrap();
        assert_eq!(token.encoded_payload, "user=lazaro&msg=wake+up%21");
        assert_eq!(token.hash, vec![0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_serde_round_trips_as_wire_string() {
        let token = Token::parse(EMPTY_PAYLOAD_TOKEN).unwrap();
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, format!("\"{EMPTY_PAYLOAD_TOKEN}\""));

        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);

        assert!(serde_json::from_str::<Token>("\"garbage\"").is_err());
    }
}
