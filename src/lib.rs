//! # Torch Auth
//!
//! A Rust library for stateless, time-bounded request authentication using
//! HMAC and a symmetric pre-shared key.
//!
//! A token binds an optional ordered key/value payload to its issuance
//! timestamp with a keyed hash, so a server can validate a request using
//! only the shared key and the token's own contents: no session storage, no
//! revocation list, no identity provider.
//!
//! ## Features
//!
//! - **HMAC-SHA256 / HMAC-SHA512 signing**: closed algorithm set, named on
//!   the wire
//! - **Stateless verification**: expiry and signature are checked from the
//!   token alone
//! - **Order-preserving payloads**: the signed payload round-trips with its
//!   insertion order intact
//! - **Crash-proof boundary**: malformed or hostile tokens surface as
//!   errors, never panics
//! - **Hard-cutover key rotation**: the key is re-read on every call, so a
//!   rotated key invalidates all outstanding tokens immediately
//!
//! ## Quick Start
//!
//! ```rust
//! use torch_auth::{AuthConfig, Payload, TokenSigner, TokenVerifier};
//!
//! # fn example() -> Result<(), torch_auth::AuthError> {
//! // Shared secret, default 5 minute expiry
//! let config = AuthConfig::new("shared_secret_key");
//!
//! // Sign a payload
//! let mut payload = Payload::new();
//! payload.insert("user".to_string(), "lazaro".to_string());
//! let wire = TokenSigner::new(&config).sign(&payload)?.to_string();
//!
//! // Verify it elsewhere with the same configuration
//! let decoded = TokenVerifier::new(&config).verify(&wire)?;
//! assert_eq!(decoded.get("user").map(String::as_str), Some("lazaro"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Wire Format
//!
//! A token is one ASCII line of four comma-separated fields:
//!
//! ```text
//! SHA256,1503754961,user=lazaro&msg=wake+up%21+and+give+me+500%E2%82%AC,C48A4805A70DDB641A0C330A41FAED285D7131ECD46ED21096213150605EBA19
//! ```
//!
//! Callers typically carry it as `torch <token>` in the `Authentication`
//! header (see [`SCHEME`] and [`HTTP_HEADER`]); the library itself does no
//! transport.
//!
//! ## Architecture
//!
//! - [`TokenSigner`] / [`TokenVerifier`]: signing and the single-pass
//!   verification state machine
//! - [`Token`]: the parsed four-field wire form
//! - [`AuthConfig`]: pre-shared key plus expiry window, snapshotted per call
//! - [`codec`]: the canonical payload encoding that gets signed
//! - [`keygen`]: random pre-shared key generation

use indexmap::IndexMap;

pub mod auth;

// Re-export commonly used types
pub use auth::codec;
pub use auth::keygen;
pub use auth::{
    AuthConfig, AuthError, ConfigPreset, DEFAULT_EXPIRE, HashAlg, TimeProviderFn, Token,
    TokenSigner, TokenVerifier,
};

/// The HTTP header conventionally used to carry a token.
pub const HTTP_HEADER: &str = "Authentication";

/// The credential scheme name, as in `torch <token>`.
pub const SCHEME: &str = "torch";

/// An ordered key/value payload.
///
/// Insertion order is semantically significant: it is part of what gets
/// hashed, and it survives the encode/decode round trip. An empty payload
/// is valid and encodes to the empty string.
pub type Payload = IndexMap<String, String>;
