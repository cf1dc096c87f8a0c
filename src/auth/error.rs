use thiserror::Error;

/// Error types that can occur during token signing and verification.
///
/// Each variant corresponds to a specific failure mode in the token
/// lifecycle. Verification-side variants are ordinary `Err` values; the
/// boundary helpers [`crate::TokenVerifier::is_valid`] and
/// [`crate::TokenVerifier::decode`] reduce them to a `bool`/`Option` so that
/// attacker-controlled input can never crash a caller.
///
/// # Error Categories
///
/// - **Configuration errors**: `InvalidExpiry`, `CryptoError` — fail fast,
///   before any token is processed
/// - **Verification failures**: `UnknownAlgorithm`, `MalformedToken`,
///   `EncodingError`, `Expired`, `SignatureMismatch`
///
/// # Example
///
/// ```rust
/// use torch_auth::{AuthConfig, AuthError, TokenSigner, TokenVerifier};
///
/// # fn example() -> Result<(), AuthError> {
/// let config = AuthConfig::new("shared_secret");
/// let token = TokenSigner::new(&config).sign_empty()?.to_string();
///
/// match TokenVerifier::new(&config).verify(&token) {
///     Ok(payload) => println!("verified, {} payload entries", payload.len()),
///     Err(AuthError::Expired) => println!("token too old"),
///     Err(AuthError::SignatureMismatch) => println!("bad signature"),
///     Err(e) => println!("rejected: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum AuthError {
    /// The configured expiry window is not a positive number of seconds.
    ///
    /// Raised at configuration time by [`crate::AuthConfig::with_expiry`],
    /// never during verification.
    #[error("expiry must be greater than zero")]
    InvalidExpiry,

    /// The token names a hash algorithm that is not in the registry.
    ///
    /// Only `SHA256` and `SHA512` are supported; anything else on the wire
    /// is rejected here before any cryptographic work happens.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// The token string does not match the wire format.
    ///
    /// Wrong field count, a non-numeric timestamp, or a hash field that is
    /// not valid hexadecimal all land here.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The canonical payload encoding could not be decoded.
    ///
    /// Truncated or non-hex percent escapes and byte sequences that are not
    /// valid UTF-8 after decoding are reported as this variant.
    #[error("payload encoding error: {0}")]
    EncodingError(String),

    /// The token's issuance timestamp is outside the expiry window.
    ///
    /// Expiry is checked before the signature, so an expired-but-genuine
    /// token and an expired forgery are indistinguishable to the caller.
    #[error("token expired")]
    Expired,

    /// The recomputed HMAC does not match the presented hash.
    ///
    /// Indicates tampering, or signer and verifier holding different
    /// pre-shared keys.
    #[error("signature mismatch")]
    SignatureMismatch,

    /// A cryptographic primitive or the system clock failed.
    ///
    /// With the bundled HMAC constructions this is essentially unreachable,
    /// but the startup self-check and the clock read both report through it.
    #[error("crypto error: {0}")]
    CryptoError(String),
}
