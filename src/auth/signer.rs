use crate::Payload;
use crate::auth::algorithm::{HashAlg, MacContext};
use crate::auth::codec;
use crate::auth::config::AuthConfig;
use crate::auth::error::AuthError;
use crate::auth::time_utils::current_timestamp;
use crate::auth::wire::Token;

/// A function that provides the signing clock, in seconds since epoch.
pub type TimeProviderFn = Box<dyn Fn() -> Result<i64, AuthError> + Send + Sync>;

/// Issues signed tokens from a borrowed [`AuthConfig`].
///
/// The signer reads the configuration's key at the start of every
/// [`sign`](TokenSigner::sign) call, so a key rotated by the caller takes
/// effect on the next token issued. One signer can issue any number of
/// tokens.
///
/// # Example
///
/// ```rust
/// use torch_auth::{AuthConfig, HashAlg, Payload, TokenSigner};
///
/// let config = AuthConfig::new("shared_secret");
///
/// let mut payload = Payload::new();
/// payload.insert("user".to_string(), "lazaro".to_string());
///
/// let token = TokenSigner::new(&config)
///     .with_algorithm(HashAlg::Sha512)
///     .sign(&payload)?;
///
/// // The wire string, ready to send as `torch <token>` in a header
/// let wire = token.to_string();
/// assert!(wire.starts_with("SHA512,"));
/// # Ok::<(), torch_auth::AuthError>(())
/// ```
///
/// # Determinism
///
/// Signing is a pure function of (key, algorithm, payload, timestamp):
/// pinning the clock with [`with_time_provider`](TokenSigner::with_time_provider)
/// makes the output fully reproducible.
pub struct TokenSigner<'a> {
    config: &'a AuthConfig,
    algorithm: HashAlg,
    time_provider: TimeProviderFn,
}

impl<'a> TokenSigner<'a> {
    /// Creates a signer using HMAC-SHA256 and the system clock.
    pub fn new(config: &'a AuthConfig) -> Self {
        Self {
            config,
            algorithm: HashAlg::Sha256,
            time_provider: Box::new(current_timestamp),
        }
    }

    /// Selects the keyed-hash algorithm named in the issued tokens.
    pub fn with_algorithm(mut self, algorithm: HashAlg) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Replaces the clock, e.g. with a fixed timestamp in tests or an
    /// NTP-disciplined source in production.
    pub fn with_time_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn() -> Result<i64, AuthError> + Send + Sync + 'static,
    {
        self.time_provider = Box::new(provider);
        self
    }

    /// Signs a payload into a [`Token`].
    ///
    /// The payload is canonically encoded, then the hash is computed as
    /// `HMAC(key, be64(now) || encoded_payload_bytes)`.
    ///
    /// # Errors
    ///
    /// Signing errors propagate to the caller: a failing time provider or a
    /// broken MAC construction are reported rather than swallowed, since the
    /// caller controls all inputs on this side.
    pub fn sign(&self, payload: &Payload) -> Result<Token, AuthError> {
        let encoded_payload = codec::encode(payload);
        let issued_at = (self.time_provider)()?;
        let hash = mac_over(
            self.algorithm,
            self.config.key(),
            issued_at,
            &encoded_payload,
        )?
        .finalize();

        Ok(Token {
            algorithm: self.algorithm,
            issued_at,
            encoded_payload,
            hash,
        })
    }

    /// Signs a token carrying no payload.
    pub fn sign_empty(&self) -> Result<Token, AuthError> {
        self.sign(&Payload::new())
    }
}

/// The keyed-hash input both sides agree on: the 8-byte big-endian
/// timestamp followed by the canonical payload bytes. The signer finalizes
/// the returned context, the verifier compares against it.
pub(crate) fn mac_over(
    algorithm: HashAlg,
    key: &[u8],
    issued_at: i64,
    encoded_payload: &str,
) -> Result<MacContext, AuthError> {
    let mut mac = algorithm.mac(key)?;
    mac.update(&issued_at.to_be_bytes());
    mac.update(encoded_payload.as_bytes());
    Ok(mac)
}
