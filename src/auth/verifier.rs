use crate::Payload;
use crate::auth::codec;
use crate::auth::config::AuthConfig;
use crate::auth::error::AuthError;
use crate::auth::signer::{TimeProviderFn, mac_over};
use crate::auth::time_utils::{current_timestamp, is_expired};
use crate::auth::wire::Token;

/// Verifies presented tokens against a borrowed [`AuthConfig`].
///
/// Verification is a single pass over untrusted input: parse, resolve the
/// algorithm, check expiry, recompute the hash under the current key, and
/// compare in constant time. Any local failure short-circuits into an
/// error; nothing in this path can panic on attacker-controlled data.
///
/// Expiry is checked before the hash, so an expired genuine token and an
/// expired forgery are indistinguishable to the caller.
///
/// # Example
///
/// ```rust
/// use torch_auth::{AuthConfig, TokenSigner, TokenVerifier};
///
/// let config = AuthConfig::new("shared_secret");
/// let wire = TokenSigner::new(&config).sign_empty()?.to_string();
///
/// let verifier = TokenVerifier::new(&config);
/// assert!(verifier.is_valid(&wire));
/// assert!(!verifier.is_valid("SHA256,0,,AABB"));
/// # Ok::<(), torch_auth::AuthError>(())
/// ```
pub struct TokenVerifier<'a> {
    config: &'a AuthConfig,
    time_provider: TimeProviderFn,
}

impl<'a> TokenVerifier<'a> {
    /// Creates a verifier using the system clock.
    pub fn new(config: &'a AuthConfig) -> Self {
        Self {
            config,
            time_provider: Box::new(current_timestamp),
        }
    }

    /// Replaces the clock used for the expiry check.
    pub fn with_time_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn() -> Result<i64, AuthError> + Send + Sync + 'static,
    {
        self.time_provider = Box::new(provider);
        self
    }

    /// Verifies a wire string and returns its decoded payload.
    ///
    /// The hash is recomputed over the presented encoded-payload bytes with
    /// the key held by the configuration *now*, not the key at issuance
    /// time; key rotation invalidates outstanding tokens immediately. The
    /// payload is only decoded once the hash has been accepted.
    ///
    /// # Errors
    ///
    /// One [`AuthError`] per failed verification step. Callers that only
    /// need a yes/no signal should use [`is_valid`](TokenVerifier::is_valid)
    /// or [`decode`](TokenVerifier::decode), which discard the reason.
    pub fn verify(&self, wire: &str) -> Result<Payload, AuthError> {
        // Consistent snapshot of key and expiry for the whole pass
        let key = self.config.key();
        let expiry = self.config.expiry();

        let token = Token::parse(wire)?;
        let now = (self.time_provider)()?;

        if is_expired(token.issued_at, expiry, now) {
            return Err(AuthError::Expired);
        }

        mac_over(token.algorithm, key, token.issued_at, &token.encoded_payload)?
            .verify(&token.hash)?;

        codec::decode(&token.encoded_payload)
    }

    /// Boolean boundary over [`verify`](TokenVerifier::verify).
    ///
    /// The failure reason is logged at debug level and discarded.
    pub fn is_valid(&self, wire: &str) -> bool {
        match self.verify(wire) {
            Ok(_) => true,
            Err(reason) => {
                tracing::debug!(%reason, "token rejected");
                false
            }
        }
    }

    /// Decoding boundary over [`verify`](TokenVerifier::verify): the
    /// payload on success, `None` on any failure.
    pub fn decode(&self, wire: &str) -> Option<Payload> {
        match self.verify(wire) {
            Ok(payload) => Some(payload),
            Err(reason) => {
                tracing::debug!(%reason, "token rejected");
                None
            }
        }
    }
}
