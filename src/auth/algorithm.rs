//! Keyed-hash algorithm registry.
//!
//! A closed set of HMAC constructions identified by their wire names. Each
//! variant hands out a fresh [`MacContext`] per operation; contexts are
//! single-use and verification goes through the constant-time comparison
//! provided by the underlying MAC implementation.

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};

use crate::auth::error::AuthError;

/// A keyed-hash algorithm supported on the wire.
///
/// The set is closed: tokens naming anything else are rejected during
/// parsing with [`AuthError::UnknownAlgorithm`].
///
/// # Example
///
/// ```rust
/// use torch_auth::HashAlg;
///
/// let alg: HashAlg = "SHA256".parse()?;
/// assert_eq!(alg, HashAlg::Sha256);
/// assert_eq!(alg.name(), "SHA256");
/// # Ok::<(), torch_auth::AuthError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlg {
    /// HMAC with SHA-256, 32-byte digest. The default algorithm.
    Sha256,
    /// HMAC with SHA-512, 64-byte digest.
    Sha512,
}

impl HashAlg {
    /// Every supported algorithm, in registry order.
    pub const ALL: [HashAlg; 2] = [HashAlg::Sha256, HashAlg::Sha512];

    /// The identifier used in the first field of the wire format.
    pub fn name(self) -> &'static str {
        match self {
            HashAlg::Sha256 => "SHA256",
            HashAlg::Sha512 => "SHA512",
        }
    }

    /// Resolve a wire name back to an algorithm.
    pub fn from_name(name: &str) -> Result<Self, AuthError> {
        match name {
            "SHA256" => Ok(HashAlg::Sha256),
            "SHA512" => Ok(HashAlg::Sha512),
            other => Err(AuthError::UnknownAlgorithm(other.to_string())),
        }
    }

    /// Length of this algorithm's digest in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            HashAlg::Sha256 => 32,
            HashAlg::Sha512 => 64,
        }
    }

    /// Create a fresh keyed-hash context for one sign or verify operation.
    pub(crate) fn mac(self, key: &[u8]) -> Result<MacContext, AuthError> {
        let context = match self {
            HashAlg::Sha256 => MacContext::Sha256(
                Hmac::<Sha256>::new_from_slice(key)
                    .map_err(|e| AuthError::CryptoError(format!("invalid HMAC key: {e}")))?,
            ),
            HashAlg::Sha512 => MacContext::Sha512(
                Hmac::<Sha512>::new_from_slice(key)
                    .map_err(|e| AuthError::CryptoError(format!("invalid HMAC key: {e}")))?,
            ),
        };
        Ok(context)
    }

    /// Eagerly verify that every registered construction is usable.
    ///
    /// The underlying constructions are compiled in, so this cannot fail in
    /// practice; it exists as an explicit startup hook so deployments can
    /// treat a broken registry as fatal before serving any traffic.
    pub fn self_check() -> Result<(), AuthError> {
        for alg in HashAlg::ALL {
            alg.mac(b"")?;
        }
        Ok(())
    }
}

impl fmt::Display for HashAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlg {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashAlg::from_name(s)
    }
}

/// A single-use keyed-hash computation.
///
/// `update` may be called any number of times, accumulating input;
/// `finalize` or `verify` consumes the context.
pub(crate) enum MacContext {
    Sha256(Hmac<Sha256>),
    Sha512(Hmac<Sha512>),
}

impl MacContext {
    pub(crate) fn update(&mut self, data: &[u8]) {
        match self {
            MacContext::Sha256(mac) => mac.update(data),
            MacContext::Sha512(mac) => mac.update(data),
        }
    }

    pub(crate) fn finalize(self) -> Vec<u8> {
        match self {
            MacContext::Sha256(mac) => mac.finalize().into_bytes().to_vec(),
            MacContext::Sha512(mac) => mac.finalize().into_bytes().to_vec(),
        }
    }

    /// Constant-time comparison against a presented digest.
    pub(crate) fn verify(self, presented: &[u8]) -> Result<(), AuthError> {
        match self {
            MacContext::Sha256(mac) => mac
                .verify_slice(presented)
                .map_err(|_| AuthError::SignatureMismatch),
            MacContext::Sha512(mac) => mac
                .verify_slice(presented)
                .map_err(|_| AuthError::SignatureMismatch),
        }
    }
}
