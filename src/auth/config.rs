use std::time::Duration;

use crate::auth::error::AuthError;
use crate::auth::keygen;

/// Default expiry window: 5 minutes, matching [`ConfigPreset::Production`].
pub const DEFAULT_EXPIRE: Duration = Duration::from_secs(300);

/// Predefined expiry presets for common deployment scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Production-ready: 5 minute expiry window, balancing security against
    /// network delays and clock skew.
    Production,

    /// Development-friendly: 10 minute window, more forgiving when stepping
    /// through requests by hand.
    Development,

    /// High-security: 1 minute window, minimizing the replay exposure of a
    /// captured token.
    HighSecurity,

    /// Read the expiry from the `TORCH_AUTH_EXPIRE` environment variable
    /// (seconds, default 300).
    FromEnv,
}

/// Shared configuration for signing and verification.
///
/// Holds the pre-shared key and the expiry window. Signers and verifiers
/// borrow the configuration and read it at the start of each call, so
/// replacing the key with [`AuthConfig::set_key`] is a hard cutover: every
/// previously issued token fails verification on the next call.
///
/// The core provides no locking; callers that mutate a shared configuration
/// concurrently must synchronize it themselves (for example behind an
/// `RwLock`).
///
/// # Example
///
/// ```rust
/// use torch_auth::{AuthConfig, ConfigPreset};
/// use std::time::Duration;
///
/// // Explicit key and window
/// let config = AuthConfig::new("shared_secret").with_expiry(Duration::from_secs(60))?;
///
/// // Preset window, random key
/// let config = AuthConfig::from(ConfigPreset::HighSecurity).with_random_key();
/// assert_eq!(config.key().len(), 32);
/// # Ok::<(), torch_auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AuthConfig {
    key: Vec<u8>,
    expiry: Duration,
}

impl Default for AuthConfig {
    /// Empty pre-shared key and the `TORCH_AUTH_EXPIRE` environment
    /// override, falling back to [`DEFAULT_EXPIRE`].
    fn default() -> Self {
        Self {
            key: Vec::new(),
            expiry: Duration::from_secs(
                std::env::var("TORCH_AUTH_EXPIRE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_EXPIRE.as_secs()),
            ),
        }
    }
}

impl AuthConfig {
    /// Creates a configuration with the given pre-shared key and the
    /// default expiry window.
    pub fn new(key: impl AsRef<[u8]>) -> Self {
        Self {
            key: key.as_ref().to_vec(),
            expiry: DEFAULT_EXPIRE,
        }
    }

    /// Sets the expiry window.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidExpiry`] if the window is zero. The invariant is
    /// enforced here, at configuration time, so verification never has to
    /// re-check it.
    pub fn with_expiry(mut self, expiry: Duration) -> Result<Self, AuthError> {
        if expiry.is_zero() {
            return Err(AuthError::InvalidExpiry);
        }
        self.expiry = expiry;
        Ok(self)
    }

    /// Replaces the pre-shared key with a freshly generated random one.
    ///
    /// See [`crate::keygen::generate_key`] for the alphabet and length.
    pub fn with_random_key(mut self) -> Self {
        self.key = keygen::generate_key().into_bytes();
        self
    }

    /// Replaces the pre-shared key in place.
    ///
    /// Rotation is a hard cutover: tokens signed under the old key become
    /// invalid for every verification that starts after this call.
    pub fn set_key(&mut self, key: impl AsRef<[u8]>) {
        self.key = key.as_ref().to_vec();
    }

    /// The pre-shared key bytes.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The expiry window.
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Validates the configuration and returns advisory warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.key.is_empty() {
            warnings.push("Empty pre-shared key offers no authentication".to_string());
        } else if self.key.len() < 16 {
            warnings.push("Short pre-shared key (< 16 bytes) weakens the HMAC".to_string());
        }

        if self.expiry.as_secs() > 3600 {
            warnings.push("Long expiry window (> 1 hour) increases replay exposure".to_string());
        }

        warnings
    }

    /// Returns a summary of the current configuration.
    ///
    /// The key itself is never included, only its length.
    pub fn summary(&self) -> String {
        format!(
            "AuthConfig {{ key: {} bytes, expiry: {}s }}",
            self.key.len(),
            self.expiry.as_secs(),
        )
    }
}

impl From<ConfigPreset> for AuthConfig {
    /// Builds a configuration with the preset's expiry window and an empty
    /// key; set the key afterwards.
    fn from(preset: ConfigPreset) -> Self {
        let expiry = match preset {
            ConfigPreset::Production => DEFAULT_EXPIRE,
            ConfigPreset::Development => Duration::from_secs(600),
            ConfigPreset::HighSecurity => Duration::from_secs(60),
            ConfigPreset::FromEnv => return Self::default(),
        };
        Self {
            key: Vec::new(),
            expiry,
        }
    }
}
