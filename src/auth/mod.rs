// Core components
mod algorithm;
mod config;
mod error;
mod signer;
mod time_utils;
mod verifier;
mod wire;

// Canonical payload encoding and key generation
pub mod codec;
pub mod keygen;

// Core component exports
pub use algorithm::HashAlg;
pub use config::{AuthConfig, ConfigPreset, DEFAULT_EXPIRE};
pub use error::AuthError;
pub use signer::{TimeProviderFn, TokenSigner};
pub use verifier::TokenVerifier;
pub use wire::Token;
