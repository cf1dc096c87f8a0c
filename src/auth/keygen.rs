//! Random pre-shared key generation.
//!
//! Keys are drawn from a fixed alphabet that excludes the visually similar
//! characters `0`, `O`, `1` and `l`, so a generated key can be read out or
//! typed without ambiguity.

use rand::RngCore;
use rand::rngs::OsRng;

/// The key alphabet: digits and letters minus `0 O 1 l`, plus punctuation.
const KEY_ALPHABET: &[u8] =
    b"23456789ABCDEFGHIJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz#$!:.=+-/_";

/// Default generated key length, in characters.
pub const DEFAULT_KEY_LEN: usize = 32;

/// Generate a random pre-shared key of [`DEFAULT_KEY_LEN`] characters.
///
/// # Example
///
/// ```rust
/// let key = torch_auth::keygen::generate_key();
/// assert_eq!(key.len(), 32);
/// ```
pub fn generate_key() -> String {
    generate_key_len(DEFAULT_KEY_LEN)
}

/// Generate a random pre-shared key of the given length.
///
/// Each character is produced by reducing one byte from the OS secure
/// random source modulo the alphabet length.
pub fn generate_key_len(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|b| KEY_ALPHABET[*b as usize % KEY_ALPHABET.len()] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_length() {
        assert_eq!(generate_key().len(), DEFAULT_KEY_LEN);
    }

    #[test]
    fn test_custom_length() {
        assert_eq!(generate_key_len(64).len(), 64);
        assert_eq!(generate_key_len(0).len(), 0);
    }

    #[test]
    fn test_alphabet_excludes_ambiguous_characters() {
        for c in ['0', 'O', '1', 'l'] {
            assert!(!KEY_ALPHABET.contains(&(c as u8)));
        }
    }

    #[test]
    fn test_generated_keys_use_only_the_alphabet() {
        let key = generate_key_len(256);
        assert!(key.bytes().all(|b| KEY_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_keys_are_not_repeated() {
        // Astronomically unlikely to collide if the RNG is live
        assert_ne!(generate_key(), generate_key());
    }
}
