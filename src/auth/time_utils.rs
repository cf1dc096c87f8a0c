//! Time utilities for safe timestamp handling.
//!
//! Safe alternatives to direct `SystemTime` operations that could
//! otherwise panic.

use crate::auth::error::AuthError;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Get current timestamp in seconds since Unix epoch.
///
/// In the extremely rare case where system time is before the Unix epoch,
/// this returns an error instead of panicking.
pub(crate) fn current_timestamp() -> Result<i64, AuthError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|_| AuthError::CryptoError("system time is before Unix epoch".to_string()))
}

/// Check whether an issuance timestamp has fallen out of the expiry window.
///
/// A token is live while `issued_at + expiry >= now`. The check is
/// one-sided: a timestamp in the future (clock skew between signer and
/// verifier) is accepted. The addition saturates so an arbitrarily large
/// window cannot overflow.
pub(crate) fn is_expired(issued_at: i64, expiry: Duration, now: i64) -> bool {
    let window = i64::try_from(expiry.as_secs()).unwrap_or(i64::MAX);
    issued_at.saturating_add(window) < now
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_timestamp() {
        let ts = current_timestamp().unwrap();
        // Should be a reasonable timestamp (after year 2020)
        assert!(ts > 1577836800); // 2020-01-01 00:00:00 UTC
    }

    #[test]
    fn test_expiry_boundary() {
        let window = Duration::from_secs(60);

        // Exactly on the boundary: still valid
        assert!(!is_expired(940, window, 1000));

        // One second past the boundary: expired
        assert!(is_expired(939, window, 1000));
    }

    #[test]
    fn test_future_timestamp_accepted() {
        // Clock skew: a token issued "in the future" is not expired
        assert!(!is_expired(2000, Duration::from_secs(60), 1000));
    }

    #[test]
    fn test_huge_window_does_not_overflow() {
        assert!(!is_expired(
            1503752846,
            Duration::from_secs(u64::MAX),
            i64::MAX
        ));
    }
}
