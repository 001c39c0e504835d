//! Verification challenge entity for SMS-based phone verification.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of verification attempts allowed per code
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default validity window for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_SECONDS: i64 = 300;

/// One outstanding verification attempt for a phone number
///
/// At most one challenge exists per normalized phone number. A challenge is
/// pending until it is verified, expires, or runs out of attempts; all three
/// outcomes remove it from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Normalized phone number (digits only, country code first)
    pub phone: String,

    /// The numeric verification code
    pub code: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp after which the code is no longer accepted
    pub expires_at: DateTime<Utc>,

    /// Number of verification attempts made against this code
    pub attempts: u32,

    /// Timestamp of the last successful delivery, if any
    pub last_sent_at: Option<DateTime<Utc>>,

    /// Set while one caller is sending this code; other callers must not send it
    #[serde(default)]
    pub delivery_in_flight: bool,
}

impl Challenge {
    /// Creates a new pending challenge
    ///
    /// # Arguments
    ///
    /// * `phone` - Normalized phone number the code belongs to
    /// * `code` - The generated code
    /// * `issued_at` - Issuance time as seen by the registry clock
    /// * `ttl` - Validity window
    pub fn new(phone: String, code: String, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            phone,
            code,
            issued_at,
            expires_at: issued_at + ttl,
            attempts: 0,
            last_sent_at: None,
            delivery_in_flight: false,
        }
    }

    /// Checks if the challenge has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// A challenge is live while it has neither expired nor used up its attempts
    pub fn is_live_at(&self, now: DateTime<Utc>, max_attempts: u32) -> bool {
        !self.is_expired_at(now) && self.attempts < max_attempts
    }

    /// Gets the number of remaining verification attempts
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Whether the code has reached the handset at least once
    pub fn was_delivered(&self) -> bool {
        self.last_sent_at.is_some()
    }
}
