//! In-memory registry of outstanding verification challenges
//!
//! The registry owns every [`Challenge`] for the lifetime of the process.
//! Nothing is persisted and nothing sweeps in the background: expiry is
//! checked lazily whenever a number is touched, so memory held by an
//! abandoned challenge is reclaimed on the next access to the same number
//! (or by an explicit [`OtpRegistry::purge_expired`] call).
//!
//! All mutations happen under a single lock, which serializes `issue` and
//! `verify` for the same number. Two concurrent wrong guesses can therefore
//! never both observe the same attempt count.

use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use ev_shared::config::VerificationConfig;
use ev_shared::phone::mask_phone_number;

use crate::domain::entities::challenge::{
    Challenge, CODE_LENGTH, DEFAULT_EXPIRATION_SECONDS, MAX_ATTEMPTS,
};
use crate::errors::VerificationError;
use crate::services::clock::{Clock, SystemClock};

use super::code::{codes_match, generate_code};

/// Code policy applied by the registry
#[derive(Debug, Clone)]
pub struct OtpPolicy {
    /// Validity window of a code
    pub code_ttl: Duration,
    /// Attempts allowed per code (at least 1)
    pub max_attempts: u32,
    /// Number of digits per code
    pub code_length: usize,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            code_ttl: Duration::seconds(DEFAULT_EXPIRATION_SECONDS),
            max_attempts: MAX_ATTEMPTS,
            code_length: CODE_LENGTH,
        }
    }
}

impl From<&VerificationConfig> for OtpPolicy {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_ttl: Duration::seconds(config.code_ttl_seconds),
            max_attempts: config.max_attempts.max(1),
            code_length: config.code_length,
        }
    }
}

/// Result of a verification attempt, decided while the lock is held
enum Attempt {
    Verified,
    Expired,
    Exhausted,
    Mismatch { remaining: u32 },
}

/// Registry of live challenges keyed by normalized phone number
pub struct OtpRegistry {
    challenges: Mutex<HashMap<String, Challenge>>,
    clock: Arc<dyn Clock>,
    policy: OtpPolicy,
}

impl OtpRegistry {
    /// Create a registry with an explicit policy and clock
    pub fn new(policy: OtpPolicy, clock: Arc<dyn Clock>) -> Self {
        let policy = OtpPolicy {
            max_attempts: policy.max_attempts.max(1),
            ..policy
        };
        Self {
            challenges: Mutex::new(HashMap::new()),
            clock,
            policy,
        }
    }

    /// Create a registry with the default policy and the wall clock
    pub fn with_defaults() -> Self {
        Self::new(OtpPolicy::default(), Arc::new(SystemClock))
    }

    pub fn policy(&self) -> &OtpPolicy {
        &self.policy
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    // The map is only ever mutated by single insert/remove/field updates, so
    // a panic elsewhere cannot leave it half-written.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Challenge>> {
        self.challenges.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a challenge for a phone number
    ///
    /// If a live challenge already exists it is returned unchanged, so
    /// repeated requests never mint a second code. Otherwise a new code is
    /// generated and stored, replacing any expired entry.
    ///
    /// # Arguments
    ///
    /// * `phone` - Normalized phone number, already validated by the caller
    pub fn issue(&self, phone: &str) -> Challenge {
        let now = self.clock.now();
        let mut challenges = self.lock();

        if let Some(existing) = challenges.get(phone) {
            if existing.is_live_at(now, self.policy.max_attempts) {
                debug!(
                    phone = %mask_phone_number(phone),
                    event = "otp_reused",
                    attempts = existing.attempts,
                    "Live verification code exists, returning it unchanged"
                );
                return existing.clone();
            }
        }

        let challenge = Challenge::new(
            phone.to_string(),
            generate_code(self.policy.code_length),
            now,
            self.policy.code_ttl,
        );
        challenges.insert(phone.to_string(), challenge.clone());

        info!(
            phone = %mask_phone_number(phone),
            event = "otp_generated",
            expires_at = %challenge.expires_at,
            "Generated new verification code"
        );

        challenge
    }

    /// Check a submitted code against the live challenge
    ///
    /// Every call that reaches a pending challenge consumes one attempt.
    /// A match removes the challenge (codes are single-use). A mismatch
    /// leaves it in place until the attempt that reaches the cap, which
    /// removes it and reports [`VerificationError::TooManyAttempts`].
    ///
    /// # Errors
    ///
    /// * `NotFound` - no challenge for this number
    /// * `Expired` - the challenge aged out; it is removed
    /// * `TooManyAttempts` - this wrong guess used the last attempt; it is removed
    /// * `CodeMismatch` - wrong code, attempts remain
    pub fn check(&self, phone: &str, submitted: &str) -> Result<(), VerificationError> {
        let now = self.clock.now();
        let max_attempts = self.policy.max_attempts;
        let mut challenges = self.lock();

        let attempt = match challenges.get_mut(phone) {
            None => {
                debug!(
                    phone = %mask_phone_number(phone),
                    event = "otp_not_found",
                    "Verification attempted without a live code"
                );
                return Err(VerificationError::NotFound);
            }
            Some(challenge) if challenge.is_expired_at(now) => Attempt::Expired,
            Some(challenge) => {
                challenge.attempts += 1;
                if codes_match(&challenge.code, submitted) {
                    Attempt::Verified
                } else if challenge.attempts >= max_attempts {
                    Attempt::Exhausted
                } else {
                    Attempt::Mismatch {
                        remaining: challenge.remaining_attempts(max_attempts),
                    }
                }
            }
        };

        match attempt {
            Attempt::Verified => {
                challenges.remove(phone);
                info!(
                    phone = %mask_phone_number(phone),
                    event = "otp_verified_success",
                    "Verification code successfully verified"
                );
                Ok(())
            }
            Attempt::Expired => {
                challenges.remove(phone);
                warn!(
                    phone = %mask_phone_number(phone),
                    event = "otp_expired",
                    "Verification code expired"
                );
                Err(VerificationError::Expired)
            }
            Attempt::Exhausted => {
                challenges.remove(phone);
                warn!(
                    phone = %mask_phone_number(phone),
                    event = "max_attempts_exceeded",
                    "Maximum verification attempts exceeded, code invalidated"
                );
                Err(VerificationError::TooManyAttempts)
            }
            Attempt::Mismatch { remaining } => {
                warn!(
                    phone = %mask_phone_number(phone),
                    event = "otp_verification_failed",
                    remaining_attempts = remaining,
                    "Verification code mismatch"
                );
                Err(VerificationError::CodeMismatch {
                    remaining_attempts: remaining,
                })
            }
        }
    }

    /// Verify a submitted code
    ///
    /// Same as [`OtpRegistry::check`] but reports a wrong code with attempts
    /// left as `Ok(false)` rather than an error.
    pub fn verify(&self, phone: &str, submitted: &str) -> Result<bool, VerificationError> {
        match self.check(phone, submitted) {
            Ok(()) => Ok(true),
            Err(VerificationError::CodeMismatch { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Read the live challenge for a number without consuming an attempt
    ///
    /// An expired entry found here is dropped.
    pub fn peek(&self, phone: &str) -> Option<Challenge> {
        let now = self.clock.now();
        let mut challenges = self.lock();

        match challenges.get(phone) {
            Some(challenge) if challenge.is_live_at(now, self.policy.max_attempts) => {
                Some(challenge.clone())
            }
            Some(_) => {
                challenges.remove(phone);
                None
            }
            None => None,
        }
    }

    /// Reserve the right to send `code` to `phone`
    ///
    /// Only one caller at a time holds the claim, so a double submission
    /// cannot put the same code on the wire twice. Returns `false` when the
    /// challenge is gone, was replaced, or is already being sent. The claim
    /// is released by [`OtpRegistry::mark_delivered`],
    /// [`OtpRegistry::mark_undelivered`] or [`OtpRegistry::release_delivery`].
    pub fn claim_delivery(&self, phone: &str, code: &str) -> bool {
        let mut challenges = self.lock();

        match challenges.get_mut(phone) {
            Some(challenge) if challenge.code == code && !challenge.delivery_in_flight => {
                challenge.delivery_in_flight = true;
                true
            }
            _ => {
                debug!(
                    phone = %mask_phone_number(phone),
                    event = "otp_send_in_flight",
                    "Verification code is already being sent"
                );
                false
            }
        }
    }

    /// Record a successful delivery of `code` to `phone`
    ///
    /// Returns `false` when the challenge is gone or was replaced by a newer
    /// code in the meantime.
    pub fn mark_delivered(&self, phone: &str, code: &str) -> bool {
        let now = self.clock.now();
        let mut challenges = self.lock();

        match challenges.get_mut(phone) {
            Some(challenge) if challenge.code == code => {
                challenge.last_sent_at = Some(now);
                challenge.delivery_in_flight = false;
                true
            }
            _ => false,
        }
    }

    /// Record that the latest delivery of `code` failed
    pub fn mark_undelivered(&self, phone: &str, code: &str) {
        let mut challenges = self.lock();
        if let Some(challenge) = challenges.get_mut(phone) {
            if challenge.code == code {
                challenge.last_sent_at = None;
                challenge.delivery_in_flight = false;
            }
        }
    }

    /// Give up a delivery claim without recording an outcome
    pub fn release_delivery(&self, phone: &str, code: &str) {
        let mut challenges = self.lock();
        if let Some(challenge) = challenges.get_mut(phone) {
            if challenge.code == code {
                challenge.delivery_in_flight = false;
            }
        }
    }

    /// Decide whether the live code may be sent again
    ///
    /// * `Ok(Some(challenge))` - live challenge whose last delivery is older
    ///   than `cooldown` (or never succeeded)
    /// * `Ok(None)` - no live challenge, a new one has to be issued
    /// * `Err(CooldownActive)` - delivered too recently
    pub fn resend_candidate(
        &self,
        phone: &str,
        cooldown: Duration,
    ) -> Result<Option<Challenge>, VerificationError> {
        let now = self.clock.now();
        let mut challenges = self.lock();

        let challenge = match challenges.get(phone) {
            Some(challenge) if challenge.is_live_at(now, self.policy.max_attempts) => challenge,
            Some(_) => {
                challenges.remove(phone);
                return Ok(None);
            }
            None => return Ok(None),
        };

        if let Some(sent_at) = challenge.last_sent_at {
            let ready_at = sent_at + cooldown;
            if now < ready_at {
                let wait = ready_at - now;
                // Round up so "0 seconds" is never reported while still blocked
                let retry_after_seconds = (wait.num_milliseconds() + 999) / 1000;
                return Err(VerificationError::CooldownActive {
                    retry_after_seconds,
                });
            }
        }

        Ok(Some(challenge.clone()))
    }

    /// Drop the challenge for a number, if any
    pub fn invalidate(&self, phone: &str) -> bool {
        let removed = self.lock().remove(phone).is_some();
        if removed {
            info!(
                phone = %mask_phone_number(phone),
                event = "otp_invalidated",
                "Verification code invalidated"
            );
        }
        removed
    }

    /// Remove every expired challenge, returning how many were dropped
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut challenges = self.lock();
        let before = challenges.len();
        challenges.retain(|_, challenge| !challenge.is_expired_at(now));
        let purged = before - challenges.len();
        if purged > 0 {
            debug!(purged, "Purged expired verification codes");
        }
        purged
    }

    /// Number of stored challenges, including expired ones not yet touched
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for OtpRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
