//! Types for verification workflow results

use chrono::{DateTime, Utc};

use crate::domain::entities::{AccountId, PendingRegistration};
use crate::errors::VerificationError;

/// Result of requesting (or re-sending) a verification code
#[derive(Debug, Clone, PartialEq)]
pub struct SendCodeResult {
    /// Normalized number the code belongs to
    pub phone: String,
    /// When the live code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Provider message id, when a message went out on this call
    pub message_id: Option<String>,
    /// False when delivery was suppressed because the live code was already sent
    pub sent: bool,
    /// Earliest time `resend` will deliver again
    pub next_resend_at: Option<DateTime<Utc>>,
}

/// Result of submitting a code
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyCodeResult {
    /// Whether the verification was successful
    pub success: bool,
    /// Attempts left on the live code after a mismatch
    pub remaining_attempts: Option<u32>,
    /// Why the verification failed
    pub error: Option<VerificationError>,
}

impl VerifyCodeResult {
    pub(crate) fn verified() -> Self {
        Self {
            success: true,
            remaining_attempts: None,
            error: None,
        }
    }

    pub(crate) fn failed(error: VerificationError) -> Self {
        let remaining_attempts = match &error {
            VerificationError::CodeMismatch { remaining_attempts } => Some(*remaining_attempts),
            _ => None,
        };
        Self {
            success: false,
            remaining_attempts,
            error: Some(error),
        }
    }

    /// Bilingual message for display, if the verification failed
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// An unverified account has been provisioned
#[derive(Debug, Clone)]
pub struct RegistrationStarted {
    /// Handle to pass to `complete_registration`
    pub pending: PendingRegistration,
    /// Delivery details when the first code went out
    pub send_result: Option<SendCodeResult>,
    /// Delivery failure; the code stays valid and can be re-sent
    pub delivery_error: Option<VerificationError>,
}

/// Outcome of `complete_registration`
#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    /// Phone verified and account activated; the handle is consumed
    Verified { account_id: AccountId },
    /// Verification failed; the handle is returned for another try
    Retry {
        pending: PendingRegistration,
        result: VerifyCodeResult,
    },
}

impl RegistrationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, RegistrationOutcome::Verified { .. })
    }
}
