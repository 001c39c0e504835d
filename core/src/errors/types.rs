//! Verification and account store error types
//!
//! Every variant carries a bilingual message (English and Swahili) in the
//! `"{english} | {swahili}"` form so the registration front-end can render
//! either language without re-mapping error kinds.

use thiserror::Error;

/// Errors surfaced by the phone verification flow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// The SMS gateway did not accept the message; the issued code stays valid
    #[error("Failed to send verification code. Please try again | Imeshindikana kutuma nambari ya uthibitisho. Tafadhali jaribu tena.")]
    DeliveryFailure { reason: String },

    /// No live code exists for the number
    #[error("No verification code was sent to this number. Please request a new code | Hakuna nambari ya uthibitisho iliyotumwa kwa namba hii. Tafadhali omba nambari mpya.")]
    NotFound,

    #[error("Verification code expired. Please request a new code | Nambari ya uthibitisho imepitwa na muda. Tafadhali omba nambari mpya.")]
    Expired,

    #[error("Maximum attempts exceeded. Please request a new code | Umejaribu mara nyingi. Tafadhali tuma OTP mpya.")]
    TooManyAttempts,

    #[error("Invalid verification code. {remaining_attempts} attempt(s) remaining | Nambari ya uthibitisho si sahihi. Tafadhali jaribu tena.")]
    CodeMismatch { remaining_attempts: u32 },

    #[error("Please wait {retry_after_seconds} seconds before requesting a new code | Tafadhali subiri sekunde {retry_after_seconds} kabla ya kuomba nambari mpya.")]
    CooldownActive { retry_after_seconds: i64 },
}

impl VerificationError {
    /// Stable error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            VerificationError::DeliveryFailure { .. } => "SMS_DELIVERY_FAILED",
            VerificationError::NotFound => "VERIFICATION_CODE_NOT_FOUND",
            VerificationError::Expired => "VERIFICATION_CODE_EXPIRED",
            VerificationError::TooManyAttempts => "VERIFICATION_ATTEMPTS_EXCEEDED",
            VerificationError::CodeMismatch { .. } => "VERIFICATION_CODE_INVALID",
            VerificationError::CooldownActive { .. } => "RESEND_COOLDOWN_ACTIVE",
        }
    }

    /// Whether the user has to request a fresh code before trying again
    pub fn requires_new_code(&self) -> bool {
        matches!(
            self,
            VerificationError::NotFound
                | VerificationError::Expired
                | VerificationError::TooManyAttempts
        )
    }

    /// English part of the message
    pub fn message_en(&self) -> String {
        extract_english_message(&self.to_string()).to_string()
    }

    /// Swahili part of the message
    pub fn message_sw(&self) -> String {
        extract_swahili_message(&self.to_string()).to_string()
    }
}

/// Errors reported by an account store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountStoreError {
    #[error("Account not found: {account_id} | Akaunti haipatikani: {account_id}")]
    NotFound { account_id: String },

    #[error("Account already exists | Akaunti tayari ipo")]
    AlreadyExists,

    #[error("Account store unavailable: {message} | Hifadhi ya akaunti haipatikani: {message}")]
    Unavailable { message: String },
}

impl AccountStoreError {
    /// Stable error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            AccountStoreError::NotFound { .. } => "ACCOUNT_NOT_FOUND",
            AccountStoreError::AlreadyExists => "ACCOUNT_ALREADY_EXISTS",
            AccountStoreError::Unavailable { .. } => "ACCOUNT_STORE_UNAVAILABLE",
        }
    }
}

/// Helper function to extract the English message from a bilingual error
pub fn extract_english_message(message: &str) -> &str {
    message.split(" | ").next().unwrap_or(message)
}

/// Helper function to extract the Swahili message from a bilingual error
pub fn extract_swahili_message(message: &str) -> &str {
    message.split(" | ").nth(1).unwrap_or(message)
}
