//! Verification workflow for phone-based registration
//!
//! This module orchestrates the user-facing request/verify cycle:
//! - Code issuance through the OTP registry and delivery by SMS
//! - Code verification with attempt tracking
//! - Resend cooldown enforcement
//! - Activation of the pending account once its phone is verified

mod config;
mod service;
mod traits;
mod types;


pub use config::VerificationServiceConfig;
pub use service::VerificationWorkflow;
pub use traits::MessageDispatcher;
pub use types::{RegistrationOutcome, RegistrationStarted, SendCodeResult, VerifyCodeResult};
