//! # Infrastructure Layer
//!
//! This crate provides the concrete collaborators of the E-VET phone
//! verification core.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **SMS**: Mambo SMS gateway client and a mock sender for development
//! - **Accounts**: PostgREST client for the hosted `profiles` table
//! - **Logging**: `tracing-subscriber` initialisation
//! - **Config**: `.env` aware configuration loading

use std::sync::Arc;

use ev_core::repositories::AccountStore;
use ev_core::services::clock::SystemClock;
use ev_core::services::verification::{MessageDispatcher, VerificationWorkflow};
use ev_shared::config::AppConfig;

// Re-export core types for convenience
pub use ev_core::errors::*;

/// Account store module - hosted profile records
pub mod accounts;

/// Configuration loading
pub mod config;

/// Tracing subscriber setup
pub mod logging;

/// SMS service module - External SMS providers
pub mod sms;

/// Verification workflow wired to configured collaborators
pub type Workflow = VerificationWorkflow<dyn MessageDispatcher, dyn AccountStore>;

/// Build the verification workflow from application configuration
///
/// This function sets up:
/// - The SMS service selected by `sms.provider`, behind a dispatcher adapter
/// - The account store selected by `account_store.provider`
/// - An OTP registry on the wall clock with the configured code policy
pub fn build_verification_workflow(config: &AppConfig) -> Result<Workflow, InfrastructureError> {
    tracing::info!(
        environment = %config.environment,
        sms_provider = %config.sms.provider,
        account_store = %config.account_store.provider,
        "Initializing verification workflow..."
    );

    let sms_service = sms::create_sms_service(&config.sms)?;
    let dispatcher: Arc<dyn MessageDispatcher> =
        Arc::new(sms::SmsDispatcherAdapter::new(sms_service));
    let accounts = accounts::create_account_store(&config.account_store)?;

    let workflow = VerificationWorkflow::from_config(
        &config.verification,
        Arc::new(SystemClock),
        dispatcher,
        accounts,
    );

    tracing::info!("Verification workflow initialized successfully");

    Ok(workflow)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Account store error
    #[error("Account store error: {0}")]
    AccountStore(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
