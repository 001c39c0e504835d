//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `account_store` - Hosted profile store connection settings
//! - `environment` - Environment detection and logging configuration
//! - `sms` - SMS gateway selection and credentials
//! - `verification` - Phone verification code policy

pub mod account_store;
pub mod environment;
pub mod sms;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use account_store::AccountStoreConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use sms::SmsConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Verification code policy
    #[serde(default)]
    pub verification: VerificationConfig,

    /// SMS gateway configuration
    #[serde(default)]
    pub sms: SmsConfig,

    /// Account store configuration
    #[serde(default)]
    pub account_store: AccountStoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            logging: LoggingConfig::for_environment(env),
            verification: VerificationConfig::default(),
            sms: SmsConfig::default(),
            account_store: AccountStoreConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    ///
    /// Development uses the mock SMS sender and the in-memory account store so
    /// the verification flow runs without external credentials.
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            logging: LoggingConfig::for_environment(Environment::Development),
            verification: VerificationConfig::default(),
            sms: SmsConfig::mock(),
            account_store: AccountStoreConfig::memory(),
        }
    }

    /// Load configuration from environment
    ///
    /// Every sub-configuration reads its own variables; the environment only
    /// picks the logging defaults.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }
        if let Some(format) = std::env::var("LOG_FORMAT").ok().and_then(|v| v.parse().ok()) {
            logging.format = format;
        }

        Self {
            environment,
            logging,
            verification: VerificationConfig::from_env(),
            sms: SmsConfig::from_env(),
            account_store: AccountStoreConfig::from_env(),
        }
    }
}
