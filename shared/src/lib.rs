//! Shared utilities and common types for the E-VET server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Phone number normalization and validation

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AccountStoreConfig, AppConfig, Environment, LogFormat, LoggingConfig, SmsConfig,
    VerificationConfig,
};
pub use utils::phone;
