//! SMS Service Module
//!
//! SMS gateways used to deliver verification codes.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Console output for development
//! - **Mambo SMS Support**: Production SMS via the Mambo HTTP API
//! - **Dispatcher Adapter**: Plugs any provider into the verification workflow

pub mod dispatcher_adapter;
pub mod mambo;
pub mod mock_sms;
pub mod sms_service;

// Re-export commonly used types
pub use dispatcher_adapter::SmsDispatcherAdapter;
pub use mambo::MamboSmsService;
pub use mock_sms::MockSmsService;
pub use sms_service::SmsService;

use ev_shared::config::SmsConfig;

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// # Arguments
///
/// * `config` - SMS configuration containing provider settings
///
/// # Returns
///
/// A boxed SMS service implementation, or a configuration error for an
/// unknown provider or unusable credentials
pub fn create_sms_service(config: &SmsConfig) -> Result<Box<dyn SmsService>, InfrastructureError> {
    match config.provider.as_str() {
        "mock" => Ok(Box::new(MockSmsService::new())),
        "mambo" => Ok(Box::new(MamboSmsService::new(config)?)),
        other => Err(InfrastructureError::Config(format!(
            "Unknown SMS provider '{}'",
            other
        ))),
    }
}
