//! SMS Service Dispatcher Adapter
//!
//! Implements the core `MessageDispatcher` trait on top of any infrastructure
//! `SmsService`, bridging the gateway clients with the verification workflow.

use async_trait::async_trait;
use ev_core::services::verification::MessageDispatcher;

use super::sms_service::SmsService;

/// Adapter that implements the core MessageDispatcher for an SMS service
pub struct SmsDispatcherAdapter {
    inner: Box<dyn SmsService>,
}

impl SmsDispatcherAdapter {
    pub fn new(inner: Box<dyn SmsService>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl MessageDispatcher for SmsDispatcherAdapter {
    async fn send(&self, to: &str, text: &str) -> Result<String, String> {
        self.inner
            .send_sms(to, text)
            .await
            .map_err(|e| e.to_string())
    }
}
