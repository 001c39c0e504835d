//! Outbound message dispatch contract

use async_trait::async_trait;

/// Outbound SMS sender used by the verification workflow
///
/// Treated as an unreliable network call: the workflow never retries on its
/// own and imposes no timeout.
#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    /// Send `text` to `to`
    ///
    /// `to` is digits only, country code first, without a leading `+`.
    /// Returns the provider's message id, or a failure reason.
    async fn send(&self, to: &str, text: &str) -> Result<String, String>;
}
