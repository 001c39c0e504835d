//! Configuration for the verification workflow

use chrono::Duration;

use ev_shared::config::verification::{VerificationConfig, DEFAULT_MESSAGE_TEMPLATE};

/// Configuration for the verification workflow
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Minimum time between two deliveries of a code to the same number
    pub resend_cooldown: Duration,
    /// Whether `resend` rejects requests inside the cooldown window
    pub enforce_resend_cooldown: bool,
    /// Country calling code applied to national numbers
    pub default_country_code: String,
    /// SMS body with a `{code}` placeholder
    pub message_template: String,
}

impl VerificationServiceConfig {
    /// Render the SMS body for a code
    pub fn render_message(&self, code: &str) -> String {
        self.message_template.replace("{code}", code)
    }

    /// Cooldown actually applied by `resend`
    pub(crate) fn effective_cooldown(&self) -> Duration {
        if self.enforce_resend_cooldown {
            self.resend_cooldown
        } else {
            Duration::zero()
        }
    }
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            resend_cooldown: Duration::seconds(60),
            enforce_resend_cooldown: true,
            default_country_code: "255".to_string(),
            message_template: DEFAULT_MESSAGE_TEMPLATE.to_string(),
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            resend_cooldown: Duration::seconds(config.resend_cooldown_seconds.max(0)),
            enforce_resend_cooldown: config.enforce_resend_cooldown,
            default_country_code: config.default_country_code.clone(),
            message_template: config.message_template.clone(),
        }
    }
}
