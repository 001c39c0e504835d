//! SMS gateway configuration

use serde::{Deserialize, Serialize};

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// SMS service provider ("mambo", "mock")
    pub provider: String,

    /// Gateway API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the gateway API
    #[serde(default)]
    pub api_token: String,

    /// Registered sender name shown on the handset
    #[serde(default = "default_sender_id")]
    pub sender_id: String,

    /// Request timeout in seconds; `None` leaves the call unbounded
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mambo"),
            base_url: default_base_url(),
            api_token: String::new(),
            sender_id: default_sender_id(),
            request_timeout_secs: None,
        }
    }
}

impl SmsConfig {
    /// Configuration for the console mock sender
    pub fn mock() -> Self {
        Self {
            provider: String::from("mock"),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("SMS_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            base_url: std::env::var("SMS_BASE_URL").unwrap_or_else(|_| default_base_url()),
            api_token: std::env::var("SMS_API_TOKEN").unwrap_or_default(),
            sender_id: std::env::var("SMS_SENDER_ID").unwrap_or_else(|_| default_sender_id()),
            request_timeout_secs: std::env::var("SMS_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}

fn default_base_url() -> String {
    String::from("https://mambosms.co.tz/api/v1")
}

fn default_sender_id() -> String {
    String::from("E VET")
}
