//! Mambo SMS Service Implementation
//!
//! Sends messages through the Mambo SMS HTTP API
//! (`POST {base_url}/sms/single`, bearer token, JSON body).
//!
//! A message counts as sent only when the gateway answers with
//! `"success": true`. Failed sends are not retried here; the verification
//! workflow leaves retrying to its caller.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};
use uuid::Uuid;

use ev_shared::config::SmsConfig;
use ev_shared::phone::{is_valid_msisdn, mask_phone_number};

use super::sms_service::SmsService;
use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct SendSmsRequest<'a> {
    sender_id: &'a str,
    message: &'a str,
    mobile: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendSmsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl SendSmsResponse {
    fn message_id(&self) -> Option<String> {
        let data = self.data.as_ref()?;
        ["message_id", "id", "sms_id"]
            .iter()
            .find_map(|key| match data.get(key)? {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

/// Mambo SMS gateway client
#[derive(Clone)]
pub struct MamboSmsService {
    client: Client,
    endpoint: String,
    api_token: String,
    sender_id: String,
}

impl MamboSmsService {
    /// Create a new Mambo SMS service
    ///
    /// No request timeout is set unless `request_timeout_secs` is configured.
    pub fn new(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.api_token.is_empty() {
            return Err(InfrastructureError::Config(
                "Mambo SMS API token is not set".to_string(),
            ));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let endpoint = format!("{}/sms/single", config.base_url.trim_end_matches('/'));
        info!(
            endpoint = %endpoint,
            sender_id = %config.sender_id,
            "Mambo SMS service initialized"
        );

        Ok(Self {
            client,
            endpoint,
            api_token: config.api_token.clone(),
            sender_id: config.sender_id.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SmsService for MamboSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let mobile = phone_number.trim_start_matches('+');
        let masked_phone = mask_phone_number(mobile);

        if !is_valid_msisdn(mobile) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                masked_phone
            )));
        }

        debug!(provider = "mambo", phone = %masked_phone, "Sending SMS");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&SendSmsRequest {
                sender_id: &self.sender_id,
                message,
                mobile,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                provider = "mambo",
                phone = %masked_phone,
                status = status.as_u16(),
                "SMS gateway returned an error status"
            );
            return Err(InfrastructureError::Sms(format!(
                "Gateway returned {}: {}",
                status, body
            )));
        }

        let body: SendSmsResponse = response.json().await?;
        if !body.success {
            let reason = body
                .message
                .unwrap_or_else(|| "Gateway did not accept the message".to_string());
            error!(
                provider = "mambo",
                phone = %masked_phone,
                reason = %reason,
                "SMS gateway rejected message"
            );
            return Err(InfrastructureError::Sms(reason));
        }

        let message_id = body
            .message_id()
            .unwrap_or_else(|| format!("mambo_{}", Uuid::new_v4()));

        info!(
            target: "sms_service",
            provider = "mambo",
            phone = %masked_phone,
            message_id = %message_id,
            "SMS sent successfully"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mambo"
    }
}
