//! Phone verification policy configuration

use serde::{Deserialize, Serialize};

/// SMS body sent with every verification code; `{code}` is replaced with the digits
pub const DEFAULT_MESSAGE_TEMPLATE: &str =
    "Nambari yako ya uthibitisho ni: {code}. Tafadhali tumia nambari hii kujisajili kwenye E-VET.";

/// Verification code policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Validity window of an issued code in seconds
    #[serde(default = "default_code_ttl")]
    pub code_ttl_seconds: i64,

    /// Verification attempts allowed per code
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Number of digits in a code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Minimum seconds between two deliveries of a code to the same number
    #[serde(default = "default_resend_cooldown")]
    pub resend_cooldown_seconds: i64,

    /// Reject resend requests inside the cooldown window
    #[serde(default = "default_enforce_cooldown")]
    pub enforce_resend_cooldown: bool,

    /// Country calling code applied to national numbers (leading `0`)
    #[serde(default = "default_country_code")]
    pub default_country_code: String,

    /// Message template containing a `{code}` placeholder
    #[serde(default = "default_message_template")]
    pub message_template: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: default_code_ttl(),
            max_attempts: default_max_attempts(),
            code_length: default_code_length(),
            resend_cooldown_seconds: default_resend_cooldown(),
            enforce_resend_cooldown: default_enforce_cooldown(),
            default_country_code: default_country_code(),
            message_template: default_message_template(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_ttl_seconds: env_parse("OTP_CODE_TTL_SECONDS", defaults.code_ttl_seconds),
            max_attempts: env_parse("OTP_MAX_ATTEMPTS", defaults.max_attempts),
            code_length: defaults.code_length,
            resend_cooldown_seconds: env_parse(
                "OTP_RESEND_COOLDOWN_SECONDS",
                defaults.resend_cooldown_seconds,
            ),
            enforce_resend_cooldown: env_parse(
                "OTP_ENFORCE_RESEND_COOLDOWN",
                defaults.enforce_resend_cooldown,
            ),
            default_country_code: std::env::var("DEFAULT_COUNTRY_CODE")
                .unwrap_or(defaults.default_country_code),
            message_template: std::env::var("OTP_MESSAGE_TEMPLATE")
                .ok()
                .filter(|t| t.contains("{code}"))
                .unwrap_or(defaults.message_template),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_code_ttl() -> i64 {
    300 // 5 minutes
}

fn default_max_attempts() -> u32 {
    3
}

fn default_code_length() -> usize {
    6
}

fn default_resend_cooldown() -> i64 {
    60
}

fn default_enforce_cooldown() -> bool {
    true
}

fn default_country_code() -> String {
    String::from("255")
}

fn default_message_template() -> String {
    String::from(DEFAULT_MESSAGE_TEMPLATE)
}
