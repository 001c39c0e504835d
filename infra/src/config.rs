//! Configuration loading for infrastructure services
//!
//! Values come from the process environment. A `.env` file is read first
//! (the environment-specific one, e.g. `.env.production`, then `.env`);
//! variables already set in the process win.

use ev_shared::config::{AppConfig, Environment};

use crate::InfrastructureError;

/// Load application configuration from the environment
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    let environment = Environment::from_env();

    // Missing files are fine, malformed ones are not
    for file in [environment.env_file(), ".env"] {
        match dotenvy::from_filename(file) {
            Ok(_) => tracing::debug!(file, "Loaded environment file"),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(InfrastructureError::Config(format!(
                    "Failed to read {}: {}",
                    file, e
                )))
            }
        }
    }

    let config = AppConfig::from_env();
    validate(&config)?;
    Ok(config)
}

/// Reject configurations the collaborators cannot start with
pub fn validate(config: &AppConfig) -> Result<(), InfrastructureError> {
    if config.sms.provider == "mambo" && config.sms.api_token.is_empty() {
        return Err(InfrastructureError::Config(
            "SMS_API_TOKEN must be set for the mambo provider".to_string(),
        ));
    }

    if config.account_store.provider == "supabase"
        && (config.account_store.url.is_empty() || config.account_store.api_key.is_empty())
    {
        return Err(InfrastructureError::Config(
            "SUPABASE_URL and SUPABASE_API_KEY must be set for the supabase account store"
                .to_string(),
        ));
    }

    let verification = &config.verification;
    if verification.code_ttl_seconds <= 0 {
        return Err(InfrastructureError::Config(
            "OTP_CODE_TTL_SECONDS must be positive".to_string(),
        ));
    }
    // Codes are drawn as a u32, so at most nine digits
    if !(1..=9).contains(&verification.code_length) {
        return Err(InfrastructureError::Config(format!(
            "OTP code length must be between 1 and 9, got {}",
            verification.code_length
        )));
    }
    if !verification.message_template.contains("{code}") {
        return Err(InfrastructureError::Config(
            "OTP message template must contain a {code} placeholder".to_string(),
        ));
    }

    if config.environment.is_production() && config.sms.provider == "mock" {
        tracing::warn!("Mock SMS provider configured in production, codes will not be delivered");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ev_shared::config::{AccountStoreConfig, SmsConfig};

    #[test]
    fn test_load_config_without_env_files() {
        // Defaults select the mock sender and the in-memory store
        if std::env::var("SMS_PROVIDER").is_err() && std::env::var("ACCOUNT_STORE_PROVIDER").is_err() {
            let config = load_config().unwrap();
            assert_eq!(config.sms.provider, "mock");
            assert_eq!(config.account_store.provider, "memory");
        }
    }

    #[test]
    fn test_development_config_is_valid() {
        assert!(validate(&AppConfig::development()).is_ok());
    }

    #[test]
    fn test_mambo_requires_token() {
        let mut config = AppConfig::development();
        config.sms = SmsConfig::default();

        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("SMS_API_TOKEN"));

        config.sms.api_token = "token".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_supabase_requires_credentials() {
        let mut config = AppConfig::development();
        config.account_store = AccountStoreConfig::default();

        assert!(matches!(
            validate(&config),
            Err(InfrastructureError::Config(_))
        ));
    }

    #[test]
    fn test_code_length_out_of_range() {
        let mut config = AppConfig::development();

        config.verification.code_length = 12;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("between 1 and 9"));

        config.verification.code_length = 0;
        assert!(validate(&config).is_err());

        config.verification.code_length = 9;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_template_requires_placeholder() {
        let mut config = AppConfig::development();
        config.verification.message_template = "Karibu E-VET".to_string();

        assert!(validate(&config).is_err());
    }
}
