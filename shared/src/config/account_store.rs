//! Account store configuration

use serde::{Deserialize, Serialize};

/// Hosted profile store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountStoreConfig {
    /// Store provider ("supabase", "memory")
    pub provider: String,

    /// Project URL of the hosted backend
    #[serde(default)]
    pub url: String,

    /// API key sent as `apikey` and bearer token
    #[serde(default)]
    pub api_key: String,

    /// Table holding user profiles
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,
}

impl Default for AccountStoreConfig {
    fn default() -> Self {
        Self {
            provider: String::from("supabase"),
            url: String::new(),
            api_key: String::new(),
            profiles_table: default_profiles_table(),
        }
    }
}

impl AccountStoreConfig {
    /// Configuration for the in-process store
    pub fn memory() -> Self {
        Self {
            provider: String::from("memory"),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("ACCOUNT_STORE_PROVIDER")
                .unwrap_or_else(|_| "memory".to_string()),
            url: std::env::var("SUPABASE_URL").unwrap_or_default(),
            api_key: std::env::var("SUPABASE_API_KEY").unwrap_or_default(),
            profiles_table: std::env::var("SUPABASE_PROFILES_TABLE")
                .unwrap_or_else(|_| default_profiles_table()),
        }
    }

    /// REST endpoint for the profiles table
    pub fn profiles_endpoint(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.url.trim_end_matches('/'),
            self.profiles_table
        )
    }
}

fn default_profiles_table() -> String {
    String::from("profiles")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_endpoint_trims_trailing_slash() {
        let config = AccountStoreConfig {
            url: "https://example.supabase.co/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.profiles_endpoint(),
            "https://example.supabase.co/rest/v1/profiles"
        );
    }
}
