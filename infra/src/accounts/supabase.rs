//! Hosted account store backed by the Supabase PostgREST API
//!
//! Profiles live in a single table (`profiles` by default). Writes ask for
//! `Prefer: return=representation` so the affected rows come back in the
//! response; an empty result from an update means no row matched the id.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{error, info};

use ev_core::domain::entities::{AccountId, NewProfile, Profile};
use ev_core::errors::AccountStoreError;
use ev_core::repositories::AccountStore;
use ev_shared::config::AccountStoreConfig;

use crate::InfrastructureError;

const RETURN_REPRESENTATION: &str = "return=representation";

/// PostgREST client for the `profiles` table
#[derive(Clone)]
pub struct SupabaseAccountStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl SupabaseAccountStore {
    /// Create a new store client
    pub fn new(config: &AccountStoreConfig) -> Result<Self, InfrastructureError> {
        if config.url.is_empty() || config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "Supabase URL and API key must be set".to_string(),
            ));
        }

        let client = Client::builder().build()?;
        let endpoint = config.profiles_endpoint();
        info!(endpoint = %endpoint, "Supabase account store initialized");

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn id_filter(id: AccountId) -> [(&'static str, String); 1] {
        [("id", format!("eq.{}", id))]
    }

    /// Send a request and decode the returned rows
    async fn rows<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<T>, AccountStoreError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(InfrastructureError::from)?;
        let status = response.status();

        // PostgREST reports unique violations as 409
        if status == StatusCode::CONFLICT {
            return Err(AccountStoreError::AlreadyExists);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Account store request failed");
            return Err(InfrastructureError::AccountStore(format!("{}: {}", status, body)).into());
        }

        Ok(response
            .json::<Vec<T>>()
            .await
            .map_err(InfrastructureError::from)?)
    }
}

#[async_trait]
impl AccountStore for SupabaseAccountStore {
    async fn create_profile(&self, profile: NewProfile) -> Result<Profile, AccountStoreError> {
        let request = self
            .client
            .post(&self.endpoint)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&profile);

        let mut rows = self.rows::<Profile>(request).await?;
        let created = rows.pop().ok_or_else(|| AccountStoreError::Unavailable {
            message: "Profile insert returned no row".to_string(),
        })?;

        info!(
            account_id = %created.id,
            user_type = ?created.user_type,
            "Profile created"
        );
        Ok(created)
    }

    async fn find_profile(&self, id: AccountId) -> Result<Option<Profile>, AccountStoreError> {
        let request = self
            .client
            .get(&self.endpoint)
            .query(&Self::id_filter(id))
            .query(&[("select", "*")]);

        let mut rows = self.rows::<Profile>(request).await?;
        Ok(rows.pop())
    }

    async fn mark_phone_verified(&self, id: AccountId) -> Result<(), AccountStoreError> {
        let request = self
            .client
            .patch(&self.endpoint)
            .query(&Self::id_filter(id))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&json!({ "phone_verified": true }));

        let rows = self.rows::<serde_json::Value>(request).await?;
        if rows.is_empty() {
            return Err(AccountStoreError::NotFound {
                account_id: id.to_string(),
            });
        }

        info!(account_id = %id, event = "phone_verified_flag_set", "Profile phone marked verified");
        Ok(())
    }
}
