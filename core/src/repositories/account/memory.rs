//! In-process implementation of AccountStore for development and tests

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::profile::{AccountId, NewProfile, Profile};
use crate::errors::AccountStoreError;

use super::trait_::AccountStore;

/// Account store keeping profiles in a map
#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    profiles: Arc<RwLock<HashMap<AccountId, Profile>>>,
}

impl InMemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles
    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create_profile(&self, profile: NewProfile) -> Result<Profile, AccountStoreError> {
        let mut profiles = self.profiles.write().await;

        let id = profile.id.unwrap_or_default();
        if profiles.contains_key(&id)
            || profiles
                .values()
                .any(|p| p.email.eq_ignore_ascii_case(&profile.email))
        {
            return Err(AccountStoreError::AlreadyExists);
        }

        let profile = Profile::from_new(profile, id, Utc::now());
        profiles.insert(id, profile.clone());
        Ok(profile)
    }

    async fn find_profile(&self, id: AccountId) -> Result<Option<Profile>, AccountStoreError> {
        Ok(self.profiles.read().await.get(&id).cloned())
    }

    async fn mark_phone_verified(&self, id: AccountId) -> Result<(), AccountStoreError> {
        let mut profiles = self.profiles.write().await;
        match profiles.get_mut(&id) {
            Some(profile) => {
                profile.phone_verified = true;
                Ok(())
            }
            None => Err(AccountStoreError::NotFound {
                account_id: id.to_string(),
            }),
        }
    }
}
