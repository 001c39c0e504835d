//! Account Store Module
//!
//! Implementations of the core `AccountStore` trait.

pub mod supabase;

pub use supabase::SupabaseAccountStore;

use std::sync::Arc;

use ev_core::errors::AccountStoreError;
use ev_core::repositories::{AccountStore, InMemoryAccountStore};
use ev_shared::config::AccountStoreConfig;

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an account store based on configuration
///
/// `memory` keeps profiles in process (development only), `supabase` talks to
/// the hosted `profiles` table.
pub fn create_account_store(
    config: &AccountStoreConfig,
) -> Result<Arc<dyn AccountStore>, InfrastructureError> {
    match config.provider.as_str() {
        "memory" => {
            tracing::warn!("Using in-memory account store, profiles are lost on restart");
            Ok(Arc::new(InMemoryAccountStore::new()))
        }
        "supabase" => Ok(Arc::new(SupabaseAccountStore::new(config)?)),
        other => Err(InfrastructureError::Config(format!(
            "Unknown account store provider '{}'",
            other
        ))),
    }
}

impl From<InfrastructureError> for AccountStoreError {
    fn from(err: InfrastructureError) -> Self {
        AccountStoreError::Unavailable {
            message: err.to_string(),
        }
    }
}
