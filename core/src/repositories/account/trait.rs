//! Account store trait defining the interface for profile persistence.
//!
//! The hosted backend is opaque to the verification core; it only needs to
//! create, read, and flag profiles through this contract.

use async_trait::async_trait;

use crate::domain::entities::profile::{AccountId, NewProfile, Profile};
use crate::errors::AccountStoreError;

/// Repository trait for account profile records
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use ev_core::repositories::AccountStore;
/// use ev_core::domain::entities::{AccountId, NewProfile, Profile};
/// use ev_core::errors::AccountStoreError;
///
/// struct RestAccountStore {
///     // http client
/// }
///
/// #[async_trait]
/// impl AccountStore for RestAccountStore {
///     async fn create_profile(&self, profile: NewProfile) -> Result<Profile, AccountStoreError> {
///         Err(AccountStoreError::Unavailable { message: "not wired".into() })
///     }
///
///     async fn find_profile(&self, id: AccountId) -> Result<Option<Profile>, AccountStoreError> {
///         Ok(None)
///     }
///
///     async fn mark_phone_verified(&self, id: AccountId) -> Result<(), AccountStoreError> {
///         Err(AccountStoreError::NotFound { account_id: id.to_string() })
///     }
/// }
/// ```
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Provision a new, not yet phone-verified profile
    ///
    /// # Returns
    /// * `Ok(Profile)` - The stored profile with its issued identifier
    /// * `Err(AccountStoreError::AlreadyExists)` - Identifier or email taken
    async fn create_profile(&self, profile: NewProfile) -> Result<Profile, AccountStoreError>;

    /// Find a profile by identifier
    ///
    /// # Returns
    /// * `Ok(Some(Profile))` - Profile found
    /// * `Ok(None)` - No profile with this identifier
    async fn find_profile(&self, id: AccountId) -> Result<Option<Profile>, AccountStoreError>;

    /// Flag the profile's phone number as verified
    ///
    /// # Returns
    /// * `Ok(())` - Flag set (setting it twice is not an error)
    /// * `Err(AccountStoreError::NotFound)` - `id` does not reference an account
    async fn mark_phone_verified(&self, id: AccountId) -> Result<(), AccountStoreError>;
}
