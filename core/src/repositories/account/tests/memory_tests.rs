//! Unit tests for the in-memory account store

use crate::domain::entities::profile::{AccountId, NewProfile, UserType};
use crate::errors::AccountStoreError;
use crate::repositories::account::{AccountStore, InMemoryAccountStore};

fn new_profile(email: &str) -> NewProfile {
    NewProfile::new(UserType::Daktari, "Dkt. Juma", email, "0712345678")
}

#[tokio::test]
async fn test_create_and_find() {
    let store = InMemoryAccountStore::new();

    let created = store.create_profile(new_profile("juma@example.com")).await.unwrap();
    assert!(!created.phone_verified);

    let found = store.find_profile(created.id).await.unwrap();
    assert_eq!(found, Some(created));
}

#[tokio::test]
async fn test_create_keeps_supplied_id() {
    let store = InMemoryAccountStore::new();
    let id = AccountId::new();

    let mut profile = new_profile("juma@example.com");
    profile.id = Some(id);
    let created = store.create_profile(profile).await.unwrap();

    assert_eq!(created.id, id);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let store = InMemoryAccountStore::new();

    store.create_profile(new_profile("juma@example.com")).await.unwrap();
    let result = store.create_profile(new_profile("JUMA@example.com")).await;

    assert_eq!(result, Err(AccountStoreError::AlreadyExists));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_mark_phone_verified() {
    let store = InMemoryAccountStore::new();
    let created = store.create_profile(new_profile("juma@example.com")).await.unwrap();

    store.mark_phone_verified(created.id).await.unwrap();
    // Idempotent
    store.mark_phone_verified(created.id).await.unwrap();

    let found = store.find_profile(created.id).await.unwrap().unwrap();
    assert!(found.phone_verified);
}

#[tokio::test]
async fn test_mark_unknown_account_fails() {
    let store = InMemoryAccountStore::new();
    let id = AccountId::new();

    let result = store.mark_phone_verified(id).await;
    assert_eq!(
        result,
        Err(AccountStoreError::NotFound { account_id: id.to_string() })
    );
}
