//! Handle tying an unverified account to its phone verification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::AccountId;

/// An account that exists in the store but has not verified its phone yet
///
/// Issued when the unverified profile is provisioned and consumed once the
/// phone is verified. Abandoned handles leave the account unverified; nothing
/// cleans them up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRegistration {
    /// Account created before verification
    pub account_id: AccountId,

    /// Normalized phone number awaiting verification
    pub phone: String,

    /// When the account was provisioned
    pub created_at: DateTime<Utc>,
}

impl PendingRegistration {
    pub fn new(account_id: AccountId, phone: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            account_id,
            phone: phone.into(),
            created_at,
        }
    }
}
