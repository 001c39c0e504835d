//! Profile entity representing a marketplace account record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque account identifier issued by the account store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Kind of marketplace participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Veterinarian
    Daktari,
    /// Agro-vet shop
    Duka,
    /// Livestock seller
    Wauzaji,
    /// Livestock aggregator
    Agregator,
}

/// Fields supplied by the registration front-end when creating an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    /// Identifier from the auth provider, if it already issued one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<AccountId>,
    pub user_type: UserType,
    pub full_name: String,
    pub email: String,
    /// Phone number as typed by the user
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewProfile {
    pub fn new(
        user_type: UserType,
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_type,
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
            location: None,
            description: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Stored account profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: AccountId,
    pub user_type: UserType,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Set once the phone number passed OTP verification
    #[serde(default)]
    pub phone_verified: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Build an unverified profile from registration input
    pub fn from_new(new: NewProfile, id: AccountId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_type: new.user_type,
            full_name: new.full_name,
            email: new.email,
            phone: new.phone,
            location: new.location,
            description: new.description,
            phone_verified: false,
            created_at: Some(created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_wire_names() {
        assert_eq!(serde_json::to_string(&UserType::Daktari).unwrap(), "\"daktari\"");
        assert_eq!(
            serde_json::from_str::<UserType>("\"agregator\"").unwrap(),
            UserType::Agregator
        );
    }

    #[test]
    fn test_profile_from_new_is_unverified() {
        let new = NewProfile::new(UserType::Duka, "Duka la Mifugo", "duka@example.com", "0712345678")
            .with_location("Arusha");
        let id = AccountId::new();
        let profile = Profile::from_new(new, id, Utc::now());

        assert_eq!(profile.id, id);
        assert_eq!(profile.location.as_deref(), Some("Arusha"));
        assert!(!profile.phone_verified);
    }

    #[test]
    fn test_profile_deserializes_row_without_optional_columns() {
        let id = AccountId::new();
        let row = serde_json::json!({
            "id": id.to_string(),
            "user_type": "wauzaji",
            "full_name": "Asha",
            "email": "asha@example.com",
            "phone": "+255712345678"
        });
        let profile: Profile = serde_json::from_value(row).unwrap();
        assert_eq!(profile.id, id);
        assert!(!profile.phone_verified);
        assert!(profile.created_at.is_none());
    }

    #[test]
    fn test_account_id_round_trips_through_string() {
        let id = AccountId::new();
        let parsed: AccountId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<AccountId>().is_err());
    }
}
