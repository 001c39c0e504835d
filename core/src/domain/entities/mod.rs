//! Domain entities representing core business objects.

pub mod challenge;
pub mod pending_registration;
pub mod profile;

// Re-export commonly used types
pub use challenge::{Challenge, CODE_LENGTH, DEFAULT_EXPIRATION_SECONDS, MAX_ATTEMPTS};
pub use pending_registration::PendingRegistration;
pub use profile::{AccountId, NewProfile, Profile, UserType};
