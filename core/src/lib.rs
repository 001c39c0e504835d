//! # E-VET Core
//!
//! Phone verification core for the E-VET marketplace.
//! This crate contains the domain entities, the OTP registry, the
//! verification workflow, the collaborator interfaces (message dispatcher,
//! account store) and the error types shared by the infrastructure layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
