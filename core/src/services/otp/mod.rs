//! One-time code registry for phone verification
//!
//! This module owns the code lifecycle:
//! - Secure code generation
//! - At most one live code per phone number
//! - Lazy expiry and attempt limiting
//! - Single-use consumption on success

mod code;
mod registry;


pub use code::{codes_match, generate_code};
pub use registry::{OtpPolicy, OtpRegistry};
