//! Verification code generation and comparison

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};

/// Generate a cryptographically secure random numeric code
///
/// Uses OsRng (OS-provided CSPRNG). The first digit is never zero, so a
/// 6-digit code falls in 100000..=999999.
pub fn generate_code(length: usize) -> String {
    let length = length.clamp(1, 9) as u32;
    let low = 10u32.pow(length - 1);
    let high = 10u32.pow(length);
    OsRng.gen_range(low..high).to_string()
}

/// Compare a stored code with user input in constant time
///
/// Surrounding whitespace in the input is ignored.
pub fn codes_match(stored: &str, provided: &str) -> bool {
    let provided = provided.trim();
    if stored.len() != provided.len() {
        return false;
    }
    constant_time_eq(stored.as_bytes(), provided.as_bytes())
}
