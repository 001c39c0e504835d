//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Tanzanian mobile number as typed into the registration forms
static TZ_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+255|0)[67]\d{8}$").unwrap()
});

// Country-code-prefixed MSISDN, digits only
static MSISDN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[1-9]\d{7,14}$").unwrap()
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Convert a phone number to the gateway form: digits only, country code
/// first, no leading `+`.
///
/// National numbers (`0712345678`) get `default_country_code` in place of the
/// trunk `0`; the `00` international prefix is dropped.
pub fn to_msisdn(phone: &str, default_country_code: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if let Some(rest) = digits.strip_prefix("00") {
        rest.to_string()
    } else if let Some(rest) = digits.strip_prefix('0') {
        format!("{}{}", default_country_code, rest)
    } else {
        digits
    }
}

/// Check if a phone number is a valid Tanzanian mobile number
pub fn is_valid_tz_mobile(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    TZ_MOBILE_REGEX.is_match(&normalized)
}

/// Check if a value is a plausible MSISDN (8-15 digits, no leading zero)
pub fn is_valid_msisdn(msisdn: &str) -> bool {
    MSISDN_REGEX.is_match(msisdn)
}

/// Mask a phone number for display (e.g., 255****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
