//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// 10 to 15 ASCII digits with an optional leading '+'. `\d` would also match
// other Unicode decimal digits.
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("phone pattern is a valid regex"));

/// Check a phone number against the accepted format
///
/// No normalization is applied: spaces, dashes and parentheses are rejected.
pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Mask a phone number for logging, keeping only the last 4 digits
pub fn mask_phone_number(phone: &str) -> String {
    let len = phone.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }

    let visible: String = phone.chars().skip(len - 4).collect();
    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(len - 5), visible)
    } else {
        format!("{}{}", "*".repeat(len - 4), visible)
    }
}
