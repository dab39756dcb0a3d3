//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// E.164 format: leading +, country code starting 1-9, 2-15 digits total
static E164_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{1,14}$").unwrap()
});

/// Check if a phone number is valid E.164 (e.g., `+12025550123`)
pub fn is_valid_phone(phone: &str) -> bool {
    E164_PHONE_REGEX.is_match(phone)
}

/// Mask a phone number for logging (e.g., `+12****0123`)
pub fn mask_phone(phone: &str) -> String {
    if phone.len() >= 8 {
        format!("{}****{}", &phone[0..3], &phone[phone.len() - 4..])
    } else {
        "****".to_string()
    }
}
