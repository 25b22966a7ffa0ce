// Validation utilities module
// Custom validators referenced from `#[validate(custom = "...")]` attributes

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;
use validator::ValidationError;

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.\-]{3,32}$").expect("username pattern is a valid regex")
    })
}

/// Usernames are 3-32 characters of letters, digits, `_`, `.` or `-`
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username_pattern().is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_username"))
    }
}

/// Rejects empty or whitespace-only text
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("must_not_be_blank"))
    } else {
        Ok(())
    }
}

/// Largest price a `NUMERIC(12,2)` column holds
pub fn max_price() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Prices may be zero but never negative, and must fit `NUMERIC(12,2)`
/// once rounded to cents
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        Err(ValidationError::new("price_must_not_be_negative"))
    } else if price.round_dp(2) > max_price() {
        Err(ValidationError::new("price_out_of_range"))
    } else {
        Ok(())
    }
}
