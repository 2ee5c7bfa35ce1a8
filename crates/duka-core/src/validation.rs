//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Boundaries                              │
//! │                                                                         │
//! │  Startup config ──► phone number, messaging base URL                   │
//! │  Route params   ──► category (closed enum), item id                    │
//! │  Store rows     ──► price text, item name                              │
//! │                                                                         │
//! │  Past these boundaries every value is already typed; the catalog,      │
//! │  cart and checkout code never re-validates.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use url::Url;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MIN_PHONE_DIGITS: usize = 9;
const MAX_PHONE_DIGITS: usize = 15;

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
///
/// ```rust
/// use duka_core::validation::validate_item_name;
///
/// assert!(validate_item_name("iPhone 12 Screen Replacement").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a messaging phone number and returns its digits-only form.
///
/// ## Rules
/// - Spaces, dashes and one leading `+` are stripped
/// - The rest must be ASCII digits, 9 to 15 of them (E.164 length)
///
/// ```rust
/// use duka_core::validation::validate_phone_number;
///
/// assert_eq!(validate_phone_number("+254-741-145421").unwrap(), "254741145421");
/// assert!(validate_phone_number("0741").is_err());
/// ```
pub fn validate_phone_number(raw: &str) -> ValidationResult<String> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let digits: String = trimmed.chars().filter(|c| *c != ' ' && *c != '-').collect();

    if digits.is_empty() {
        return Err(ValidationError::Required {
            field: "phone_number".to_string(),
        });
    }

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone_number".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if digits.len() < MIN_PHONE_DIGITS {
        return Err(ValidationError::TooShort {
            field: "phone_number".to_string(),
            min: MIN_PHONE_DIGITS,
        });
    }

    if digits.len() > MAX_PHONE_DIGITS {
        return Err(ValidationError::TooLong {
            field: "phone_number".to_string(),
            max: MAX_PHONE_DIGITS,
        });
    }

    Ok(digits)
}

/// Validates the messaging endpoint base URL.
///
/// ## Rules
/// - Must parse as an absolute URL
/// - Scheme must be `http` or `https`
/// - Must be able to carry path segments (the phone number is appended)
pub fn validate_messaging_base_url(raw: &str) -> ValidationResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| ValidationError::InvalidFormat {
        field: "messaging_base_url".to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::NotAllowed {
            field: "messaging_base_url scheme".to_string(),
            allowed: vec!["http".to_string(), "https".to_string()],
        });
    }

    if url.cannot_be_a_base() {
        return Err(ValidationError::InvalidFormat {
            field: "messaging_base_url".to_string(),
            reason: "cannot carry path segments".to_string(),
        });
    }

    Ok(url)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("USB-C Cable").is_ok());
        assert!(matches!(
            validate_item_name(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_item_name(&"x".repeat(201)),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_validate_phone_number() {
        assert_eq!(validate_phone_number("254741145421").unwrap(), "254741145421");
        assert_eq!(validate_phone_number(" +254 741 145 421 ").unwrap(), "254741145421");
        assert!(matches!(
            validate_phone_number(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_phone_number("2547411454ab"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_phone_number("12345"),
            Err(ValidationError::TooShort { .. })
        ));
        assert!(matches!(
            validate_phone_number("1234567890123456"),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_messaging_base_url() {
        assert!(validate_messaging_base_url("https://wa.me").is_ok());
        assert!(validate_messaging_base_url("http://localhost:8080/send").is_ok());
        assert!(matches!(
            validate_messaging_base_url("ftp://wa.me"),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(matches!(
            validate_messaging_base_url("mailto:shop@example.com"),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(validate_messaging_base_url("not a url").is_err());
    }
}
