//! # Validation Module
//!
//! Input validation utilities for the Zaiqa ordering engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Ordering Service (Rust)                                      │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use zaiqa_core::validation::{validate_phone, validate_quantity};
//!
//! validate_phone("+92 300 1234567").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum length for a usable delivery address.
const MIN_ADDRESS_LEN: usize = 10;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 2 and 100 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() < 2 {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: 2,
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a contact phone number.
///
/// ## Rules
/// - Must not be empty
/// - 7 to 20 characters after trimming
/// - Digits, spaces, hyphens, and one optional leading `+`
///
/// ## Example
/// ```rust
/// use zaiqa_core::validation::validate_phone;
///
/// assert!(validate_phone("+92 300 1234567").is_ok());
/// assert!(validate_phone("0301-2345678").is_ok());
/// assert!(validate_phone("call me").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.len() < 7 {
        return Err(ValidationError::TooShort {
            field: "phone".to_string(),
            min: 7,
        });
    }

    if phone.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 20,
        });
    }

    let rest = phone.strip_prefix('+').unwrap_or(phone);
    if !rest
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a delivery address.
///
/// ## Rules
/// - Must not be empty
/// - At least 10 characters: a rider cannot find "home"
/// - At most 500 characters
///
/// Only called for delivery orders; takeaway orders have no address.
pub fn validate_delivery_address(address: &str) -> ValidationResult<()> {
    let address = address.trim();

    if address.is_empty() {
        return Err(ValidationError::Required {
            field: "delivery address".to_string(),
        });
    }

    if address.len() < MIN_ADDRESS_LEN {
        return Err(ValidationError::TooShort {
            field: "delivery address".to_string(),
            min: MIN_ADDRESS_LEN,
        });
    }

    if address.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "delivery address".to_string(),
            max: 500,
        });
    }

    Ok(())
}

/// Validates a promo code string before lookup.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Alphanumeric only (codes are entered by hand; no whitespace games)
pub fn validate_promo_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "promo code".to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "promo code".to_string(),
            max: 50,
        });
    }

    if !code.chars().all(|c| c.is_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "promo code".to_string(),
            reason: "must contain only letters and numbers".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (99)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (complimentary items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_name() {
        assert!(validate_customer_name("Ayesha Khan").is_ok());
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("A").is_err());
        assert!(validate_customer_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("+92 300 1234567").is_ok());
        assert!(validate_phone("0301-2345678").is_ok());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("12345").is_err()); // too short
        assert!(validate_phone("abc-def-ghij").is_err()); // letters
        assert!(validate_phone("+921234567890123456789").is_err()); // too long
    }

    #[test]
    fn test_delivery_address() {
        assert!(validate_delivery_address("House 12, Street 4, G-9/1, Islamabad").is_ok());
        assert!(validate_delivery_address("").is_err());
        assert!(validate_delivery_address("home").is_err()); // too short
        assert!(validate_delivery_address(&"x".repeat(501)).is_err());
    }

    #[test]
    fn test_promo_code_format() {
        assert!(validate_promo_code("EIDFEAST").is_ok());
        assert!(validate_promo_code("WELCOME10").is_ok());
        assert!(validate_promo_code("").is_err());
        assert!(validate_promo_code("TEN OFF").is_err()); // whitespace
        assert!(validate_promo_code(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(100).is_err());
    }

    #[test]
    fn test_price_cents() {
        assert!(validate_price_cents(45800).is_ok());
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }
}
