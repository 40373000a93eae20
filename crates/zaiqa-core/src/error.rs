//! # Error Types
//!
//! Domain-specific error types for zaiqa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  zaiqa-core errors (this file)                                         │
//! │  ├── CoreError        - Cart and domain rule violations                │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── PromoRejection   - Typed promo refusals (promo module)            │
//! │                                                                         │
//! │  zaiqa-db errors (separate crate)                                      │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── CheckoutError    - Checkout flow failures                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → API → Frontend    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, limits, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations in cart handling.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu item cannot be found.
    #[error("Menu item not found: {0}")]
    ItemNotFound(String),

    /// Menu item exists but cannot currently be ordered.
    ///
    /// ## When This Occurs
    /// - Item marked sold out by the restaurant
    /// - Restaurant suspended or closed for orders
    #[error("'{name}' is not available right now")]
    ItemUnavailable { name: String },

    /// Cart has exceeded maximum allowed distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs. Never silently
/// defaulted: the caller always sees the specific field that failed.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric phone).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
