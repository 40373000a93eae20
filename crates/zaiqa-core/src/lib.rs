//! # zaiqa-core: Pure Business Logic for the Zaiqa Ordering Engine
//!
//! This crate is the **heart** of Zaiqa. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Zaiqa Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Frontend                                 │   │
//! │  │    Menu UI ──► Cart UI ──► Checkout UI ──► Confirmation UI     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP/JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    OrderingService (zaiqa-db)                   │   │
//! │  │    cart_view, add_item, apply_promo, checkout, ...             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ zaiqa-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  pricing  │  │   │
//! │  │   │ MenuItem  │  │   Money   │  │   Cart    │  │ Breakdown │  │   │
//! │  │   │ PromoCode │  │  percent  │  │ CartLine  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐                                 │   │
//! │  │   │   promo   │  │ validation│                                 │   │
//! │  │   │ evaluate  │  │   rules   │                                 │   │
//! │  │   └───────────┘  └───────────┘                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    zaiqa-db (Database Layer)                    │   │
//! │  │        SQLite queries, migrations, checkout transaction         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, PromoCode, Order, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Versioned cart with snapshot views
//! - [`pricing`] - Pricing breakdown calculator
//! - [`promo`] - Promo code rule evaluation
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paisa/cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use zaiqa_core::money::Money;
//!
//! // Create money from cents (never from floats!)
//! let subtotal = Money::from_cents(45800); // Rs 458.00
//!
//! // 10% discount, rounded to the nearest paisa
//! let discount = subtotal.percent_of(10);
//! assert_eq!(discount.cents(), 4580);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod promo;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use zaiqa_core::Money` instead of
// `use zaiqa_core::money::Money`

pub use cart::{Cart, CartLine, CartSnapshot};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use pricing::{price, PricingBreakdown};
pub use promo::{evaluate, PromoContext, PromoRejection};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and keeps order tickets printable.
/// Can be made configurable per-restaurant in future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in a cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 100 instead of 10).
/// Large catering orders go through a separate flow.
pub const MAX_ITEM_QUANTITY: i64 = 99;

/// Flat delivery charge in cents for home delivery orders (Rs 40.00)
///
/// ## Business Reason
/// A single city-wide rider fee. Takeaway orders never pay it, and a
/// free-delivery promo waives it. Zone-based pricing is a future concern.
pub const DELIVERY_FEE_CENTS: i64 = 4000;

/// Loyalty earn rate: one point per this many cents of order total (Rs 10.00)
///
/// ## Business Reason
/// Points are credited at checkout for cash-on-delivery orders only,
/// matching the in-store policy that card settlements carry their own fees.
pub const LOYALTY_EARN_DIVISOR_CENTS: i64 = 1000;
