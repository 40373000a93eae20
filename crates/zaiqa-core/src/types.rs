//! # Domain Types
//!
//! Core domain types used throughout the Zaiqa ordering engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │    PromoCode    │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  code (biz id)  │   │  id (UUID)      │       │
//! │  │  restaurant_id  │   │  discount_type  │   │  delivery info  │       │
//! │  │  price_cents    │   │  usage limits   │   │  total_cents    │       │
//! │  │  is_available   │   │  time window    │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ DeliveryMethod  │   │  PaymentMethod  │   │  DiscountType   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Delivery       │   │  CashOnDelivery │   │  Percentage     │       │
//! │  │  Takeaway       │   │  Card           │   │  FixedAmount    │       │
//! │  └─────────────────┘   └─────────────────┘   │  FreeDelivery   │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID where one exists (promo `code`) - human-readable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Restaurant
// =============================================================================

/// A restaurant whose menu items can be ordered.
///
/// Only `is_active` matters to the ordering engine: an order may not be
/// placed against a suspended or unapproved restaurant, and availability is
/// re-checked at checkout because approval can be revoked while a cart sits
/// open in a browser tab.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Restaurant {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Whether the restaurant is approved and currently taking orders.
    pub is_active: bool,

    /// When the restaurant was registered.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Menu Item
// =============================================================================

/// A menu item available for ordering.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct MenuItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Restaurant this item belongs to.
    pub restaurant_id: String,

    /// Display name shown on the menu and on order tickets.
    pub name: String,

    /// Optional description for the menu page.
    pub description: Option<String>,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Whether the item can currently be ordered (sold out = false).
    pub is_available: bool,

    /// When the item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer account, as seen by the ordering engine.
///
/// The engine reads prior-order and promo-usage counts for promo
/// eligibility and credits loyalty points at checkout. Account management
/// itself lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Full name.
    pub name: String,

    /// Contact phone number.
    pub phone: String,

    /// Accumulated loyalty points.
    pub loyalty_points: i64,

    /// When the account was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Delivery Method
// =============================================================================

/// How the customer receives the order.
///
/// The delivery method gates the delivery charge: takeaway orders never
/// pay one, independently of any promo state.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Rider delivery to the customer's address.
    Delivery,
    /// Customer picks the order up at the counter.
    Takeaway,
}

// =============================================================================
// Payment Method
// =============================================================================

#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash handed to the rider or at the counter.
    CashOnDelivery,
    /// Card payment collected online.
    Card,
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of a placed order.
///
/// The ordering engine only ever produces `Placed`; the remaining
/// transitions belong to the staff-facing order management flow and are
/// modeled here so the persisted status column is honest.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been committed by checkout.
    Placed,
    /// Restaurant has accepted the order.
    Confirmed,
    /// Order has been handed to the customer.
    Delivered,
    /// Order was cancelled before delivery.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Placed
    }
}

// =============================================================================
// Promo Code
// =============================================================================

/// The kind of discount a promo code grants.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `discount_value` is a whole percentage (0-100) off the subtotal.
    Percentage,
    /// `discount_value` is a fixed amount in cents off the subtotal.
    FixedAmount,
    /// The delivery charge is waived; the subtotal is untouched.
    FreeDelivery,
}

/// A promo code with its eligibility constraints.
///
/// `times_used` is the global usage counter. The invariant
/// `times_used <= usage_limit` (when a limit is set) is enforced by the
/// checkout transaction's guarded increment, not merely by validation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PromoCode {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier customers type in (e.g. "EIDFEAST").
    pub code: String,

    /// Optional marketing description.
    pub description: Option<String>,

    /// Kind of discount this code grants.
    pub discount_type: DiscountType,

    /// Percentage (0-100) or fixed amount in cents, depending on type.
    pub discount_value: i64,

    /// Cap on a percentage discount, in cents. Ignored for other types.
    pub max_discount_cents: Option<i64>,

    /// Minimum cart subtotal in cents required to apply the code.
    pub min_order_cents: i64,

    /// Global usage cap across all customers (None = unlimited).
    pub usage_limit: Option<i64>,

    /// Per-customer usage cap (None = unlimited).
    pub usage_limit_per_user: Option<i64>,

    /// First instant the code is valid.
    #[ts(as = "String")]
    pub starts_at: DateTime<Utc>,

    /// Last instant the code is valid.
    #[ts(as = "String")]
    pub expires_at: DateTime<Utc>,

    /// Restricts the code to one restaurant (None = valid everywhere).
    pub restaurant_id: Option<String>,

    /// Only customers with no prior completed orders may use the code.
    pub first_time_only: bool,

    /// Kill switch for the code.
    pub is_active: bool,

    /// Global usage counter, incremented by the checkout transaction.
    pub times_used: i64,

    /// When the code was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the code was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl PromoCode {
    /// Returns the minimum order amount as Money.
    #[inline]
    pub fn min_order(&self) -> Money {
        Money::from_cents(self.min_order_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
///
/// Immutable snapshot of the cart and its pricing at checkout time: later
/// menu price changes never retroactively affect a placed order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
    /// Required when `delivery_method` is `Delivery`.
    pub delivery_address: Option<String>,
    /// Promo code applied at checkout, if any.
    pub promo_code: Option<String>,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub delivery_charge_cents: i64,
    pub free_delivery_applied: bool,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A line item in a placed order.
/// Uses snapshot pattern to freeze menu data at time of checkout.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderLine {
    pub id: String,
    pub order_id: String,
    pub item_id: String,
    /// Item name at time of checkout (frozen).
    pub name_snapshot: String,
    /// Unit price in cents at time of checkout (frozen).
    pub unit_price_cents: i64,
    /// Quantity ordered.
    pub quantity: i64,
    /// Line total (unit_price × quantity).
    pub line_total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl OrderLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Placed);
    }

    #[test]
    fn test_delivery_method_serde_names() {
        assert_eq!(
            serde_json::to_string(&DeliveryMethod::Takeaway).unwrap(),
            "\"takeaway\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap(),
            "\"cash_on_delivery\""
        );
    }

    #[test]
    fn test_menu_item_price() {
        let item = MenuItem {
            id: "i1".to_string(),
            restaurant_id: "r1".to_string(),
            name: "Chicken Karahi".to_string(),
            description: None,
            price_cents: 45800,
            is_available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(item.price(), Money::from_cents(45800));
    }
}
