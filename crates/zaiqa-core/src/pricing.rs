//! # Pricing Calculator
//!
//! Combines subtotal, promo discount, and delivery-method-conditioned
//! delivery charge into a final breakdown.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    price() - always in this order                       │
//! │                                                                         │
//! │  1. subtotal = Σ quantity × unit_price         (exact integer cents)   │
//! │                                                                         │
//! │  2. discount:                                                           │
//! │       percentage ──► subtotal × value / 100, capped at max_discount    │
//! │       fixed      ──► min(value, subtotal)                              │
//! │       free_del.  ──► 0 (sets the free_delivery flag instead)           │
//! │                                                                         │
//! │  3. delivery charge:                                                    │
//! │       takeaway      ──► 0   (method gates the charge first)            │
//! │       free_delivery ──► 0                                              │
//! │       delivery      ──► DELIVERY_FEE_CENTS                             │
//! │                                                                         │
//! │  4. total = subtotal − discount + delivery charge, clamped ≥ 0         │
//! │                                                                         │
//! │  The method check precedes the promo check so a free-delivery promo    │
//! │  on a takeaway order is not double-counted as a saving: both paths     │
//! │  independently yield a zero charge.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator is pure and never caches: every cart read recomputes the
//! breakdown from the current snapshot. Callers pass a promo only after
//! [`crate::promo::evaluate`] accepts it; validity is the evaluator's job,
//! arithmetic is this module's.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartSnapshot;
use crate::money::Money;
use crate::types::{DeliveryMethod, DiscountType, PromoCode};
use crate::DELIVERY_FEE_CENTS;

// =============================================================================
// Pricing Breakdown
// =============================================================================

/// The derived pricing projection of a cart.
///
/// Never persisted as such; the checkout transaction copies its fields
/// into the immutable Order. Carries the `delivery_method` it was computed
/// for so callers can detect drift between render and submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingBreakdown {
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub delivery_charge_cents: i64,
    pub free_delivery: bool,
    pub total_cents: i64,
    pub delivery_method: DeliveryMethod,
}

impl PricingBreakdown {
    /// Subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Delivery charge as Money.
    #[inline]
    pub fn delivery_charge(&self) -> Money {
        Money::from_cents(self.delivery_charge_cents)
    }

    /// Final total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Prices a cart snapshot.
///
/// Pure function of its inputs: same snapshot, promo, and method always
/// produce the same breakdown. An empty snapshot prices to zero; whether a
/// zero cart may check out is the orchestrator's decision, not ours.
pub fn price(
    snapshot: &CartSnapshot,
    promo: Option<&PromoCode>,
    delivery_method: DeliveryMethod,
) -> PricingBreakdown {
    let subtotal = snapshot.subtotal();

    let (discount, free_delivery) = match promo {
        Some(promo) => discount_for(promo, subtotal),
        None => (Money::zero(), false),
    };

    // Delivery method gates the charge before promo state is consulted.
    let delivery_charge = match delivery_method {
        DeliveryMethod::Takeaway => Money::zero(),
        DeliveryMethod::Delivery if free_delivery => Money::zero(),
        DeliveryMethod::Delivery => Money::from_cents(DELIVERY_FEE_CENTS),
    };

    let total = (subtotal - discount + delivery_charge).clamp_non_negative();

    PricingBreakdown {
        subtotal_cents: subtotal.cents(),
        discount_cents: discount.cents(),
        delivery_charge_cents: delivery_charge.cents(),
        free_delivery,
        total_cents: total.cents(),
        delivery_method,
    }
}

/// Computes the discount a promo grants on a subtotal.
///
/// Returns `(discount, free_delivery)`. A discount is clamped to the
/// subtotal so it can never produce a negative contribution.
fn discount_for(promo: &PromoCode, subtotal: Money) -> (Money, bool) {
    match promo.discount_type {
        DiscountType::Percentage => {
            let mut discount = subtotal.percent_of(promo.discount_value);
            if let Some(cap) = promo.max_discount_cents {
                discount = discount.min(Money::from_cents(cap));
            }
            (discount.min(subtotal), false)
        }
        DiscountType::FixedAmount => {
            (Money::from_cents(promo.discount_value).min(subtotal), false)
        }
        DiscountType::FreeDelivery => (Money::zero(), true),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::types::MenuItem;
    use chrono::{Duration, Utc};

    fn test_item(id: &str, price_cents: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            restaurant_id: "rest-1".to_string(),
            name: format!("Item {}", id),
            description: None,
            price_cents,
            is_available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn snapshot_with_subtotal(cents: i64) -> CartSnapshot {
        let mut cart = Cart::new();
        cart.add(&test_item("1", cents), 1, false).unwrap();
        cart.snapshot()
    }

    fn test_promo(discount_type: DiscountType, discount_value: i64) -> PromoCode {
        let now = Utc::now();
        PromoCode {
            id: "p1".to_string(),
            code: "PROMO".to_string(),
            description: None,
            discount_type,
            discount_value,
            max_discount_cents: None,
            min_order_cents: 0,
            usage_limit: None,
            usage_limit_per_user: None,
            starts_at: now - Duration::days(1),
            expires_at: now + Duration::days(1),
            restaurant_id: None,
            first_time_only: false,
            is_active: true,
            times_used: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_delivery_adds_flat_fee() {
        // Rs 458.00 subtotal, home delivery, no promo → Rs 498.00
        let snap = snapshot_with_subtotal(45800);
        let breakdown = price(&snap, None, DeliveryMethod::Delivery);

        assert_eq!(breakdown.subtotal_cents, 45800);
        assert_eq!(breakdown.discount_cents, 0);
        assert_eq!(breakdown.delivery_charge_cents, 4000);
        assert_eq!(breakdown.total_cents, 49800);
        assert_eq!(breakdown.delivery_method, DeliveryMethod::Delivery);
    }

    #[test]
    fn test_takeaway_never_charges_delivery() {
        // Same cart, takeaway → Rs 458.00
        let snap = snapshot_with_subtotal(45800);
        let breakdown = price(&snap, None, DeliveryMethod::Takeaway);

        assert_eq!(breakdown.delivery_charge_cents, 0);
        assert_eq!(breakdown.total_cents, 45800);
    }

    #[test]
    fn test_free_delivery_promo_on_both_methods() {
        // A free-delivery promo yields Rs 458.00 on delivery AND takeaway:
        // both paths reach a zero charge independently, no double saving.
        let snap = snapshot_with_subtotal(45800);
        let promo = test_promo(DiscountType::FreeDelivery, 0);

        let delivered = price(&snap, Some(&promo), DeliveryMethod::Delivery);
        assert_eq!(delivered.discount_cents, 0);
        assert!(delivered.free_delivery);
        assert_eq!(delivered.delivery_charge_cents, 0);
        assert_eq!(delivered.total_cents, 45800);

        let takeaway = price(&snap, Some(&promo), DeliveryMethod::Takeaway);
        assert!(takeaway.free_delivery);
        assert_eq!(takeaway.delivery_charge_cents, 0);
        assert_eq!(takeaway.total_cents, 45800);
    }

    #[test]
    fn test_percentage_discount() {
        // Rs 458.00 at 10% off, takeaway → Rs 412.20
        let snap = snapshot_with_subtotal(45800);
        let promo = test_promo(DiscountType::Percentage, 10);

        let breakdown = price(&snap, Some(&promo), DeliveryMethod::Takeaway);
        assert_eq!(breakdown.discount_cents, 4580);
        assert_eq!(breakdown.total_cents, 41220);
    }

    #[test]
    fn test_percentage_discount_respects_cap() {
        let snap = snapshot_with_subtotal(45800);
        let mut promo = test_promo(DiscountType::Percentage, 50);
        promo.max_discount_cents = Some(10000); // cap at Rs 100.00

        let breakdown = price(&snap, Some(&promo), DeliveryMethod::Takeaway);
        assert_eq!(breakdown.discount_cents, 10000);
        assert_eq!(breakdown.total_cents, 35800);
    }

    #[test]
    fn test_fixed_discount_clamped_to_subtotal() {
        // Rs 50.00 cart, Rs 80.00 fixed discount → discount = subtotal,
        // never below zero
        let snap = snapshot_with_subtotal(5000);
        let promo = test_promo(DiscountType::FixedAmount, 8000);

        let breakdown = price(&snap, Some(&promo), DeliveryMethod::Takeaway);
        assert_eq!(breakdown.discount_cents, 5000);
        assert_eq!(breakdown.total_cents, 0);
    }

    #[test]
    fn test_fixed_discount_with_delivery_fee() {
        // The delivery fee is added after the discount is clamped
        let snap = snapshot_with_subtotal(5000);
        let promo = test_promo(DiscountType::FixedAmount, 8000);

        let breakdown = price(&snap, Some(&promo), DeliveryMethod::Delivery);
        assert_eq!(breakdown.discount_cents, 5000);
        assert_eq!(breakdown.delivery_charge_cents, 4000);
        assert_eq!(breakdown.total_cents, 4000);
    }

    #[test]
    fn test_empty_cart_prices_to_zero() {
        let cart = Cart::new();
        let breakdown = price(&cart.snapshot(), None, DeliveryMethod::Takeaway);
        assert_eq!(breakdown.subtotal_cents, 0);
        assert_eq!(breakdown.total_cents, 0);
    }

    #[test]
    fn test_multi_line_subtotal() {
        let mut cart = Cart::new();
        cart.add(&test_item("1", 29900), 2, false).unwrap(); // 598.00
        cart.add(&test_item("2", 12050), 3, false).unwrap(); // 361.50

        let breakdown = price(&cart.snapshot(), None, DeliveryMethod::Takeaway);
        assert_eq!(breakdown.subtotal_cents, 59800 + 36150);
    }

    #[test]
    fn test_promo_roundtrip_restores_breakdown() {
        // Applying then removing a promo returns the breakdown to its
        // pre-apply state.
        let snap = snapshot_with_subtotal(45800);
        let promo = test_promo(DiscountType::Percentage, 15);

        let before = price(&snap, None, DeliveryMethod::Delivery);
        let with_promo = price(&snap, Some(&promo), DeliveryMethod::Delivery);
        let after = price(&snap, None, DeliveryMethod::Delivery);

        assert_ne!(before, with_promo);
        assert_eq!(before, after);
    }
}
