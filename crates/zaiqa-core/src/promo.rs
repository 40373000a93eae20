//! # Promo Rule Evaluation
//!
//! Decides whether a promo code is usable for a given cart, customer, and
//! restaurant. This is the single validity authority: the same
//! [`evaluate`] runs at apply-time (optimistic, session-local), at every
//! cart read (so an expired code silently stops discounting the display),
//! and at commit-time (authoritative, alongside the transaction that
//! increments the usage counter).
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              evaluate() - first failing check wins                      │
//! │                                                                         │
//! │   1. code exists?            ──no──► NotFound (at the lookup site)     │
//! │   2. is_active?              ──no──► Inactive                          │
//! │   3. now >= starts_at?       ──no──► NotYetActive                      │
//! │   4. now <= expires_at?      ──no──► Expired                           │
//! │   5. restaurant matches?     ──no──► RestaurantMismatch                │
//! │   6. first order if required ──no──► NotFirstTime                      │
//! │   7. subtotal >= minimum?    ──no──► MinimumNotMet (with shortfall)    │
//! │   8. global uses remain?     ──no──► GlobalLimitReached                │
//! │   9. per-user uses remain?   ──no──► PerUserLimitReached               │
//! │                                                                         │
//! │  Each reason is distinct so the UI can render a precise message,       │
//! │  never a generic "invalid code".                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::types::PromoCode;

// =============================================================================
// Rejection Reasons
// =============================================================================

/// Why a promo code was refused.
///
/// Serialized with a `reason` tag so the frontend can switch on it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[serde(tag = "reason", rename_all = "snake_case")]
#[ts(export)]
pub enum PromoRejection {
    /// No promo code with this name exists.
    #[error("Promo code not found")]
    NotFound,

    /// The code has been switched off.
    #[error("This promo code is no longer active")]
    Inactive,

    /// The code's window has not opened yet.
    #[error("This promo code is not active yet")]
    NotYetActive,

    /// The code's window has closed.
    #[error("This promo code has expired")]
    Expired,

    /// The code belongs to a different restaurant than the cart.
    #[error("This promo code is not valid for this restaurant")]
    RestaurantMismatch,

    /// The code is reserved for first orders and this customer has
    /// completed orders before.
    #[error("This promo code is for first orders only")]
    NotFirstTime,

    /// The cart subtotal is below the code's minimum order amount.
    /// Carries the shortfall so the UI can say exactly how much to add.
    #[error("Add Rs {}.{:02} more to use this code (minimum order Rs {}.{:02})",
            .shortfall_cents / 100, .shortfall_cents % 100,
            .minimum_cents / 100, .minimum_cents % 100)]
    MinimumNotMet {
        minimum_cents: i64,
        shortfall_cents: i64,
    },

    /// The code has been used up across all customers.
    #[error("This promo code has reached its usage limit")]
    GlobalLimitReached,

    /// This customer has used the code as often as allowed.
    #[error("You have already used this promo code the maximum number of times")]
    PerUserLimitReached,
}

// =============================================================================
// Evaluation Context
// =============================================================================

/// Everything [`evaluate`] needs to know about the world.
///
/// The caller gathers these facts (clock, cart snapshot, usage counts from
/// the database) so the evaluation itself stays a pure function, testable
/// without any storage.
#[derive(Debug, Clone)]
pub struct PromoContext {
    /// The evaluation instant. Passed in, never read from a global clock.
    pub now: DateTime<Utc>,

    /// Current cart subtotal in cents.
    pub subtotal_cents: i64,

    /// The restaurant the cart's lines belong to, when uniform.
    pub cart_restaurant_id: Option<String>,

    /// How many non-cancelled orders this customer has placed before.
    pub prior_completed_orders: i64,

    /// How many times this customer has used this specific code before.
    pub prior_uses_of_code: i64,
}

// =============================================================================
// Evaluation
// =============================================================================

/// Evaluates a promo code against a context.
///
/// Returns `Ok(())` when the code is currently usable, or the first
/// failing check's [`PromoRejection`]. `NotFound` is produced by the
/// lookup call site (there is no code to evaluate); everything else is
/// decided here, in the documented order.
///
/// ## Example
/// ```rust
/// use chrono::{Duration, Utc};
/// use zaiqa_core::promo::{evaluate, PromoContext, PromoRejection};
/// use zaiqa_core::types::{DiscountType, PromoCode};
///
/// let now = Utc::now();
/// let promo = PromoCode {
///     id: "p1".into(),
///     code: "TENOFF".into(),
///     description: None,
///     discount_type: DiscountType::Percentage,
///     discount_value: 10,
///     max_discount_cents: None,
///     min_order_cents: 15000,
///     usage_limit: None,
///     usage_limit_per_user: None,
///     starts_at: now - Duration::days(1),
///     expires_at: now + Duration::days(1),
///     restaurant_id: None,
///     first_time_only: false,
///     is_active: true,
///     times_used: 0,
///     created_at: now,
///     updated_at: now,
/// };
///
/// let ctx = PromoContext {
///     now,
///     subtotal_cents: 12000, // Rs 120.00, minimum is Rs 150.00
///     cart_restaurant_id: None,
///     prior_completed_orders: 0,
///     prior_uses_of_code: 0,
/// };
///
/// assert_eq!(
///     evaluate(&promo, &ctx),
///     Err(PromoRejection::MinimumNotMet {
///         minimum_cents: 15000,
///         shortfall_cents: 3000,
///     })
/// );
/// ```
pub fn evaluate(promo: &PromoCode, ctx: &PromoContext) -> Result<(), PromoRejection> {
    if !promo.is_active {
        return Err(PromoRejection::Inactive);
    }

    if ctx.now < promo.starts_at {
        return Err(PromoRejection::NotYetActive);
    }

    if ctx.now > promo.expires_at {
        return Err(PromoRejection::Expired);
    }

    if let Some(restaurant_id) = &promo.restaurant_id {
        if ctx.cart_restaurant_id.as_deref() != Some(restaurant_id.as_str()) {
            return Err(PromoRejection::RestaurantMismatch);
        }
    }

    if promo.first_time_only && ctx.prior_completed_orders > 0 {
        return Err(PromoRejection::NotFirstTime);
    }

    if ctx.subtotal_cents < promo.min_order_cents {
        return Err(PromoRejection::MinimumNotMet {
            minimum_cents: promo.min_order_cents,
            shortfall_cents: promo.min_order_cents - ctx.subtotal_cents,
        });
    }

    if let Some(limit) = promo.usage_limit {
        if promo.times_used >= limit {
            return Err(PromoRejection::GlobalLimitReached);
        }
    }

    if let Some(limit) = promo.usage_limit_per_user {
        if ctx.prior_uses_of_code >= limit {
            return Err(PromoRejection::PerUserLimitReached);
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountType;
    use chrono::Duration;

    fn test_promo(now: DateTime<Utc>) -> PromoCode {
        PromoCode {
            id: "p1".to_string(),
            code: "TENOFF".to_string(),
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: 10,
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

    fn test_ctx(now: DateTime<Utc>) -> PromoContext {
        PromoContext {
            now,
            subtotal_cents: 50000,
            cart_restaurant_id: Some("rest-1".to_string()),
            prior_completed_orders: 0,
            prior_uses_of_code: 0,
        }
    }

    #[test]
    fn test_valid_promo_passes() {
        let now = Utc::now();
        assert_eq!(evaluate(&test_promo(now), &test_ctx(now)), Ok(()));
    }

    #[test]
    fn test_inactive() {
        let now = Utc::now();
        let mut promo = test_promo(now);
        promo.is_active = false;
        assert_eq!(
            evaluate(&promo, &test_ctx(now)),
            Err(PromoRejection::Inactive)
        );
    }

    #[test]
    fn test_inactive_wins_over_expired() {
        // First failing check wins: a disabled AND expired code reports
        // Inactive, not Expired.
        let now = Utc::now();
        let mut promo = test_promo(now);
        promo.is_active = false;
        promo.expires_at = now - Duration::days(1);
        assert_eq!(
            evaluate(&promo, &test_ctx(now)),
            Err(PromoRejection::Inactive)
        );
    }

    #[test]
    fn test_not_yet_active() {
        let now = Utc::now();
        let mut promo = test_promo(now);
        promo.starts_at = now + Duration::hours(1);
        assert_eq!(
            evaluate(&promo, &test_ctx(now)),
            Err(PromoRejection::NotYetActive)
        );
    }

    #[test]
    fn test_expired() {
        let now = Utc::now();
        let mut promo = test_promo(now);
        promo.expires_at = now - Duration::hours(1);
        assert_eq!(
            evaluate(&promo, &test_ctx(now)),
            Err(PromoRejection::Expired)
        );
    }

    #[test]
    fn test_restaurant_mismatch() {
        let now = Utc::now();
        let mut promo = test_promo(now);
        promo.restaurant_id = Some("rest-2".to_string());
        assert_eq!(
            evaluate(&promo, &test_ctx(now)),
            Err(PromoRejection::RestaurantMismatch)
        );

        // Matching restaurant passes
        promo.restaurant_id = Some("rest-1".to_string());
        assert_eq!(evaluate(&promo, &test_ctx(now)), Ok(()));

        // A global code never mismatches
        promo.restaurant_id = None;
        let mut ctx = test_ctx(now);
        ctx.cart_restaurant_id = None;
        assert_eq!(evaluate(&promo, &ctx), Ok(()));
    }

    #[test]
    fn test_first_time_only() {
        let now = Utc::now();
        let mut promo = test_promo(now);
        promo.first_time_only = true;

        let mut ctx = test_ctx(now);
        assert_eq!(evaluate(&promo, &ctx), Ok(()));

        ctx.prior_completed_orders = 1;
        assert_eq!(evaluate(&promo, &ctx), Err(PromoRejection::NotFirstTime));
    }

    #[test]
    fn test_minimum_not_met_includes_shortfall() {
        // Cart subtotal Rs 120.00, promo minimum Rs 150.00
        let now = Utc::now();
        let mut promo = test_promo(now);
        promo.min_order_cents = 15000;

        let mut ctx = test_ctx(now);
        ctx.subtotal_cents = 12000;

        assert_eq!(
            evaluate(&promo, &ctx),
            Err(PromoRejection::MinimumNotMet {
                minimum_cents: 15000,
                shortfall_cents: 3000,
            })
        );

        // Exactly at the minimum passes
        ctx.subtotal_cents = 15000;
        assert_eq!(evaluate(&promo, &ctx), Ok(()));
    }

    #[test]
    fn test_global_limit() {
        let now = Utc::now();
        let mut promo = test_promo(now);
        promo.usage_limit = Some(100);
        promo.times_used = 100;
        assert_eq!(
            evaluate(&promo, &test_ctx(now)),
            Err(PromoRejection::GlobalLimitReached)
        );

        promo.times_used = 99;
        assert_eq!(evaluate(&promo, &test_ctx(now)), Ok(()));
    }

    #[test]
    fn test_per_user_limit() {
        let now = Utc::now();
        let mut promo = test_promo(now);
        promo.usage_limit_per_user = Some(2);

        let mut ctx = test_ctx(now);
        ctx.prior_uses_of_code = 2;
        assert_eq!(
            evaluate(&promo, &ctx),
            Err(PromoRejection::PerUserLimitReached)
        );

        ctx.prior_uses_of_code = 1;
        assert_eq!(evaluate(&promo, &ctx), Ok(()));
    }

    #[test]
    fn test_minimum_checked_before_usage_limits() {
        let now = Utc::now();
        let mut promo = test_promo(now);
        promo.min_order_cents = 15000;
        promo.usage_limit = Some(1);
        promo.times_used = 1;

        let mut ctx = test_ctx(now);
        ctx.subtotal_cents = 1000;

        // Both fail, but the minimum check comes first
        assert!(matches!(
            evaluate(&promo, &ctx),
            Err(PromoRejection::MinimumNotMet { .. })
        ));
    }

    #[test]
    fn test_rejection_messages() {
        let err = PromoRejection::MinimumNotMet {
            minimum_cents: 15000,
            shortfall_cents: 3000,
        };
        assert_eq!(
            err.to_string(),
            "Add Rs 30.00 more to use this code (minimum order Rs 150.00)"
        );
    }
}
