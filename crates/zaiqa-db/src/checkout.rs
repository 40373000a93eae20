//! # Checkout Types
//!
//! The order form, the typed checkout failures, and the receipt returned
//! for a committed order.
//!
//! ## Checkout State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 One checkout attempt                                    │
//! │                                                                         │
//! │  Validating ──► Pricing ──► Committing ──► Notifying ──► Done          │
//! │      │             │             │                                      │
//! │      ▼             ▼             ▼                                      │
//! │  StaleCart     Promo(...)    Promo(GlobalLimitReached)                 │
//! │  EmptyCart                   Db(...)                                   │
//! │  AddressRequired                                                        │
//! │  ItemsUnavailable            ← Committing is a single transaction:     │
//! │  Validation(...)               order + lines + promo accounting +      │
//! │                                loyalty succeed or fail together        │
//! │                                                                         │
//! │  Notifying can only produce a warning on the receipt, never a          │
//! │  failure: the order is already committed.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DbError;
use zaiqa_core::pricing::PricingBreakdown;
use zaiqa_core::promo::PromoRejection;
use zaiqa_core::validation;
use zaiqa_core::{CoreError, DeliveryMethod, PaymentMethod, ValidationError};

// =============================================================================
// Order Form
// =============================================================================

/// The submitted checkout form.
///
/// `cart_version` travels separately (it is a query-level concern, not
/// customer data): see `OrderingService::checkout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    /// The logged-in customer placing the order.
    pub customer_id: String,

    /// Name for the order ticket.
    pub customer_name: String,

    /// Contact phone for the rider / counter.
    pub customer_phone: String,

    /// The method the customer actually submitted - not whatever the cart
    /// was last rendered with.
    pub delivery_method: DeliveryMethod,

    /// How the order will be paid.
    pub payment_method: PaymentMethod,

    /// Required when `delivery_method` is `Delivery`.
    pub delivery_address: Option<String>,

    /// Free-text kitchen notes.
    pub notes: Option<String>,
}

/// Validates the order form fields.
///
/// A delivery order with a missing or too-short address fails with the
/// dedicated `AddressRequired` so the UI can highlight the one field that
/// actually blocks the rider.
pub fn validate_order_form(form: &OrderForm) -> Result<(), OrderingError> {
    validation::validate_customer_name(&form.customer_name)?;
    validation::validate_phone(&form.customer_phone)?;

    if form.delivery_method == DeliveryMethod::Delivery {
        let address = form.delivery_address.as_deref().unwrap_or("");
        validation::validate_delivery_address(address).map_err(|err| match err {
            ValidationError::Required { .. } | ValidationError::TooShort { .. } => {
                OrderingError::AddressRequired
            }
            other => OrderingError::Validation(other),
        })?;
    }

    Ok(())
}

// =============================================================================
// Checkout Receipt
// =============================================================================

/// What a successful checkout hands back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    /// The committed order's identity.
    pub order_id: String,

    /// The breakdown the order was committed with.
    pub breakdown: PricingBreakdown,

    /// Loyalty points credited by this order (0 for card payments).
    pub loyalty_points_earned: i64,

    /// Present when the confirmation notification could not be delivered.
    /// The order itself is committed and valid regardless.
    pub notification_warning: Option<String>,
}

// =============================================================================
// Ordering Error
// =============================================================================

/// Typed failures of the ordering service.
///
/// Every rejection a client can receive is a distinct variant; the
/// transport layer maps them to precise user-facing messages instead of a
/// generic "something went wrong".
#[derive(Debug, Error)]
pub enum OrderingError {
    /// Checkout attempted on a cart with no lines.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// The submitted cart version no longer matches the cart.
    ///
    /// ## When This Occurs
    /// - Double-submit: the first attempt's final clear bumped the version
    /// - Cross-tab drift: the cart was edited in another tab
    ///
    /// The client must re-fetch the cart and re-derive pricing; the server
    /// never retries on its own because it cannot know whether the
    /// customer's intent survives the new pricing.
    #[error("Cart changed since it was priced (submitted version {submitted}, current {current})")]
    StaleCart { submitted: i64, current: i64 },

    /// Lines referencing items that are no longer orderable. The offending
    /// lines have been removed from the cart; the customer reviews what is
    /// left instead of silently paying for a shrunken order.
    #[error("Some items are no longer available: {}", .0.join(", "))]
    ItemsUnavailable(Vec<String>),

    /// A delivery order without a usable delivery address.
    #[error("A delivery address is required for delivery orders")]
    AddressRequired,

    /// The promo attached to the cart was rejected.
    #[error(transparent)]
    Promo(#[from] PromoRejection),

    /// A cart rule was violated (bad quantity, unknown item, ...).
    #[error(transparent)]
    Cart(#[from] CoreError),

    /// A form field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The database failed underneath us. Retryable from the client's
    /// point of view; nothing was committed.
    #[error(transparent)]
    Db(#[from] DbError),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery_form() -> OrderForm {
        OrderForm {
            customer_id: "c1".to_string(),
            customer_name: "Ayesha Khan".to_string(),
            customer_phone: "+92 300 1234567".to_string(),
            delivery_method: DeliveryMethod::Delivery,
            payment_method: PaymentMethod::CashOnDelivery,
            delivery_address: Some("House 12, Street 4, G-9/1, Islamabad".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(validate_order_form(&delivery_form()).is_ok());
    }

    #[test]
    fn test_missing_address_for_delivery() {
        let mut form = delivery_form();
        form.delivery_address = None;
        assert!(matches!(
            validate_order_form(&form),
            Err(OrderingError::AddressRequired)
        ));

        form.delivery_address = Some("home".to_string()); // too short
        assert!(matches!(
            validate_order_form(&form),
            Err(OrderingError::AddressRequired)
        ));
    }

    #[test]
    fn test_takeaway_needs_no_address() {
        let mut form = delivery_form();
        form.delivery_method = DeliveryMethod::Takeaway;
        form.delivery_address = None;
        assert!(validate_order_form(&form).is_ok());
    }

    #[test]
    fn test_bad_name_and_phone() {
        let mut form = delivery_form();
        form.customer_name = "".to_string();
        assert!(matches!(
            validate_order_form(&form),
            Err(OrderingError::Validation(_))
        ));

        let mut form = delivery_form();
        form.customer_phone = "nope".to_string();
        assert!(matches!(
            validate_order_form(&form),
            Err(OrderingError::Validation(_))
        ));
    }

    #[test]
    fn test_stale_cart_message() {
        let err = OrderingError::StaleCart {
            submitted: 4,
            current: 6,
        };
        assert_eq!(
            err.to_string(),
            "Cart changed since it was priced (submitted version 4, current 6)"
        );
    }
}
