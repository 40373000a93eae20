//! # Ordering Service
//!
//! Wires the session carts, the repositories, and the notifier into the
//! operation surface the transport layer exposes: cart reads and
//! mutations, promo application, and checkout.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  UI ──► CartSessions (mutations) ──► price() (read-only projection)    │
//! │                │                          │                             │
//! │                │                          ▼                             │
//! │                │                    CartView { lines, breakdown,       │
//! │                │                               version }               │
//! │                ▼                                                        │
//! │          checkout() ──► validate ──► re-price ──► one transaction ──►  │
//! │                         notify (best effort) ──► clear cart           │
//! │                                                                         │
//! │  The cart is the source of truth for pricing inputs; committed money   │
//! │  lives only on the Order row written by the transaction.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::checkout::{validate_order_form, CheckoutReceipt, OrderForm, OrderingError};
use crate::error::DbError;
use crate::notify::{LogNotifier, Notifier};
use crate::pool::Database;
use crate::sessions::CartSessions;
use zaiqa_core::cart::{CartLine, CartSnapshot};
use zaiqa_core::pricing::{price, PricingBreakdown};
use zaiqa_core::promo::{evaluate, PromoContext, PromoRejection};
use zaiqa_core::validation;
use zaiqa_core::{
    CoreError, DeliveryMethod, Order, OrderLine, OrderStatus, PaymentMethod, PromoCode,
    LOYALTY_EARN_DIVISOR_CENTS,
};

/// Cart response for the transport layer: the lines, the freshly computed
/// breakdown, and the version the client must echo back at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub breakdown: PricingBreakdown,
    pub version: i64,
}

/// The ordering engine's service facade.
pub struct OrderingService {
    db: Database,
    carts: CartSessions,
    notifier: Arc<dyn Notifier>,
}

impl OrderingService {
    /// Creates a service with an explicit notifier.
    pub fn new(db: Database, notifier: Arc<dyn Notifier>) -> Self {
        OrderingService {
            db,
            carts: CartSessions::new(),
            notifier,
        }
    }

    /// Creates a service that only logs confirmations (dev and tests).
    pub fn with_log_notifier(db: Database) -> Self {
        OrderingService::new(db, Arc::new(LogNotifier))
    }

    /// The underlying database handle (seeding, diagnostics, tests).
    pub fn db(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Returns the current cart with a fresh breakdown.
    ///
    /// The breakdown is recomputed on every call; an attached promo that
    /// has since become invalid simply stops discounting the projection
    /// (checkout, by contrast, rejects it loudly).
    pub async fn cart_view(
        &self,
        session_id: &str,
        customer_id: &str,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, OrderingError> {
        debug!(session_id = %session_id, "cart_view");

        let cart = self.carts.cart(session_id).await;
        let snapshot = cart.lock().await.snapshot();
        self.view_of(snapshot, customer_id, delivery_method).await
    }

    /// Adds a menu item to the cart (merging quantities).
    pub async fn add_item(
        &self,
        session_id: &str,
        customer_id: &str,
        item_id: &str,
        quantity: i64,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, OrderingError> {
        debug!(session_id = %session_id, item_id = %item_id, quantity = %quantity, "add_item");

        validation::validate_quantity(quantity)?;
        let item = self.orderable_item(item_id).await?;

        let cart = self.carts.cart(session_id).await;
        let snapshot = {
            let mut cart = cart.lock().await;
            cart.add(&item, quantity, false)?;
            cart.snapshot()
        };

        self.view_of(snapshot, customer_id, delivery_method).await
    }

    /// Sets the quantity of a line (0 removes it).
    pub async fn update_item(
        &self,
        session_id: &str,
        customer_id: &str,
        item_id: &str,
        quantity: i64,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, OrderingError> {
        debug!(session_id = %session_id, item_id = %item_id, quantity = %quantity, "update_item");

        let cart = self.carts.cart(session_id).await;
        let snapshot = {
            let mut cart = cart.lock().await;
            cart.update_quantity(item_id, quantity)?;
            cart.snapshot()
        };

        self.view_of(snapshot, customer_id, delivery_method).await
    }

    /// Removes a line. Idempotent: removing an absent line succeeds.
    pub async fn remove_item(
        &self,
        session_id: &str,
        customer_id: &str,
        item_id: &str,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, OrderingError> {
        debug!(session_id = %session_id, item_id = %item_id, "remove_item");

        let cart = self.carts.cart(session_id).await;
        let snapshot = {
            let mut cart = cart.lock().await;
            cart.remove(item_id);
            cart.snapshot()
        };

        self.view_of(snapshot, customer_id, delivery_method).await
    }

    /// Empties the cart on explicit user action.
    pub async fn clear_cart(
        &self,
        session_id: &str,
        customer_id: &str,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, OrderingError> {
        debug!(session_id = %session_id, "clear_cart");

        let cart = self.carts.cart(session_id).await;
        let snapshot = {
            let mut cart = cart.lock().await;
            cart.clear();
            cart.snapshot()
        };

        self.view_of(snapshot, customer_id, delivery_method).await
    }

    // =========================================================================
    // Promo Operations
    // =========================================================================

    /// Applies a promo code to the cart.
    ///
    /// On rejection the cart is left unchanged and the caller receives the
    /// specific reason. On success the code is stored (silently replacing
    /// any previous code) and the discounted breakdown returned.
    pub async fn apply_promo(
        &self,
        session_id: &str,
        customer_id: &str,
        code: &str,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, OrderingError> {
        debug!(session_id = %session_id, code = %code, "apply_promo");

        validation::validate_promo_code(code)?;

        let cart = self.carts.cart(session_id).await;
        let snapshot = cart.lock().await.snapshot();

        let promo = self
            .check_promo(code, &snapshot, customer_id)
            .await?
            .map_err(OrderingError::Promo)?;

        let snapshot = {
            let mut cart = cart.lock().await;
            cart.set_promo(&promo.code);
            cart.snapshot()
        };

        info!(session_id = %session_id, code = %promo.code, "Promo applied");
        self.view_of(snapshot, customer_id, delivery_method).await
    }

    /// Clears the applied promo, if any.
    pub async fn remove_promo(
        &self,
        session_id: &str,
        customer_id: &str,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, OrderingError> {
        debug!(session_id = %session_id, "remove_promo");

        let cart = self.carts.cart(session_id).await;
        let snapshot = {
            let mut cart = cart.lock().await;
            cart.clear_promo();
            cart.snapshot()
        };

        self.view_of(snapshot, customer_id, delivery_method).await
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Runs one checkout attempt: validate, re-price, commit atomically,
    /// notify best-effort, clear the cart.
    ///
    /// `submitted_version` is the cart version the client priced against.
    /// The cart lock is held for the whole attempt, so a concurrent
    /// mutation or duplicate submit on the same session waits and then
    /// observes the bumped version as `StaleCart` instead of racing the
    /// transaction.
    pub async fn checkout(
        &self,
        session_id: &str,
        submitted_version: i64,
        form: &OrderForm,
    ) -> Result<CheckoutReceipt, OrderingError> {
        debug!(session_id = %session_id, version = %submitted_version, "checkout");

        let cart_arc = self.carts.cart(session_id).await;
        let mut cart = cart_arc.lock().await;

        // --- Validating ------------------------------------------------------

        // The concurrency guard comes before everything else: a stale
        // submit must see StaleCart, not whatever state the winning
        // attempt left behind (e.g. EmptyCart after its final clear).
        if cart.version() != submitted_version {
            return Err(OrderingError::StaleCart {
                submitted: submitted_version,
                current: cart.version(),
            });
        }

        if cart.is_empty() {
            return Err(OrderingError::EmptyCart);
        }

        validate_order_form(form)?;

        let snapshot = cart.snapshot();
        let mut gone_ids = Vec::new();
        let mut gone_names = Vec::new();
        for line in &snapshot.lines {
            if !self.line_still_orderable(line).await? {
                gone_ids.push(line.item_id.clone());
                gone_names.push(line.name.clone());
            }
        }
        if !gone_names.is_empty() {
            // Drop the dead lines and send the customer back to review the
            // cart rather than silently committing a shrunken order.
            for id in &gone_ids {
                cart.remove(id);
            }
            warn!(session_id = %session_id, items = ?gone_names, "Checkout blocked by unavailable items");
            return Err(OrderingError::ItemsUnavailable(gone_names));
        }

        // --- Pricing ---------------------------------------------------------

        // Authoritative promo re-check: time windows and usage counts may
        // have moved since apply-time. Same evaluate(), fresher context.
        let promo = match &snapshot.promo_code {
            Some(code) => Some(
                self.check_promo(code, &snapshot, &form.customer_id)
                    .await?
                    .map_err(OrderingError::Promo)?,
            ),
            None => None,
        };

        let breakdown = price(&snapshot, promo.as_ref(), form.delivery_method);

        // --- Committing ------------------------------------------------------

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            customer_id: form.customer_id.clone(),
            customer_name: form.customer_name.trim().to_string(),
            customer_phone: form.customer_phone.trim().to_string(),
            delivery_method: form.delivery_method,
            payment_method: form.payment_method,
            delivery_address: form.delivery_address.clone(),
            promo_code: promo.as_ref().map(|p| p.code.clone()),
            subtotal_cents: breakdown.subtotal_cents,
            discount_cents: breakdown.discount_cents,
            delivery_charge_cents: breakdown.delivery_charge_cents,
            free_delivery_applied: breakdown.free_delivery,
            total_cents: breakdown.total_cents,
            status: OrderStatus::Placed,
            notes: form.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        // Loyalty points are a cash-on-delivery policy carried over from
        // the in-store program; card orders earn nothing.
        let points = match form.payment_method {
            PaymentMethod::CashOnDelivery => breakdown.total_cents / LOYALTY_EARN_DIVISOR_CENTS,
            PaymentMethod::Card => 0,
        };

        let orders = self.db.orders();
        let promos = self.db.promos();
        let customers = self.db.customers();

        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        orders.insert_order(&mut tx, &order).await?;

        for line in &snapshot.lines {
            let order_line = OrderLine {
                id: Uuid::new_v4().to_string(),
                order_id: order.id.clone(),
                item_id: line.item_id.clone(),
                name_snapshot: line.name.clone(),
                unit_price_cents: line.unit_price_cents,
                quantity: line.quantity,
                line_total_cents: line.line_total_cents(),
                created_at: now,
            };
            orders.insert_line(&mut tx, &order_line).await?;
        }

        if let Some(promo) = &promo {
            // The guarded increment decides the usage race under the
            // database's write lock. Losing it rolls the whole order back:
            // an order must never exist referencing a promo that failed to
            // record its usage.
            if !promos.consume(&mut tx, &promo.id).await? {
                tx.rollback().await.map_err(DbError::from)?;
                warn!(code = %promo.code, "Promo usage race lost, checkout rolled back");
                return Err(OrderingError::Promo(PromoRejection::GlobalLimitReached));
            }
            promos
                .record_usage(&mut tx, &promo.id, &form.customer_id, &order.id)
                .await?;
        }

        if points > 0 {
            customers
                .credit_loyalty_points(&mut tx, &form.customer_id, points)
                .await?;
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(
            order_id = %order.id,
            total = %order.total_cents,
            lines = snapshot.lines.len(),
            promo = ?order.promo_code,
            "Order committed"
        );

        // --- Notifying (best effort) -----------------------------------------

        let notification_warning = match self.notifier.send_order_confirmation(&order).await {
            Ok(()) => None,
            Err(err) => {
                warn!(order_id = %order.id, error = %err, "Order confirmation failed");
                Some(err.to_string())
            }
        };

        // --- Done ------------------------------------------------------------

        // The final version bump: any duplicate submit still waiting on
        // the lock now fails the version guard.
        cart.clear();

        Ok(CheckoutReceipt {
            order_id: order.id,
            breakdown,
            loyalty_points_earned: points,
            notification_warning,
        })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Fetches a menu item and confirms it can be ordered right now.
    async fn orderable_item(&self, item_id: &str) -> Result<zaiqa_core::MenuItem, OrderingError> {
        let menu = self.db.menu();

        let item = menu
            .get_item(item_id)
            .await?
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;

        if !item.is_available {
            return Err(CoreError::ItemUnavailable {
                name: item.name.clone(),
            }
            .into());
        }

        let restaurant_open = menu
            .get_restaurant(&item.restaurant_id)
            .await?
            .map(|r| r.is_active)
            .unwrap_or(false);
        if !restaurant_open {
            return Err(CoreError::ItemUnavailable {
                name: item.name.clone(),
            }
            .into());
        }

        Ok(item)
    }

    /// Re-checks a single cart line against the live catalog.
    async fn line_still_orderable(&self, line: &CartLine) -> Result<bool, OrderingError> {
        let menu = self.db.menu();

        let item = match menu.get_item(&line.item_id).await? {
            Some(item) if item.is_available => item,
            _ => return Ok(false),
        };

        let active = menu
            .get_restaurant(&item.restaurant_id)
            .await?
            .map(|r| r.is_active)
            .unwrap_or(false);

        Ok(active)
    }

    /// Looks a promo up and evaluates it against the snapshot.
    ///
    /// Outer error: storage failure. Inner result: the evaluator's
    /// verdict, with `NotFound` produced here at the lookup site.
    async fn check_promo(
        &self,
        code: &str,
        snapshot: &CartSnapshot,
        customer_id: &str,
    ) -> Result<Result<PromoCode, PromoRejection>, OrderingError> {
        let promo = match self.db.promos().get_by_code(code).await? {
            Some(promo) => promo,
            None => return Ok(Err(PromoRejection::NotFound)),
        };

        let ctx = PromoContext {
            now: Utc::now(),
            subtotal_cents: snapshot.subtotal().cents(),
            cart_restaurant_id: snapshot.restaurant_id().map(String::from),
            prior_completed_orders: self
                .db
                .orders()
                .completed_order_count(customer_id)
                .await?,
            prior_uses_of_code: self.db.promos().usage_count(&promo.id, customer_id).await?,
        };

        Ok(evaluate(&promo, &ctx).map(|()| promo))
    }

    /// Prices a snapshot into the client-facing view.
    ///
    /// An attached promo that no longer evaluates is dropped from the
    /// projection (with a debug trace); only checkout escalates it.
    async fn view_of(
        &self,
        snapshot: CartSnapshot,
        customer_id: &str,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, OrderingError> {
        let promo = match &snapshot.promo_code {
            Some(code) => match self.check_promo(code, &snapshot, customer_id).await? {
                Ok(promo) => Some(promo),
                Err(reason) => {
                    debug!(code = %code, reason = %reason, "Attached promo no longer valid");
                    None
                }
            },
            None => None,
        };

        let breakdown = price(&snapshot, promo.as_ref(), delivery_method);

        Ok(CartView {
            lines: snapshot.lines,
            breakdown,
            version: snapshot.version,
        })
    }
}
