//! # Cart Module
//!
//! The versioned shopping cart: the source of truth for pricing inputs,
//! never for committed money (that role passes to the Order at checkout).
//!
//! ## Versioning Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Version Counter                                 │
//! │                                                                         │
//! │  Every successful mutation increments `version`:                       │
//! │                                                                         │
//! │  add / merge quantity ──────► version + 1                              │
//! │  update quantity ───────────► version + 1                              │
//! │  remove (line existed) ─────► version + 1                              │
//! │  set / replace promo ───────► version + 1                              │
//! │  clear promo (was set) ─────► version + 1                              │
//! │  clear (checkout done) ─────► version + 1                              │
//! │                                                                         │
//! │  remove (no such line) ─────► unchanged (idempotent no-op)             │
//! │                                                                         │
//! │  Checkout presents the version it priced against; a mismatch means     │
//! │  the cart changed under the client (other tab, double submit) and      │
//! │  the attempt must fail before anything is written.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::MenuItem;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the shopping cart.
///
/// ## Design Notes
/// - `item_id`: Reference to the menu item (for availability re-checks)
/// - The remaining fields are a frozen snapshot taken when the line was
///   added. The cart displays consistent data even if the menu item is
///   edited afterwards; checkout re-validates against the live catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Menu item ID (UUID)
    pub item_id: String,

    /// Item name at time of adding (frozen)
    pub name: String,

    /// Restaurant the item belongs to (frozen)
    pub restaurant_id: String,

    /// Price in cents at time of adding (frozen)
    /// This is critical: we lock in the price when added to cart
    pub unit_price_cents: i64,

    /// Quantity in cart (always >= 1; dropping to 0 removes the line)
    pub quantity: i64,
}

impl CartLine {
    /// Creates a new cart line from a menu item and quantity.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the menu price changes,
    /// this cart line retains the original price until checkout re-prices.
    pub fn from_item(item: &MenuItem, quantity: i64) -> Self {
        CartLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            restaurant_id: item.restaurant_id.clone(),
            unit_price_cents: item.price_cents,
            quantity,
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The session-scoped shopping cart.
///
/// ## Invariants
/// - Lines are unique by `item_id` (adding the same item merges quantity)
/// - Quantity is always >= 1 (an update to 0 removes the line)
/// - At most one promo code is applied at a time; applying a new code
///   silently replaces the previous one (no stacking)
/// - `version` increases on every successful mutation and never elsewhere
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    promo_code: Option<String>,
    version: i64,
}

impl Cart {
    /// Creates a new empty cart at version 0.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            promo_code: None,
            version: 0,
        }
    }

    /// Current version counter.
    #[inline]
    pub fn version(&self) -> i64 {
        self.version
    }

    /// The currently applied promo code, if any.
    #[inline]
    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of distinct lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Adds a menu item to the cart.
    ///
    /// ## Behavior
    /// - `replace = false`: merges into an existing line's quantity, or
    ///   appends a new line
    /// - `replace = true`: overwrites the line's quantity; a quantity of 0
    ///   removes the line
    ///
    /// ## Errors
    /// - Quantity < 0, or 0 without a removal to perform
    /// - Resulting quantity above [`MAX_ITEM_QUANTITY`]
    /// - New line would push the cart past [`MAX_CART_ITEMS`]
    pub fn add(&mut self, item: &MenuItem, quantity: i64, replace: bool) -> CoreResult<()> {
        if quantity < 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        if quantity == 0 {
            // Zero only makes sense as "replace with nothing", i.e. removal.
            if replace && self.remove(&item.id) {
                return Ok(());
            }
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            let new_qty = if replace {
                quantity
            } else {
                line.quantity + quantity
            };
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = new_qty;
            self.version += 1;
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if self.lines.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.lines.push(CartLine::from_item(item, quantity));
        self.version += 1;
        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - Quantity 0: removes the line
    /// - Line not found: `ItemNotFound`
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            self.remove(item_id);
            return Ok(());
        }

        if quantity < 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.lines.iter_mut().find(|l| l.item_id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                self.version += 1;
                Ok(())
            }
            None => Err(CoreError::ItemNotFound(item_id.to_string())),
        }
    }

    /// Removes a line by item ID. Idempotent: removing a line that is not
    /// present is a no-op and does not bump the version.
    ///
    /// Returns whether a line was actually removed.
    pub fn remove(&mut self, item_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.item_id != item_id);

        if self.lines.len() < before {
            self.version += 1;
            true
        } else {
            false
        }
    }

    /// Stores a promo code reference on the cart, replacing any previous
    /// one. Rule evaluation happens before this call; the cart only holds
    /// the reference.
    pub fn set_promo(&mut self, code: &str) {
        self.promo_code = Some(code.to_string());
        self.version += 1;
    }

    /// Clears the promo reference unconditionally.
    ///
    /// Returns whether a code was present. The version bumps only when a
    /// code was actually cleared.
    pub fn clear_promo(&mut self) -> bool {
        if self.promo_code.take().is_some() {
            self.version += 1;
            true
        } else {
            false
        }
    }

    /// Empties all lines and the promo reference.
    ///
    /// ## When Used
    /// - By the checkout orchestrator after a committed order (this is the
    ///   final version bump that makes any in-flight duplicate submit stale)
    /// - By explicit user action
    pub fn clear(&mut self) {
        self.lines.clear();
        self.promo_code = None;
        self.version += 1;
    }

    /// Returns an owned, immutable view of the cart for pricing and
    /// checkout. The snapshot never aliases the cart's internal state.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            promo_code: self.promo_code.clone(),
            version: self.version,
        }
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// An immutable read view of a cart at a point in time.
///
/// Pricing and checkout consume snapshots, never the live cart, so a
/// concurrent mutation can only ever invalidate a whole attempt (via the
/// version check) rather than corrupt a computation half-way through.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub promo_code: Option<String>,
    pub version: i64,
}

impl CartSnapshot {
    /// Calculates the subtotal: Σ quantity × unit_price over all lines.
    /// Recomputed fresh on every call; never cached across a mutation.
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.lines.iter().map(|l| l.line_total_cents()).sum())
    }

    /// Checks if the snapshot has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The restaurant all lines belong to, when they agree on one.
    ///
    /// Used for promo restaurant-scope checks. `None` for an empty cart or
    /// a cart that somehow mixes restaurants.
    pub fn restaurant_id(&self) -> Option<&str> {
        let first = self.lines.first()?;
        if self
            .lines
            .iter()
            .all(|l| l.restaurant_id == first.restaurant_id)
        {
            Some(&first.restaurant_id)
        } else {
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    #[test]
    fn test_add_line() {
        let mut cart = Cart::new();
        let item = test_item("1", 29900);

        cart.add(&item, 2, false).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.version(), 1);
        assert_eq!(cart.snapshot().subtotal().cents(), 59800);
    }

    #[test]
    fn test_add_same_item_merges_quantity() {
        let mut cart = Cart::new();
        let item = test_item("1", 29900);

        cart.add(&item, 2, false).unwrap();
        cart.add(&item, 3, false).unwrap();

        assert_eq!(cart.line_count(), 1); // Still one distinct line
        assert_eq!(cart.snapshot().lines[0].quantity, 5);
        assert_eq!(cart.version(), 2);
    }

    #[test]
    fn test_add_replace_overwrites_quantity() {
        let mut cart = Cart::new();
        let item = test_item("1", 29900);

        cart.add(&item, 5, false).unwrap();
        cart.add(&item, 2, true).unwrap();

        assert_eq!(cart.snapshot().lines[0].quantity, 2);
    }

    #[test]
    fn test_add_zero_with_replace_removes() {
        let mut cart = Cart::new();
        let item = test_item("1", 29900);

        cart.add(&item, 2, false).unwrap();
        cart.add(&item, 0, true).unwrap();

        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_bad_quantities() {
        let mut cart = Cart::new();
        let item = test_item("1", 29900);

        assert!(cart.add(&item, -1, false).is_err());
        assert!(cart.add(&item, 0, false).is_err());
        assert!(cart.add(&item, MAX_ITEM_QUANTITY + 1, false).is_err());

        // Merging past the ceiling is also rejected
        cart.add(&item, 90, false).unwrap();
        assert!(matches!(
            cart.add(&item, 10, false),
            Err(CoreError::QuantityTooLarge { requested: 100, .. })
        ));

        // Failed mutations never bump the version
        assert_eq!(cart.version(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        let item = test_item("1", 29900);

        cart.add(&item, 1, false).unwrap();
        assert!(cart.remove("1"));
        assert_eq!(cart.version(), 2);

        // Second removal: no-op, version unchanged
        assert!(!cart.remove("1"));
        assert_eq!(cart.version(), 2);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        let item = test_item("1", 29900);

        cart.add(&item, 2, false).unwrap();
        cart.update_quantity("1", 7).unwrap();
        assert_eq!(cart.snapshot().lines[0].quantity, 7);

        // Quantity 0 removes
        cart.update_quantity("1", 0).unwrap();
        assert!(cart.is_empty());

        // Unknown line
        assert!(matches!(
            cart.update_quantity("missing", 1),
            Err(CoreError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_promo_replace_and_clear() {
        let mut cart = Cart::new();

        cart.set_promo("EIDFEAST");
        assert_eq!(cart.promo_code(), Some("EIDFEAST"));
        let v = cart.version();

        // Applying a new code silently replaces the old one
        cart.set_promo("WELCOME10");
        assert_eq!(cart.promo_code(), Some("WELCOME10"));
        assert_eq!(cart.version(), v + 1);

        assert!(cart.clear_promo());
        assert_eq!(cart.promo_code(), None);

        // Clearing again is a no-op
        let v = cart.version();
        assert!(!cart.clear_promo());
        assert_eq!(cart.version(), v);
    }

    #[test]
    fn test_clear_bumps_version() {
        let mut cart = Cart::new();
        let item = test_item("1", 29900);

        cart.add(&item, 2, false).unwrap();
        cart.set_promo("EIDFEAST");
        let v = cart.version();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.promo_code(), None);
        assert_eq!(cart.version(), v + 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut cart = Cart::new();
        let item = test_item("1", 29900);
        cart.add(&item, 1, false).unwrap();

        let snap = cart.snapshot();
        cart.add(&item, 5, false).unwrap();

        // The earlier snapshot is unaffected by later mutations
        assert_eq!(snap.lines[0].quantity, 1);
        assert_eq!(snap.version, 1);
        assert_eq!(snap.subtotal().cents(), 29900);
    }

    #[test]
    fn test_snapshot_restaurant_id() {
        let mut cart = Cart::new();
        assert_eq!(cart.snapshot().restaurant_id(), None);

        cart.add(&test_item("1", 100), 1, false).unwrap();
        cart.add(&test_item("2", 200), 1, false).unwrap();
        assert_eq!(cart.snapshot().restaurant_id(), Some("rest-1"));

        let mut other = test_item("3", 300);
        other.restaurant_id = "rest-2".to_string();
        cart.add(&other, 1, false).unwrap();
        assert_eq!(cart.snapshot().restaurant_id(), None);
    }

    #[test]
    fn test_subtotal_recomputed_after_mutation() {
        let mut cart = Cart::new();
        cart.add(&test_item("1", 10000), 2, false).unwrap();
        assert_eq!(cart.snapshot().subtotal().cents(), 20000);

        cart.update_quantity("1", 3).unwrap();
        assert_eq!(cart.snapshot().subtotal().cents(), 30000);
    }
}
