//! # Session Cart Registry
//!
//! Maps session ids to their carts. Each cart sits behind its own async
//! Mutex so a checkout can hold the cart across its database transaction:
//! a mutation (or a duplicate submit) from another tab of the same session
//! waits, then observes the bumped version and fails fast with a stale-cart
//! error instead of corrupting the attempt in flight.
//!
//! This is optimistic concurrency at the cart boundary: nothing blocks
//! across sessions, and within a session waiting is bounded by one
//! checkout transaction.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use zaiqa_core::Cart;

/// Registry of per-session carts.
///
/// Carts are created empty on first interaction: a session cookie with no
/// cart yet simply prices to an empty breakdown.
#[derive(Debug, Default)]
pub struct CartSessions {
    inner: Mutex<HashMap<String, Arc<Mutex<Cart>>>>,
}

impl CartSessions {
    /// Creates an empty registry.
    pub fn new() -> Self {
        CartSessions {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cart for a session, creating an empty one on first use.
    ///
    /// The registry lock is only held for the map lookup; callers then
    /// lock the individual cart for as long as their operation needs.
    pub async fn cart(&self, session_id: &str) -> Arc<Mutex<Cart>> {
        let mut map = self.inner.lock().await;
        map.entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Cart::new())))
            .clone()
    }

    /// Number of live sessions (diagnostics).
    pub async fn session_count(&self) -> usize {
        self.inner.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_session_same_cart() {
        let sessions = CartSessions::new();

        {
            let cart = sessions.cart("s1").await;
            cart.lock().await.set_promo("EIDFEAST");
        }

        let cart = sessions.cart("s1").await;
        assert_eq!(cart.lock().await.promo_code(), Some("EIDFEAST"));
        assert_eq!(sessions.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let sessions = CartSessions::new();

        sessions.cart("s1").await.lock().await.set_promo("EIDFEAST");
        let other = sessions.cart("s2").await;

        assert_eq!(other.lock().await.promo_code(), None);
        assert_eq!(sessions.session_count().await, 2);
    }
}
