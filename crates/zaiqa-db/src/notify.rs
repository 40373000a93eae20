//! # Notification Port
//!
//! Best-effort order confirmation delivery, decoupled from checkout
//! correctness: a failed notification is logged and surfaced as a warning,
//! never rolled into the financial transaction.
//!
//! The actual transport (email gateway, SMS provider) lives outside this
//! repo; implementations of [`Notifier`] adapt it.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use zaiqa_core::Order;

/// Notification delivery failure.
#[derive(Debug, Error)]
#[error("Notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Sends order confirmations to customers.
///
/// Called by the checkout orchestrator AFTER the order transaction has
/// committed. Implementations must not assume they can veto the order.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a confirmation for a freshly committed order.
    async fn send_order_confirmation(&self, order: &Order) -> Result<(), NotifyError>;
}

/// Notifier that only writes a structured log line.
///
/// The default for development and tests; production wires a real
/// transport adapter instead.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_order_confirmation(&self, order: &Order) -> Result<(), NotifyError> {
        info!(
            order_id = %order.id,
            customer = %order.customer_name,
            total = %order.total_cents,
            "Order confirmation (log only)"
        );
        Ok(())
    }
}
