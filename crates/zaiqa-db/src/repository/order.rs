//! # Order Repository
//!
//! Database operations for placed orders and their lines.
//!
//! Orders are written exclusively by the checkout transaction; this
//! repository therefore exposes its inserts as transaction-scoped methods
//! and its reads against the pool.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use zaiqa_core::{Order, OrderLine};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order inside the caller's transaction.
    pub async fn insert_order(&self, conn: &mut SqliteConnection, order: &Order) -> DbResult<()> {
        debug!(id = %order.id, total = %order.total_cents, "Inserting order");

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_id, customer_name, customer_phone,
                delivery_method, payment_method, delivery_address, promo_code,
                subtotal_cents, discount_cents, delivery_charge_cents,
                free_delivery_applied, total_cents, status, notes,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                ?15, ?16, ?17
            )
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(&order.customer_name)
        .bind(&order.customer_phone)
        .bind(order.delivery_method)
        .bind(order.payment_method)
        .bind(&order.delivery_address)
        .bind(&order.promo_code)
        .bind(order.subtotal_cents)
        .bind(order.discount_cents)
        .bind(order.delivery_charge_cents)
        .bind(order.free_delivery_applied)
        .bind(order.total_cents)
        .bind(order.status)
        .bind(&order.notes)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Inserts an order line inside the caller's transaction.
    ///
    /// ## Snapshot Pattern
    /// Item name and unit price are copied onto the line. Later menu edits
    /// never retroactively affect a placed order.
    pub async fn insert_line(&self, conn: &mut SqliteConnection, line: &OrderLine) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO order_lines (
                id, order_id, item_id, name_snapshot, unit_price_cents,
                quantity, line_total_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&line.id)
        .bind(&line.order_id)
        .bind(&line.item_id)
        .bind(&line.name_snapshot)
        .bind(line.unit_price_cents)
        .bind(line.quantity)
        .bind(line.line_total_cents)
        .bind(line.created_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, customer_name, customer_phone,
                   delivery_method, payment_method, delivery_address,
                   promo_code, subtotal_cents, discount_cents,
                   delivery_charge_cents, free_delivery_applied, total_cents,
                   status, notes, created_at, updated_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all lines for an order.
    pub async fn get_lines(&self, order_id: &str) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT id, order_id, item_id, name_snapshot, unit_price_cents,
                   quantity, line_total_cents, created_at
            FROM order_lines
            WHERE order_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Counts a customer's prior orders that were not cancelled.
    ///
    /// Feeds the first-time-only promo check: a cancelled order does not
    /// cost a customer their first-order discount.
    pub async fn completed_order_count(&self, customer_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM orders
            WHERE customer_id = ?1 AND status != 'cancelled'
            "#,
        )
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Counts every order in the database.
    ///
    /// Used by tests to assert that failed checkouts write nothing.
    pub async fn count_all(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
