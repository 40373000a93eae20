//! # Customer Repository
//!
//! Database operations for customer accounts and loyalty balances.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use zaiqa_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, loyalty_points, created_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a customer (seed data and tests).
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, phone, loyalty_points, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(customer.loyalty_points)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Credits loyalty points inside the caller's transaction.
    ///
    /// Points are earned at checkout and must commit or roll back together
    /// with the order that earned them.
    pub async fn credit_loyalty_points(
        &self,
        conn: &mut SqliteConnection,
        customer_id: &str,
        points: i64,
    ) -> DbResult<()> {
        debug!(customer_id = %customer_id, points = %points, "Crediting loyalty points");

        sqlx::query(
            r#"
            UPDATE customers
            SET loyalty_points = loyalty_points + ?2
            WHERE id = ?1
            "#,
        )
        .bind(customer_id)
        .bind(points)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
