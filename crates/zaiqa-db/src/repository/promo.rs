//! # Promo Repository
//!
//! Database operations for promo codes and their usage accounting.
//!
//! ## The Guarded Increment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            Why consume() is an UPDATE ... WHERE, not a read            │
//! │                                                                         │
//! │  Two checkouts race for the last use of a capped code:                 │
//! │                                                                         │
//! │  T1: UPDATE ... WHERE times_used < usage_limit   → 1 row   (winner)    │
//! │  T2: UPDATE ... WHERE times_used < usage_limit   → 0 rows  (loser)     │
//! │                                                                         │
//! │  The condition is evaluated under SQLite's write lock, so the          │
//! │  counter can never exceed the limit no matter how many attempts        │
//! │  race. The loser's whole checkout transaction rolls back.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use zaiqa_core::PromoCode;

/// Repository for promo code operations.
#[derive(Debug, Clone)]
pub struct PromoRepository {
    pool: SqlitePool,
}

impl PromoRepository {
    /// Creates a new PromoRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PromoRepository { pool }
    }

    /// Looks a promo code up by its business identifier.
    ///
    /// Codes are matched case-insensitively: customers type them by hand.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<PromoCode>> {
        let promo = sqlx::query_as::<_, PromoCode>(
            r#"
            SELECT id, code, description, discount_type, discount_value,
                   max_discount_cents, min_order_cents, usage_limit,
                   usage_limit_per_user, starts_at, expires_at, restaurant_id,
                   first_time_only, is_active, times_used,
                   created_at, updated_at
            FROM promo_codes
            WHERE code = ?1 COLLATE NOCASE
            "#,
        )
        .bind(code.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(promo)
    }

    /// Inserts a promo code (seed data and tests).
    pub async fn insert(&self, promo: &PromoCode) -> DbResult<()> {
        debug!(code = %promo.code, "Inserting promo code");

        sqlx::query(
            r#"
            INSERT INTO promo_codes (
                id, code, description, discount_type, discount_value,
                max_discount_cents, min_order_cents, usage_limit,
                usage_limit_per_user, starts_at, expires_at, restaurant_id,
                first_time_only, is_active, times_used, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                ?15, ?16, ?17
            )
            "#,
        )
        .bind(&promo.id)
        .bind(&promo.code)
        .bind(&promo.description)
        .bind(promo.discount_type)
        .bind(promo.discount_value)
        .bind(promo.max_discount_cents)
        .bind(promo.min_order_cents)
        .bind(promo.usage_limit)
        .bind(promo.usage_limit_per_user)
        .bind(promo.starts_at)
        .bind(promo.expires_at)
        .bind(&promo.restaurant_id)
        .bind(promo.first_time_only)
        .bind(promo.is_active)
        .bind(promo.times_used)
        .bind(promo.created_at)
        .bind(promo.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Consumes one use of a promo code inside the caller's transaction.
    ///
    /// Returns `false` when no use remains (the guarded condition matched
    /// zero rows), in which case the caller must roll back: an order must
    /// never commit referencing a promo whose usage was not recorded.
    pub async fn consume(&self, conn: &mut SqliteConnection, promo_id: &str) -> DbResult<bool> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE promo_codes
            SET times_used = times_used + 1, updated_at = ?2
            WHERE id = ?1
              AND is_active = 1
              AND (usage_limit IS NULL OR times_used < usage_limit)
            "#,
        )
        .bind(promo_id)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Records a usage entry inside the caller's transaction.
    ///
    /// One row per committed order that consumed the code; this is what
    /// the per-user limit counts.
    pub async fn record_usage(
        &self,
        conn: &mut SqliteConnection,
        promo_id: &str,
        customer_id: &str,
        order_id: &str,
    ) -> DbResult<()> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO promo_usages (id, promo_id, customer_id, order_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&id)
        .bind(promo_id)
        .bind(customer_id)
        .bind(order_id)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Counts how many times a customer has used a promo code.
    pub async fn usage_count(&self, promo_id: &str, customer_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM promo_usages
            WHERE promo_id = ?1 AND customer_id = ?2
            "#,
        )
        .bind(promo_id)
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
