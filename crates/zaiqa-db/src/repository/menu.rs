//! # Menu Repository
//!
//! Database operations for restaurants and menu items.
//!
//! The ordering engine treats the catalog as a read model: carts snapshot
//! item data at add-time, and checkout re-reads the live rows to catch
//! items sold out or restaurants suspended while the cart sat open.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use zaiqa_core::{MenuItem, Restaurant};

/// Repository for restaurant and menu item operations.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Gets a menu item by ID.
    pub async fn get_item(&self, id: &str) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, restaurant_id, name, description, price_cents,
                   is_available, created_at, updated_at
            FROM menu_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists the available items of a restaurant, menu-page order.
    pub async fn list_items(&self, restaurant_id: &str) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, restaurant_id, name, description, price_cents,
                   is_available, created_at, updated_at
            FROM menu_items
            WHERE restaurant_id = ?1 AND is_available = 1
            ORDER BY name
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets a restaurant by ID.
    pub async fn get_restaurant(&self, id: &str) -> DbResult<Option<Restaurant>> {
        let restaurant = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT id, name, is_active, created_at
            FROM restaurants
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(restaurant)
    }

    /// Inserts a restaurant (seed data and tests).
    pub async fn insert_restaurant(&self, restaurant: &Restaurant) -> DbResult<()> {
        debug!(id = %restaurant.id, name = %restaurant.name, "Inserting restaurant");

        sqlx::query(
            r#"
            INSERT INTO restaurants (id, name, is_active, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&restaurant.id)
        .bind(&restaurant.name)
        .bind(restaurant.is_active)
        .bind(restaurant.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a menu item (seed data and tests).
    pub async fn insert_item(&self, item: &MenuItem) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting menu item");

        sqlx::query(
            r#"
            INSERT INTO menu_items (
                id, restaurant_id, name, description, price_cents,
                is_available, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.id)
        .bind(&item.restaurant_id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(item.is_available)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Marks a menu item available or sold out.
    pub async fn set_item_availability(&self, id: &str, available: bool) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE menu_items
            SET is_available = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(available)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu item", id));
        }

        Ok(())
    }

    /// Activates or suspends a restaurant.
    pub async fn set_restaurant_active(&self, id: &str, active: bool) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE restaurants
            SET is_active = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(active)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Restaurant", id));
        }

        Ok(())
    }
}
