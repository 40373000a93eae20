//! # Seed Data Generator
//!
//! Populates the database with restaurants, menu items, customers, and
//! promo codes for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p zaiqa-db --bin seed
//!
//! # Specify database path
//! cargo run -p zaiqa-db --bin seed -- --db ./data/zaiqa.db
//! ```

use chrono::{Duration, Utc};
use std::env;
use uuid::Uuid;

use zaiqa_core::{Customer, DiscountType, MenuItem, PromoCode, Restaurant};
use zaiqa_db::{Database, DbConfig};

/// Restaurants with their menus: (restaurant, [(item, price_cents)])
const MENUS: &[(&str, &[(&str, i64)])] = &[
    (
        "Karachi Biryani House",
        &[
            ("Chicken Biryani", 45800),
            ("Beef Biryani", 52000),
            ("Sindhi Biryani", 48500),
            ("Raita", 8000),
            ("Shami Kebab (2 pc)", 18000),
            ("Zarda", 15000),
        ],
    ),
    (
        "Lahore Tikka Corner",
        &[
            ("Chicken Tikka", 38000),
            ("Seekh Kebab (4 pc)", 42000),
            ("Malai Boti", 46000),
            ("Garlic Naan", 9000),
            ("Mint Chutney", 4000),
        ],
    ),
    (
        "Cafe Margalla",
        &[
            ("Club Sandwich", 29900),
            ("Chicken Karahi (Half)", 89000),
            ("Fresh Lime", 12050),
            ("Kheer", 16000),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let db_path = env::args()
        .skip_while(|a| a != "--db")
        .nth(1)
        .unwrap_or_else(|| "./zaiqa.db".to_string());

    println!("Seeding {}", db_path);

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let now = Utc::now();

    let mut first_restaurant_id = None;
    for &(restaurant_name, items) in MENUS {
        let restaurant = Restaurant {
            id: Uuid::new_v4().to_string(),
            name: restaurant_name.to_string(),
            is_active: true,
            created_at: now,
        };
        db.menu().insert_restaurant(&restaurant).await?;
        first_restaurant_id.get_or_insert(restaurant.id.clone());

        for &(item_name, price_cents) in items {
            let item = MenuItem {
                id: Uuid::new_v4().to_string(),
                restaurant_id: restaurant.id.clone(),
                name: item_name.to_string(),
                description: None,
                price_cents,
                is_available: true,
                created_at: now,
                updated_at: now,
            };
            db.menu().insert_item(&item).await?;
        }

        println!("  {} ({} items)", restaurant_name, items.len());
    }

    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        name: "Ayesha Khan".to_string(),
        phone: "+92 300 1234567".to_string(),
        loyalty_points: 0,
        created_at: now,
    };
    db.customers().insert(&customer).await?;
    println!("  customer {} ({})", customer.name, customer.id);

    let promos = [
        PromoCode {
            id: Uuid::new_v4().to_string(),
            code: "WELCOME10".to_string(),
            description: Some("10% off your first order".to_string()),
            discount_type: DiscountType::Percentage,
            discount_value: 10,
            max_discount_cents: Some(20000),
            min_order_cents: 30000,
            usage_limit: None,
            usage_limit_per_user: Some(1),
            starts_at: now - Duration::days(1),
            expires_at: now + Duration::days(365),
            restaurant_id: None,
            first_time_only: true,
            is_active: true,
            times_used: 0,
            created_at: now,
            updated_at: now,
        },
        PromoCode {
            id: Uuid::new_v4().to_string(),
            code: "FREERIDE".to_string(),
            description: Some("Free delivery, no minimum".to_string()),
            discount_type: DiscountType::FreeDelivery,
            discount_value: 0,
            max_discount_cents: None,
            min_order_cents: 0,
            usage_limit: Some(500),
            usage_limit_per_user: None,
            starts_at: now - Duration::days(1),
            expires_at: now + Duration::days(30),
            restaurant_id: None,
            first_time_only: false,
            is_active: true,
            times_used: 0,
            created_at: now,
            updated_at: now,
        },
        PromoCode {
            id: Uuid::new_v4().to_string(),
            code: "BIRYANI50".to_string(),
            description: Some("Rs 50 off at Karachi Biryani House".to_string()),
            discount_type: DiscountType::FixedAmount,
            discount_value: 5000,
            max_discount_cents: None,
            min_order_cents: 50000,
            usage_limit: Some(100),
            usage_limit_per_user: Some(3),
            starts_at: now - Duration::days(1),
            expires_at: now + Duration::days(14),
            restaurant_id: first_restaurant_id,
            first_time_only: false,
            is_active: true,
            times_used: 0,
            created_at: now,
            updated_at: now,
        },
    ];

    for promo in &promos {
        db.promos().insert(promo).await?;
        println!("  promo {}", promo.code);
    }

    println!("Done.");
    Ok(())
}
