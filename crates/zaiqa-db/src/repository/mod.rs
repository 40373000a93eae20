//! # Repository Module
//!
//! Database repository implementations for the Zaiqa ordering engine.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  OrderingService                                                       │
//! │       │                                                                 │
//! │       │  db.menu().get_item(id)                                        │
//! │       ▼                                                                 │
//! │  MenuRepository                                                        │
//! │  ├── get_item(&self, id)                                               │
//! │  ├── get_restaurant(&self, id)                                         │
//! │  └── set_item_availability(&self, id, available)                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Methods taking `&mut SqliteConnection` participate in the caller's    │
//! │  transaction; methods on `&self` run against the pool directly.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`menu::MenuRepository`] - Restaurants and menu items
//! - [`promo::PromoRepository`] - Promo codes and usage accounting
//! - [`order::OrderRepository`] - Orders and order lines
//! - [`customer::CustomerRepository`] - Customers and loyalty balances

pub mod customer;
pub mod menu;
pub mod order;
pub mod promo;
