//! # zaiqa-db: Persistence and Orchestration for the Zaiqa Ordering Engine
//!
//! This crate provides database access and the checkout flow for Zaiqa.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Zaiqa Data Flow                                  │
//! │                                                                         │
//! │  Transport layer (HTTP handler, CLI, test)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     zaiqa-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │OrderingService│    │  Repositories │    │  Migrations  │  │   │
//! │  │   │ (service.rs)  │───►│  menu, promo  │    │  (embedded)  │  │   │
//! │  │   │               │    │  order, cust. │    │              │  │   │
//! │  │   │ CartSessions  │    │               │    │ 001_init.sql │  │   │
//! │  │   │ checkout tx   │    │  SqlitePool   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (WAL mode)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (menu, promo, order, customer)
//! - [`sessions`] - Per-session cart registry
//! - [`checkout`] - Order form, receipt, and typed checkout failures
//! - [`service`] - The OrderingService facade and checkout orchestration
//! - [`notify`] - Best-effort order confirmation port
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zaiqa_db::{Database, DbConfig, OrderingService};
//!
//! let db = Database::new(DbConfig::new("path/to/zaiqa.db")).await?;
//! let service = OrderingService::with_log_notifier(db);
//!
//! let view = service
//!     .add_item("session-1", "customer-1", "item-uuid", 2, DeliveryMethod::Delivery)
//!     .await?;
//! println!("total: {}", view.breakdown.total());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod notify;
pub mod pool;
pub mod repository;
pub mod service;
pub mod sessions;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{CheckoutReceipt, OrderForm, OrderingError};
pub use error::DbError;
pub use notify::{LogNotifier, Notifier, NotifyError};
pub use pool::{Database, DbConfig};
pub use service::{CartView, OrderingService};
pub use sessions::CartSessions;

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::menu::MenuRepository;
pub use repository::order::OrderRepository;
pub use repository::promo::PromoRepository;
