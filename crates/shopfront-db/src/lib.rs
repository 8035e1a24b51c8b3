//! # shopfront-db: Database Layer for shopfront
//!
//! SQLite persistence for the storefront: connection pooling,
//! embedded migrations, repositories for products and orders, and
//! the transactional checkout.
//!
//! ## Layering
//! ```text
//! apps/web (HTTP handlers)
//!      │
//!      ▼
//! shopfront-db (THIS CRATE)
//! ├── pool         - DbConfig + Database handle
//! ├── migrations   - embedded schema migrations
//! ├── repository   - ProductRepository, OrderRepository
//! ├── checkout     - cart → order transaction
//! └── error        - DbError
//!      │
//!      ▼
//! SQLite (WAL mode, foreign keys enabled)
//! ```
//!
//! The checkout transaction is the one place in the system that
//! relies on the database's atomic commit/rollback guarantee; see
//! [`checkout`] for the invariants it maintains.

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use checkout::{place_order, CheckoutError, CheckoutOutcome, PlacedOrder};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
