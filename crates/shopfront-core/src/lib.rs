//! # shopfront-core: Pure Business Logic for shopfront
//!
//! This crate is the heart of the storefront. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    shopfront Architecture                       │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                 HTTP handlers (apps/web)                  │  │
//! │  │   /addCart ──► /reviewCart ──► /checkoutCart              │  │
//! │  └────────────────────────────┬──────────────────────────────┘  │
//! │                               │                                 │
//! │  ┌────────────────────────────▼──────────────────────────────┐  │
//! │  │            ★ shopfront-core (THIS CRATE) ★                │  │
//! │  │                                                           │  │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌────────────┐   │  │
//! │  │   │  types  │  │  money  │  │  cart   │  │ validation │   │  │
//! │  │   │ Product │  │  Money  │  │  Cart   │  │   rules    │   │  │
//! │  │   │  Order  │  │         │  │         │  │            │   │  │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └────────────┘   │  │
//! │  │                                                           │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS      │  │
//! │  └────────────────────────────┬──────────────────────────────┘  │
//! │                               │                                 │
//! │  ┌────────────────────────────▼──────────────────────────────┐  │
//! │  │              shopfront-db (Database Layer)                │  │
//! │  │      SQLite queries, migrations, checkout transaction     │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, OrderDetail)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Session-scoped shopping cart
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// Re-exports for convenience: `use shopfront_core::Money` instead of
// `use shopfront_core::money::Money`
pub use cart::Cart;
pub use error::ValidationError;
pub use money::Money;
pub use types::*;

/// Maximum quantity of a single product in a cart or order line.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Products shown per catalog page.
pub const CATALOG_PAGE_SIZE: u32 = 10;
