//! # Checkout
//!
//! The transactional cart → order conversion. This is the one code
//! path in shopfront that leans on the database's atomic
//! commit/rollback guarantee.
//!
//! ## Transaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     place_order(user, cart)                     │
//! │                                                                 │
//! │  cart empty? ──► return EmptyCart (no transaction, no writes)   │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  BEGIN                                                          │
//! │   ├── INSERT order (total = 0)      ← id exists before details  │
//! │   ├── for each (product, quantity):                             │
//! │   │     ├── guard quantity > 0      ── fail ──► ROLLBACK, Err   │
//! │   │     ├── SELECT product          ── missing ► ROLLBACK, Err  │
//! │   │     ├── INSERT detail (price snapshot)                      │
//! │   │     └── total += price × quantity                           │
//! │   ├── UPDATE order SET total                                    │
//! │  COMMIT                                                         │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  return Placed { order, details }                               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - The committed total equals Σ(unit price at checkout × quantity).
//! - An order is either fully persisted with all its details and a
//!   correct total, or not persisted at all.
//! - Errors are returned to the caller, never swallowed; the caller
//!   keeps the cart so the user can retry.
//!
//! Clearing the session cart is the caller's responsibility and must
//! happen only on `Placed`.

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::DbError;
use shopfront_core::validation::validate_quantity;
use shopfront_core::{Cart, Money, Order, OrderDetail, Product};

// =============================================================================
// Outcome & Error Types
// =============================================================================

/// Result of a checkout attempt that did not fail.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// The cart was empty; nothing was written and no transaction
    /// was opened. Informational, not an error.
    EmptyCart,

    /// The order was committed and the cart may now be cleared.
    Placed(PlacedOrder),
}

/// A committed order with its line items.
#[derive(Debug)]
pub struct PlacedOrder {
    pub order: Order,
    pub details: Vec<OrderDetail>,
}

/// Checkout failures. Every variant means the transaction was rolled
/// back in full and the cart should be left untouched.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A cart entry references a product no longer in the catalog.
    ///
    /// The whole checkout fails rather than silently dropping the
    /// item: the confirmation must match what the user reviewed.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A cart entry carries a non-positive or oversized quantity.
    /// Carts accept these without complaint; checkout does not.
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: String, quantity: i64 },

    /// Persistence failure (constraint violation, connection loss).
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(err: sqlx::Error) -> Self {
        CheckoutError::Db(err.into())
    }
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Transactionally materializes a session cart into a durable order.
///
/// On success the returned [`PlacedOrder`] carries the committed
/// order and details. On any failure the transaction is rolled back
/// in full (sqlx rolls back an unfinished transaction on drop) and
/// the error is propagated.
///
/// ## Arguments
/// * `pool` - connection pool; the transaction spans one connection
/// * `user_id` - the authenticated user placing the order
/// * `cart` - snapshot of the session cart
pub async fn place_order(
    pool: &SqlitePool,
    user_id: &str,
    cart: &Cart,
) -> Result<CheckoutOutcome, CheckoutError> {
    if cart.is_empty() {
        debug!(user_id = %user_id, "Checkout with empty cart, nothing to do");
        return Ok(CheckoutOutcome::EmptyCart);
    }

    debug!(
        user_id = %user_id,
        distinct_products = cart.distinct_products(),
        "Starting checkout transaction"
    );

    let mut tx = pool.begin().await?;

    // The order row goes in first so its id exists before the detail
    // rows reference it. Total starts at zero and is fixed up below.
    let mut order = Order {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        order_date: Utc::now(),
        total_cents: 0,
    };

    sqlx::query("INSERT INTO orders (id, user_id, order_date, total_cents) VALUES (?1, ?2, ?3, ?4)")
        .bind(&order.id)
        .bind(&order.user_id)
        .bind(order.order_date)
        .bind(order.total_cents)
        .execute(&mut *tx)
        .await?;

    let mut total = Money::zero();
    let mut details = Vec::with_capacity(cart.distinct_products());

    for (product_id, quantity) in cart.entries() {
        if validate_quantity(quantity).is_err() {
            warn!(
                product_id = %product_id,
                quantity = %quantity,
                "Rejecting checkout with invalid quantity"
            );
            return Err(CheckoutError::InvalidQuantity {
                product_id: product_id.to_string(),
                quantity,
            });
        }

        // Look up the product inside the transaction so the snapshot
        // price and the existence check see a consistent catalog.
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, image, price_cents, created_at, updated_at \
             FROM products WHERE id = ?1",
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            warn!(product_id = %product_id, "Cart references unknown product, aborting checkout");
            CheckoutError::ProductNotFound(product_id.to_string())
        })?;

        let detail = OrderDetail {
            id: Uuid::new_v4().to_string(),
            order_id: order.id.clone(),
            product_id: product.id.clone(),
            quantity,
            unit_price_cents: product.price_cents,
        };

        sqlx::query(
            r#"
            INSERT INTO order_details (id, order_id, product_id, quantity, unit_price_cents)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&detail.id)
        .bind(&detail.order_id)
        .bind(&detail.product_id)
        .bind(detail.quantity)
        .bind(detail.unit_price_cents)
        .execute(&mut *tx)
        .await?;

        total += product.price().multiply_quantity(quantity);
        details.push(detail);
    }

    order.total_cents = total.cents();

    sqlx::query("UPDATE orders SET total_cents = ?2 WHERE id = ?1")
        .bind(&order.id)
        .bind(order.total_cents)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        order_id = %order.id,
        user_id = %user_id,
        total = %total,
        lines = details.len(),
        "Order placed"
    );

    Ok(CheckoutOutcome::Placed(PlacedOrder { order, details }))
}

// =============================================================================
// Unit Tests
// =============================================================================
