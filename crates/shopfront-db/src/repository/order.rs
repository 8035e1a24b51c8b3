//! # Order Repository
//!
//! Read access to persisted orders and their details.
//!
//! Orders are only ever *written* by the checkout transaction (see
//! [`crate::checkout`]); exposing insert methods here would invite
//! writes outside the transaction boundary.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use shopfront_core::{Order, OrderDetail};

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

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, user_id, order_date, total_cents FROM orders WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all details for an order, in insertion order.
    pub async fn get_details(&self, order_id: &str) -> DbResult<Vec<OrderDetail>> {
        let details = sqlx::query_as::<_, OrderDetail>(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price_cents
            FROM order_details
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    /// Lists a user's orders, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<Order>> {
        debug!(user_id = %user_id, "Listing orders for user");

        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, order_date, total_cents
            FROM orders
            WHERE user_id = ?1
            ORDER BY order_date DESC, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Counts all orders (diagnostics and tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts all order details (diagnostics and tests).
    pub async fn count_details(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_details")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
