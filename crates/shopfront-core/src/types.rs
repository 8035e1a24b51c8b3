//! # Domain Types
//!
//! Core domain types used throughout shopfront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                             │
//! │                                                                 │
//! │  ┌─────────────────┐   ┌─────────────────┐  ┌────────────────┐  │
//! │  │     Product     │   │      Order      │  │  OrderDetail   │  │
//! │  │  ─────────────  │   │  ─────────────  │  │  ────────────  │  │
//! │  │  id (UUID)      │   │  id (UUID)      │  │  id (UUID)     │  │
//! │  │  name           │   │  user_id        │  │  order_id (FK) │  │
//! │  │  price_cents    │◄──┤  order_date     │◄─┤  product_id    │  │
//! │  │  image          │   │  total_cents    │  │  quantity      │  │
//! │  └─────────────────┘   └─────────────────┘  │  price snapshot│  │
//! │                                             └────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An `Order` owns its `OrderDetail` rows; each detail fixes one
//! product and quantity, with the unit price frozen at checkout time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the catalog.
    pub name: String,

    /// Optional longer description.
    pub description: Option<String>,

    /// Optional image filename (serving the file is out of scope here).
    pub image: Option<String>,

    /// Price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A durable record of a completed checkout.
///
/// The total is derived: it always equals the sum over the order's
/// details of (unit price at checkout × quantity).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,

    /// The user this order belongs to.
    pub user_id: String,

    /// When the checkout committed (UTC).
    pub order_date: DateTime<Utc>,

    /// Order total in cents, Σ(unit_price_cents × quantity).
    pub total_cents: i64,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Detail
// =============================================================================

/// One line item of an order.
///
/// Uses the snapshot pattern: the unit price is copied from the
/// product at checkout time, so the order stays auditable even if the
/// catalog price changes later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderDetail {
    pub id: String,

    /// The owning order. Required, never null once persisted.
    pub order_id: String,

    /// The purchased product. Required, never null once persisted.
    pub product_id: String,

    /// Quantity purchased. Positive.
    pub quantity: i64,

    /// Unit price in cents at checkout time (frozen).
    pub unit_price_cents: i64,
}

impl OrderDetail {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_price_accessor() {
        let product = Product {
            id: "p-1".to_string(),
            name: "Widget".to_string(),
            description: None,
            image: None,
            price_cents: 1099,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(product.price(), Money::from_cents(1099));
    }

    #[test]
    fn test_detail_line_total() {
        let detail = OrderDetail {
            id: "d-1".to_string(),
            order_id: "o-1".to_string(),
            product_id: "p-1".to_string(),
            quantity: 3,
            unit_price_cents: 299,
        };
        assert_eq!(detail.line_total().cents(), 897);
    }
}
