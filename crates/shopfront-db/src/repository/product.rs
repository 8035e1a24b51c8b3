//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - CRUD operations
//! - Paginated listing for the catalog index
//!
//! Pagination uses offset/limit: page N (1-based) with size S reads
//! `LIMIT S OFFSET S × (N − 1)`. The total page count is derived from
//! `count()` by the caller.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use shopfront_core::Product;

const PRODUCT_COLUMNS: &str = "id, name, description, image, price_cents, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let page = repo.list_page(1, 10).await?;
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Creates a new product and returns it with its generated id.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        image: Option<&str>,
        price_cents: i64,
    ) -> DbResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            image: image.map(str::to_string),
            price_cents,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, "Creating product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, image, price_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.image)
        .bind(product.price_cents)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists one catalog page, newest products first.
    ///
    /// ## Arguments
    /// * `page` - 1-based page number; pages past the end are empty
    /// * `page_size` - rows per page
    pub async fn list_page(&self, page: u32, page_size: u32) -> DbResult<Vec<Product>> {
        let page = page.max(1);
        let offset = (page as i64 - 1) * page_size as i64;

        debug!(page = %page, page_size = %page_size, "Listing products");

        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            ORDER BY created_at DESC, id
            LIMIT ?1 OFFSET ?2
            "#
        ))
        .bind(page_size as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Counts all products (for page-count math).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Updates a product's attributes.
    ///
    /// Returns the updated product, or `DbError::NotFound` if no row
    /// matched.
    pub async fn update(
        &self,
        id: &str,
        name: &str,
        description: Option<&str>,
        image: Option<&str>,
        price_cents: i64,
    ) -> DbResult<Product> {
        let now = Utc::now();

        debug!(id = %id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                image = ?4,
                price_cents = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(image)
        .bind(price_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product.
    ///
    /// Fails with a foreign key violation if order details still
    /// reference the product; completed orders keep their history.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo
            .create("Widget", Some("A fine widget"), None, 1099)
            .await
            .unwrap();

        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Widget");
        assert_eq!(fetched.description.as_deref(), Some("A fine widget"));
        assert_eq!(fetched.price_cents, 1099);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        let found = db.products().get_by_id("no-such-id").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_pagination() {
        let db = test_db().await;
        let repo = db.products();

        for i in 0..25 {
            repo.create(&format!("Product {i}"), None, None, 100 * i)
                .await
                .unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 25);

        let page1 = repo.list_page(1, 10).await.unwrap();
        let page2 = repo.list_page(2, 10).await.unwrap();
        let page3 = repo.list_page(3, 10).await.unwrap();
        let page4 = repo.list_page(4, 10).await.unwrap();

        assert_eq!(page1.len(), 10);
        assert_eq!(page2.len(), 10);
        assert_eq!(page3.len(), 5);
        assert!(page4.is_empty());

        // No overlap between pages
        assert!(page1.iter().all(|p| page2.iter().all(|q| q.id != p.id)));
    }

    #[tokio::test]
    async fn test_update() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.create("Widget", None, None, 1099).await.unwrap();
        let updated = repo
            .update(&created.id, "Widget v2", None, Some("widget.png"), 1299)
            .await
            .unwrap();

        assert_eq!(updated.name, "Widget v2");
        assert_eq!(updated.image.as_deref(), Some("widget.png"));
        assert_eq!(updated.price_cents, 1299);

        let err = repo
            .update("no-such-id", "x", None, None, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.create("Widget", None, None, 1099).await.unwrap();
        repo.delete(&created.id).await.unwrap();

        assert!(repo.get_by_id(&created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&created.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_negative_price_rejected_by_schema() {
        let db = test_db().await;

        // The CHECK constraint is the last line of defense behind
        // shopfront_core::validation::validate_price_cents
        let err = db
            .products()
            .create("Bad", None, None, -100)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }
}
