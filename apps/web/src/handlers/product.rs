//! Product catalog handlers.
//!
//! Listing is public and paginated; create/update/delete take a JSON
//! payload validated by `shopfront_core::validation` before touching
//! the database.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use shopfront_core::validation::{validate_price_cents, validate_product_name};
use shopfront_core::CATALOG_PAGE_SIZE;

/// Create/update payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price_cents: i64,
}

impl ProductPayload {
    fn validate(&self) -> Result<(), ApiError> {
        validate_product_name(&self.name)?;
        validate_price_cents(self.price_cents)?;
        Ok(())
    }
}

/// `GET /products/{page}`
///
/// One catalog page (10 products) plus the total page count, as
/// `{"products": [...], "numOfPages": N}`. Page numbers are 1-based;
/// pages past the end return an empty list.
pub async fn list_products(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    let page = path.into_inner();

    let products = state
        .db
        .products()
        .list_page(page, CATALOG_PAGE_SIZE)
        .await?;
    let count = state.db.products().count().await?;

    let page_size = CATALOG_PAGE_SIZE as i64;
    let num_of_pages = (count + page_size - 1) / page_size;

    Ok(HttpResponse::Ok().json(json!({
        "products": products,
        "numOfPages": num_of_pages,
    })))
}

/// `GET /product/{id}`
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;

    Ok(HttpResponse::Ok().json(product))
}

/// `POST /product`
pub async fn create_product(
    state: web::Data<AppState>,
    payload: web::Json<ProductPayload>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    let product = state
        .db
        .products()
        .create(
            payload.name.trim(),
            payload.description.as_deref(),
            payload.image.as_deref(),
            payload.price_cents,
        )
        .await?;

    info!(product_id = %product.id, name = %product.name, "Product created");

    Ok(HttpResponse::Created().json(product))
}

/// `PUT /product/{id}`
pub async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ProductPayload>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;
    let id = path.into_inner();

    let product = state
        .db
        .products()
        .update(
            &id,
            payload.name.trim(),
            payload.description.as_deref(),
            payload.image.as_deref(),
            payload.price_cents,
        )
        .await?;

    info!(product_id = %product.id, "Product updated");

    Ok(HttpResponse::Ok().json(product))
}

/// `DELETE /product/{id}`
///
/// Deleting a product that order details still reference fails with
/// a 400: order history is immutable.
pub async fn delete_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    state.db.products().delete(&id).await?;

    info!(product_id = %id, "Product deleted");

    Ok(HttpResponse::NoContent().finish())
}
