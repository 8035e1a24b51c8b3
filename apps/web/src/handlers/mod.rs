//! # HTTP Handlers
//!
//! Route configuration and the handlers behind it.
//!
//! ## Route Map
//! ```text
//! GET    /health               liveness probe
//! GET    /addCart/{id}         put a product in the session cart
//! GET    /reviewCart           current cart contents
//! GET    /checkoutCart         convert cart to order (login required)
//! GET    /products/{page}      paginated catalog
//! GET    /product/{id}         single product
//! POST   /product              create product
//! PUT    /product/{id}         update product
//! DELETE /product/{id}         delete product
//! POST   /login                mark session authenticated
//! POST   /logout               drop authentication
//! ```

pub mod auth;
pub mod cart;
pub mod product;

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::state::AppState;

/// Liveness probe: verifies the database answers a query.
async fn health(state: web::Data<AppState>) -> HttpResponse {
    if state.db.health_check().await {
        HttpResponse::Ok().json(json!({ "status": "ok" }))
    } else {
        HttpResponse::ServiceUnavailable().json(json!({ "status": "degraded" }))
    }
}

/// Registers all application routes. Shared between `main` and the
/// integration tests so both serve the exact same surface.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        // Cart & checkout
        .route("/addCart/{product_id}", web::get().to(cart::add_to_cart))
        .route("/reviewCart", web::get().to(cart::review_cart))
        .route("/checkoutCart", web::get().to(cart::checkout_cart))
        // Catalog
        .route("/products/{page}", web::get().to(product::list_products))
        .route("/product", web::post().to(product::create_product))
        .route("/product/{id}", web::get().to(product::get_product))
        .route("/product/{id}", web::put().to(product::update_product))
        .route("/product/{id}", web::delete().to(product::delete_product))
        // Auth
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::post().to(auth::logout));
}
