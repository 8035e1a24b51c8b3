//! Cart and checkout handlers.
//!
//! The cart lives in the session; these handlers mutate it and, at
//! checkout, hand a snapshot to the transactional
//! [`shopfront_db::checkout`] layer. The cart is cleared only after
//! the transaction commits.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::session::ClientSession;
use crate::state::AppState;
use shopfront_db::{place_order, CheckoutOutcome, PlacedOrder};

const EMPTY_CART_MESSAGE: &str = "Nothing in cart to checkout!";

#[derive(Debug, Deserialize)]
pub struct AddCartQuery {
    /// Desired quantity; defaults to 1 when absent. Non-positive
    /// values are accepted here and rejected at checkout.
    pub quantity: Option<i64>,
}

/// `GET /addCart/{product_id}?quantity=N`
///
/// Sets the quantity for a product in the session cart (overwriting
/// any prior value) and returns the updated cart. Unknown products
/// are a 404; the cart never holds ids the catalog has not seen.
pub async fn add_to_cart(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<AddCartQuery>,
    client: ClientSession,
) -> Result<HttpResponse, ApiError> {
    let product_id = path.into_inner();
    let quantity = query.quantity.unwrap_or(1);

    let product = state
        .db
        .products()
        .get_by_id(&product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &product_id))?;

    let cart = client.session.with_cart_mut(|cart| {
        cart.set_item(product.id.clone(), quantity);
        cart.clone()
    });

    info!(
        session_id = %client.session.id,
        product_id = %product.id,
        quantity = %quantity,
        "Cart updated"
    );

    Ok(client.respond(HttpResponse::Ok().json(cart)))
}

/// `GET /reviewCart`
///
/// Returns the cart as a flat `{product_id: quantity}` object; `{}`
/// for a fresh session.
pub async fn review_cart(client: ClientSession) -> Result<HttpResponse, ApiError> {
    let cart = client.session.cart_snapshot();
    Ok(client.respond(HttpResponse::Ok().json(cart)))
}

/// JSON confirmation returned by a successful checkout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfirmation {
    pub order_id: String,
    /// RFC 3339 order timestamp (UTC).
    pub order_date: String,
    pub total_cents: i64,
    pub lines: Vec<CheckoutLine>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl From<PlacedOrder> for CheckoutConfirmation {
    fn from(placed: PlacedOrder) -> Self {
        CheckoutConfirmation {
            order_id: placed.order.id,
            order_date: placed.order.order_date.to_rfc3339(),
            total_cents: placed.order.total_cents,
            lines: placed
                .details
                .into_iter()
                .map(|d| CheckoutLine {
                    product_id: d.product_id,
                    quantity: d.quantity,
                    unit_price_cents: d.unit_price_cents,
                })
                .collect(),
        }
    }
}

/// `GET /checkoutCart`
///
/// Converts the session cart into a persisted order.
///
/// Preconditions and outcomes:
/// - no logged-in user → 401 before any transaction is opened;
/// - empty cart → 200 with a plain-text notice, zero writes;
/// - success → order committed, cart cleared, JSON confirmation;
/// - failure → transaction rolled back, cart untouched, error JSON.
pub async fn checkout_cart(
    state: web::Data<AppState>,
    client: ClientSession,
) -> Result<HttpResponse, ApiError> {
    let Some(user_id) = client.session.user() else {
        return Err(ApiError::unauthorized("Login required to checkout"));
    };

    // One checkout at a time per session: a double-submitted cart
    // must not become two orders.
    let _gate = client.session.checkout_gate.lock().await;

    let cart = client.session.cart_snapshot();
    if cart.is_empty() {
        return Ok(client.respond(
            HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(EMPTY_CART_MESSAGE),
        ));
    }

    match place_order(state.db.pool(), &user_id, &cart).await {
        Ok(CheckoutOutcome::Placed(placed)) => {
            client.session.clear_cart();
            info!(
                session_id = %client.session.id,
                order_id = %placed.order.id,
                "Checkout complete, cart cleared"
            );
            Ok(client.respond(HttpResponse::Ok().json(CheckoutConfirmation::from(placed))))
        }
        Ok(CheckoutOutcome::EmptyCart) => Ok(client.respond(
            HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(EMPTY_CART_MESSAGE),
        )),
        Err(err) => {
            warn!(
                session_id = %client.session.id,
                error = %err,
                "Checkout failed, cart left intact"
            );
            Err(err.into())
        }
    }
}
