//! Login and logout handlers.
//!
//! The storefront only needs to know whether a session belongs to a
//! logged-in user before allowing checkout, so authentication is a
//! username claim on the session. Password verification and identity
//! providers are out of scope.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::session::ClientSession;

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
}

/// `POST /login {"username": "..."}`
pub async fn login(
    client: ClientSession,
    payload: web::Json<LoginPayload>,
) -> Result<HttpResponse, ApiError> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(ApiError::validation("Username must not be empty"));
    }

    client.session.set_user(username);
    info!(session_id = %client.session.id, user = %username, "User logged in");

    Ok(client.respond(HttpResponse::Ok().json(json!({ "user": username }))))
}

/// `POST /logout`
///
/// Drops the authentication claim; the cart stays with the session.
pub async fn logout(client: ClientSession) -> Result<HttpResponse, ApiError> {
    client.session.clear_user();
    info!(session_id = %client.session.id, "User logged out");

    Ok(client.respond(HttpResponse::Ok().json(json!({ "user": null }))))
}
