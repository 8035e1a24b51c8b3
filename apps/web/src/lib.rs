//! # shopfront-web
//!
//! The HTTP surface of shopfront: session-based carts over an
//! actix-web server, backed by `shopfront-db`.
//!
//! Exposed as a library so the integration tests under `tests/` can
//! assemble the exact app the binary serves.

pub mod config;
pub mod error;
pub mod handlers;
pub mod session;
pub mod state;

pub use config::WebConfig;
pub use error::{ApiError, ErrorCode};
pub use handlers::configure_app_routes;
pub use session::{ClientSession, SessionStore, SESSION_COOKIE};
pub use state::AppState;
