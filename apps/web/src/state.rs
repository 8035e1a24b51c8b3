//! Shared application state.

use crate::config::WebConfig;
use crate::session::SessionStore;
use shopfront_db::Database;

/// State shared across all HTTP workers via `web::Data`.
pub struct AppState {
    /// Database handle (cheap to clone, pooled underneath).
    pub db: Database,

    /// Server-side session registry.
    pub sessions: SessionStore,

    /// Loaded configuration.
    pub config: WebConfig,
}

impl AppState {
    pub fn new(db: Database, config: WebConfig) -> Self {
        AppState {
            db,
            sessions: SessionStore::new(),
            config,
        }
    }
}
