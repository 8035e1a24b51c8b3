//! # shopfront HTTP server
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      shopfront-web                              │
//! │                                                                 │
//! │  Browser ───► HTTP (8080) ───► Handlers ───► SQLite (WAL)       │
//! │                  │                                              │
//! │                  ▼                                              │
//! │            SessionStore                                         │
//! │        (carts, login state)                                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use shopfront_db::{Database, DbConfig};
use shopfront_web::session::{SESSION_MAX_IDLE, SESSION_SWEEP_INTERVAL};
use shopfront_web::{configure_app_routes, AppState, WebConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting shopfront server...");

    let config = WebConfig::load()?;
    info!(
        bind = %config.bind_address,
        port = config.port,
        db = %config.database_path.display(),
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(config.database_path.clone())).await?;
    info!("Database ready");

    let state = web::Data::new(AppState::new(db, config.clone()));

    // Background sweep: abandoned sessions age out of memory
    tokio::spawn({
        let state = state.clone();
        async move {
            let mut tick = tokio::time::interval(SESSION_SWEEP_INTERVAL);
            loop {
                tick.tick().await;
                state.sessions.evict_idle(SESSION_MAX_IDLE);
            }
        }
    });

    let server = HttpServer::new({
        let state = state.clone();
        move || {
            App::new()
                .app_data(state.clone())
                .configure(configure_app_routes)
        }
    })
    .bind((config.bind_address.as_str(), config.port))?;

    info!("Listening on {}:{}", config.bind_address, config.port);

    // actix handles SIGINT/SIGTERM and drains workers before returning
    server.run().await?;

    state.db.close().await;
    info!("Server shutdown complete");
    Ok(())
}
