//! Sweet shop HTTP API.
//!
//! Wires the auth and sweet services onto an axum router backed by a single
//! Postgres connection pool.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};

use auth_service_lib::Authenticator;
use common::{Database, DatabaseConfig};
use sweet_service_lib::{SweetManager, SweetStore};
use user_service_lib::UserStore;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Migration commands available from the CLI.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Connect to the database, build the services and serve HTTP until a
/// shutdown signal arrives.
pub async fn run(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;

    let user_repo = Arc::new(UserStore::new(db.get_connection()));
    let sweet_repo = Arc::new(SweetStore::new(db.get_connection()));

    let auth_service = Arc::new(Authenticator::new(
        user_repo,
        config.jwt.secret(),
        config.jwt.expiration_hours,
    ));
    let sweet_service = Arc::new(SweetManager::new(sweet_repo));

    let state = AppState::new(auth_service, sweet_service, db.clone());
    let app = create_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", addr);
    info!("API docs at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;
    info!("Database connection closed");

    Ok(())
}

/// Run a migration command against the configured database.
pub async fn run_migrations(
    action: MigrateAction,
    config: &DatabaseConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(config).await?;

    match action {
        MigrateAction::Up => {
            info!("Running pending migrations...");
            db.run_migrations().await?;
            info!("Migrations completed successfully");
        }
        MigrateAction::Down => {
            info!("Rolling back last migration...");
            db.rollback_migration().await?;
            info!("Rollback completed successfully");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let status = if applied { "applied" } else { "pending" };
                println!("{}: {}", name, status);
            }
        }
        MigrateAction::Fresh => {
            warn!("Resetting database and running all migrations...");
            db.fresh_migrations().await?;
            info!("Fresh migrations completed successfully");
        }
    }

    db.close().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
