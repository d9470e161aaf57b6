use std::fmt::Display;
use std::sync::Arc;

use students_api::config::ServerConfig;
use students_api::logging;
use students_api::router::build_app_router;
use students_api::server::{serve_until_shutdown, shutdown_signal};
use students_api::state::AppState;
use students_db::{MongoGateway, MongoStudentRepo};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config =
        ServerConfig::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {e}"));

    // --- Tracing ---
    if let Err(e) = logging::init_tracing(&config) {
        panic!("Failed to initialise logging: {e}");
    }
    tracing::info!(
        addr = %config.bind_addr(),
        database = %config.mongo_database,
        log_path = ?config.log_path,
        "Loaded server configuration"
    );

    // --- Database ---
    let gateway = match MongoGateway::connect(&config.mongo_uri, &config.mongo_database).await {
        Ok(gateway) => gateway,
        Err(e) => fatal("Failed to connect to MongoDB", e),
    };

    let repo = MongoStudentRepo::new(&gateway);
    if let Err(e) = repo.ensure_indexes().await {
        gateway.disconnect().await;
        fatal("Failed to create student indexes", e);
    }

    // --- Router ---
    let state = AppState::new(Arc::new(repo), config.clone());
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            gateway.disconnect().await;
            fatal("Failed to bind to address", e);
        }
    };
    tracing::info!(%addr, "Server listening");

    let served =
        serve_until_shutdown(listener, app, config.shutdown_timeout(), shutdown_signal()).await;

    // --- Post-shutdown cleanup ---
    gateway.disconnect().await;

    if let Err(e) = served {
        fatal("Server error", e);
    }
    tracing::info!("Graceful shutdown complete");
}

/// Log at the highest severity and exit with status 1.
fn fatal(context: &str, err: impl Display) -> ! {
    tracing::error!(error = %err, "{context}");
    std::process::exit(1);
}
