use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use edubook::logging::init_tracing;
use edubook::metrics::{init_metrics, metrics_app};
use edubook::router::init_router;
use edubook::state::AppState;
use edubook_config::{CorsConfig, DatabaseConfig, JwtConfig, LoggingConfig, ServerConfig};
use edubook_db::{PgStore, init_db_pool, run_migrations};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let _log_guard = match init_tracing(&LoggingConfig::from_env()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run().await {
        error!(error = %format!("{:#}", e), "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let jwt_config = JwtConfig::from_env().context("Invalid JWT configuration")?;
    let server_config = ServerConfig::from_env().context("Invalid server configuration")?;
    let database_config = DatabaseConfig::from_env().context("Invalid database configuration")?;
    let metrics_handle = init_metrics().context("Failed to install metrics recorder")?;

    let pool = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let state = AppState::new(
        Arc::new(PgStore::new(pool)),
        jwt_config,
        CorsConfig::from_env(),
    );

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let address = server_config.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "🚀 Server running");
    info!("📖 Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received");
}
