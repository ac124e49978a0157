use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use coursebook::metrics::{init_metrics, metrics_app};
use coursebook::{AppState, init_router, logging};
use coursebook_config::{CorsConfig, DatabaseConfig, JwtConfig, PasswordConfig, ServerConfig};
use coursebook_db::{MemoryStore, PgStore, init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    logging::init_tracing().context("Failed to create log directory")?;

    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();
    let jwt_config = JwtConfig::from_env();
    let password_config = PasswordConfig::from_env();
    let cors_config = CorsConfig::from_env();

    if jwt_config.uses_default_secret() {
        warn!("JWT_SECRET is not set; using the development secret");
    }

    let state = match database_config.url.as_deref() {
        Some(url) => {
            let pool = init_db_pool(url, database_config.max_connections)
                .await
                .context("Failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            info!("Connected to PostgreSQL and applied migrations");

            let store = Arc::new(PgStore::new(pool));
            AppState::new(
                store.clone(),
                store,
                &jwt_config,
                password_config,
                cors_config,
            )
        }
        None => {
            warn!("DATABASE_URL is not set; data is kept in memory and lost on exit");
            AppState::in_memory(&jwt_config, password_config, cors_config)
        }
    };

    match init_metrics() {
        Ok(Some(handle)) => {
            let metrics_addr = server_config.metrics_addr();
            let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
                .await
                .with_context(|| format!("Failed to bind metrics listener on {}", metrics_addr))?;
            info!("📈 Metrics available at http://{}/metrics", metrics_addr);
            tokio::spawn(async move {
                if let Err(e) = axum::serve(metrics_listener, metrics_app(handle)).await {
                    error!(error = ?e, "Metrics server stopped");
                }
            });
        }
        Ok(None) => info!("Observability disabled; metrics server not started"),
        Err(e) => warn!(error = ?e, "Failed to install metrics recorder"),
    }

    let app = init_router(state);

    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🚀 Server running on http://{}", addr);
    info!("📚 Swagger UI available at http://{}/swagger-ui", addr);
    info!("📖 Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = ?e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = ?e, "Failed to install SIGTERM handler");
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
