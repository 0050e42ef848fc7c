use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use minicrm_api::config::ServerConfig;
use minicrm_api::router::build_app_router;
use minicrm_api::state::AppState;

const DEFAULT_LOG_FILTER: &str = "minicrm_api=debug,minicrm_db=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = minicrm_db::create_pool(&database_url)
        .await
        .context("failed to connect to database")?;
    minicrm_db::health_check(&pool)
        .await
        .context("database is not answering")?;
    minicrm_db::run_migrations(&pool)
        .await
        .context("failed to apply migrations")?;
    tracing::info!("Database ready, migrations applied");

    tracing::info!(
        assistant_url = %config.assistant.base_url,
        token_ttl_mins = config.jwt.expiry_mins,
        "Configuration loaded"
    );
    let state = AppState::new(pool, config).context("failed to build application state")?;
    let app = build_app_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Mini CRM API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Ctrl-C received, shutting down"),
        () = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
