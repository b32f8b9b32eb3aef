//! `UniKhoj` server entry point.
//!
//! Opens the lead store, then starts the Axum HTTP server with graceful
//! shutdown on Ctrl-C or `SIGTERM`.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use unikhoj_storage::{LeadStore, MemoryStore};

use unikhoj_server::config::{ServerConfig, StorageBackendType};
use unikhoj_server::routes;
use unikhoj_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "UniKhoj starting");

    let store = open_store(&config.storage_backend).await?;
    let app = routes::build_router(AppState::new(store), &config);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "UniKhoj server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("UniKhoj server stopped");
    Ok(())
}

/// Open the configured lead store.
async fn open_store(backend: &StorageBackendType) -> anyhow::Result<Arc<dyn LeadStore>> {
    let store: Arc<dyn LeadStore> = match backend {
        StorageBackendType::Memory => {
            info!("using in-memory storage (leads will not persist)");
            Arc::new(MemoryStore::new())
        }
        #[cfg(feature = "postgres-backend")]
        StorageBackendType::Postgres { url } => {
            info!(url = %"[redacted]", "using PostgreSQL storage");
            Arc::new(
                unikhoj_storage::PostgresStore::connect(url)
                    .await
                    .context("failed to connect to PostgreSQL storage")?,
            )
        }
        #[cfg(not(feature = "postgres-backend"))]
        StorageBackendType::Postgres { .. } => {
            anyhow::bail!(
                "PostgreSQL backend requested but feature 'postgres-backend' is not enabled"
            );
        }
    };
    Ok(store)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
