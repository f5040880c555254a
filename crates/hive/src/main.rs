//! Hive server binary.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use hive_protocol::openai::{OpenAiBackend, OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use hive_server::{build_router, AppState};
use hive_store::{new_file, run_migrations, ConnectionConfig, ProjectStore};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Hive app-generation server.
#[derive(Debug, Parser)]
#[command(name = "hive", version, about)]
struct Args {
    /// Listen port.
    #[arg(long, default_value_t = 8080, env = "HIVE_PORT")]
    port: u16,

    /// SQLite database path.
    #[arg(long, default_value = "hive.db", env = "HIVE_DB_PATH")]
    db_path: PathBuf,

    /// Generative backend endpoint root.
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "HIVE_BACKEND_URL")]
    backend_url: String,

    /// Generative backend model id.
    #[arg(long, default_value = DEFAULT_MODEL, env = "HIVE_MODEL")]
    model: String,

    /// Generative backend API key.
    #[arg(long, env = "HIVE_API_KEY", hide_env_values = true)]
    api_key: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hive_core::logging::init_logging(
        "hive=info,hive_server=info,hive_protocol=info,hive_store=info",
    );
    let args = Args::parse();

    let metrics = hive_server::metrics::install_recorder()
        .map_err(|err| anyhow::anyhow!("failed to install metrics recorder: {err}"))?;

    let pool = new_file(&args.db_path, &ConnectionConfig::default())
        .with_context(|| format!("opening database at {}", args.db_path.display()))?;
    {
        let conn = pool.get().context("checking out migration connection")?;
        let applied = run_migrations(&conn).context("running migrations")?;
        if applied > 0 {
            info!(applied, "database migrated");
        }
    }
    let store = Arc::new(ProjectStore::new(pool));

    let backend = Arc::new(OpenAiBackend::new(OpenAiConfig {
        base_url: args.backend_url,
        model: args.model,
        api_key: args.api_key,
    }));

    let app = build_router(AppState::new(store, backend), Some(metrics));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "hive server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
