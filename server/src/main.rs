use anyhow::Result;
use clap::Parser;
use server::{build_app, Backend};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Index directory path
    #[arg(long, env = "REVINDEX_INDEX", default_value = "./index")]
    index: PathBuf,
    /// Serve from this store instead of the index directory
    #[arg(long, env = "REVINDEX_STORE")]
    store: Option<PathBuf>,
    /// IP address to bind
    #[arg(long, env = "REVINDEX_HOST", default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, env = "REVINDEX_PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let backend = match &args.store {
        Some(path) => Backend::open_store(path)?,
        None => Backend::load_index(&args.index)?,
    };
    let app = build_app(backend);

    let addr = SocketAddr::new(args.host.parse()?, args.port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
