use std::future::IntoFuture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use catalog_blob::FsAssetStore;
use catalog_core::demo_inventory;
use catalog_server::api::{AppState, AssetMount};
use catalog_server::config::CatalogConfig;
use catalog_server::service::CatalogService;
use catalog_store::{MemoryRecordStore, RecordStore};

/// Product catalog HTTP server.
#[derive(Parser, Debug)]
#[command(name = "catalog-server", about = "HTTP server for the product catalog")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "catalog.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let config_exists = Path::new(&cli.config).exists();
    let config = if config_exists {
        CatalogConfig::from_toml(&std::fs::read_to_string(&cli.config)?)?
    } else {
        CatalogConfig::from_toml("")?
    };

    let telemetry_guard = catalog_server::telemetry::init(&config.telemetry);

    if !config_exists {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    // Assets.
    let assets_root = PathBuf::from(&config.assets.root);
    tokio::fs::create_dir_all(&assets_root).await?;
    let assets = FsAssetStore::new(
        assets_root.clone(),
        &config.assets.public_prefix,
        &config.assets.default_extension,
    );
    info!(
        root = %assets_root.display(),
        prefix = %assets.public_prefix(),
        "asset store ready"
    );

    // Records. In-memory only; the inventory resets on restart.
    let records = if config.catalog.seed_demo_products {
        MemoryRecordStore::with_records(demo_inventory())
    } else {
        MemoryRecordStore::new()
    };
    info!(products = records.len().await, "record store initialized");

    let mount = config.assets.serve_static.then(|| AssetMount {
        prefix: assets.public_prefix().to_owned(),
        root: assets_root.clone(),
    });

    let state = AppState {
        catalog: Arc::new(CatalogService::new(Arc::new(records), Arc::new(assets))),
        assets: mount,
        max_upload_bytes: config.assets.max_upload_bytes,
    };
    let app = catalog_server::api::router(state);

    // Resolve the bind address (CLI overrides take precedence).
    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "catalog-server listening");

    let shutdown = CancellationToken::new();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .into_future();
    let mut server = std::pin::pin!(server);

    tokio::select! {
        result = &mut server => result?,
        () = shutdown_signal() => {
            shutdown.cancel();
            let timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
            match tokio::time::timeout(timeout, server).await {
                Ok(result) => result?,
                Err(_) => warn!(
                    timeout_secs = config.server.shutdown_timeout_seconds,
                    "shutdown timeout exceeded, dropping in-flight requests"
                ),
            }
        }
    }

    telemetry_guard.shutdown();

    info!("catalog-server shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
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
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
