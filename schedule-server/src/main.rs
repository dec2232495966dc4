use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use schedule_server::cache::CachedRecordStore;
use schedule_server::config::ServerConfig;
use schedule_server::store::{
    FileRecordStore, RecordStore, RecordStoreClient, RecordStoreConfig, StoreError,
};
use schedule_server::web::{AppState, create_router};

fn build_store(config: &ServerConfig) -> Result<RecordStore, StoreError> {
    match &config.store_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "using file record store");
            Ok(RecordStore::File(FileRecordStore::new(dir)?))
        }
        None => {
            info!(url = %config.store_url, "using remote record store");
            let client = RecordStoreClient::new(RecordStoreConfig::new(&config.store_url))?;
            Ok(RecordStore::Remote(client))
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let store = match build_store(&config) {
        Ok(store) => store,
        Err(e) => {
            error!("failed to set up record store: {e}");
            return ExitCode::FAILURE;
        }
    };
    let cached = CachedRecordStore::new(store, &config.cache);

    let addr = config.listen;
    let app = create_router(AppState::new(cached, config));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Train Scheduling API listening on http://{addr}");
    info!("  GET  /                - Status");
    info!("  GET  /health          - Health check");
    info!("  POST /schedule        - Compute a schedule");
    info!("  POST /records/upload  - Create a record in the store");
    info!("  POST /upload_to_pocketbase - Alias of /records/upload");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
