//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedRecordStore;
use crate::config::ServerConfig;

/// Shared application state.
///
/// Holds only the record store and read-only configuration. Scheduling
/// state is created per request and never shared.
#[derive(Clone)]
pub struct AppState {
    /// Cached record store
    pub store: Arc<CachedRecordStore>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: CachedRecordStore, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}
