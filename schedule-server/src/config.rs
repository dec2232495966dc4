//! Server configuration.
//!
//! Read from environment variables at startup. Every setting has a default
//! so the server runs against a local record store with no configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::domain::Headway;
use crate::store::DEFAULT_BASE_URL;

/// Default port the API listens on.
const DEFAULT_PORT: u16 = 8000;

/// Error for an environment variable that is set but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
}

/// Configuration for the scheduling server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub listen: SocketAddr,
    /// Base URL of the remote record store
    pub store_url: String,
    /// If set, serve records from JSON files in this directory instead
    pub store_dir: Option<PathBuf>,
    /// Headway used when a request leaves it unset or zero
    pub default_headway: Headway,
    /// Cache settings for record reads
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            store_url: DEFAULT_BASE_URL.to_string(),
            store_dir: None,
            default_headway: Headway::DEFAULT,
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value if set.
    ///
    /// Recognised variables: `RECORD_STORE_URL` (or `POCKETBASE_URL`),
    /// `RECORD_STORE_DIR`, `SCHEDULER_HOST` (or `FASTAPI_HOST`),
    /// `SCHEDULER_PORT` (or `FASTAPI_PORT`), `DEFAULT_HEADWAY`,
    /// `RECORD_CACHE_TTL_SECS`. When both names of a pair are set the first
    /// one wins.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some((_, url)) = first_set(&lookup, &["RECORD_STORE_URL", "POCKETBASE_URL"]) {
            config.store_url = url;
        }
        if let Some(dir) = lookup("RECORD_STORE_DIR") {
            config.store_dir = Some(PathBuf::from(dir));
        }
        if let Some((var, host)) = first_set(&lookup, &["SCHEDULER_HOST", "FASTAPI_HOST"]) {
            let ip = host.parse().map_err(|_| ConfigError {
                var,
                value: host.clone(),
            })?;
            config.listen.set_ip(ip);
        }
        if let Some((var, port)) = first_set(&lookup, &["SCHEDULER_PORT", "FASTAPI_PORT"]) {
            let port = port.parse().map_err(|_| ConfigError {
                var,
                value: port.clone(),
            })?;
            config.listen.set_port(port);
        }
        if let Some(raw) = lookup("DEFAULT_HEADWAY") {
            let headway = raw
                .parse::<i64>()
                .ok()
                .filter(|m| *m > 0)
                .and_then(|m| Headway::new(m).ok())
                .ok_or_else(|| ConfigError {
                    var: "DEFAULT_HEADWAY",
                    value: raw.clone(),
                })?;
            config.default_headway = headway;
        }
        if let Some(raw) = lookup("RECORD_CACHE_TTL_SECS") {
            let secs: u64 = raw.parse().map_err(|_| ConfigError {
                var: "RECORD_CACHE_TTL_SECS",
                value: raw.clone(),
            })?;
            config.cache.ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the headway used when a request leaves it unset.
    pub fn with_default_headway(mut self, headway: Headway) -> Self {
        self.default_headway = headway;
        self
    }

    /// Serve records from JSON files in `dir`.
    pub fn with_store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store_dir = Some(dir.into());
        self
    }
}

/// The first of `vars` that is set, with its name.
fn first_set(
    lookup: &impl Fn(&str) -> Option<String>,
    vars: &[&'static str],
) -> Option<(&'static str, String)> {
    vars.iter().find_map(|&var| lookup(var).map(|value| (var, value)))
}
