//! Caching layer for record store reads.
//!
//! Every scheduling request needs the full `trains` and `delays`
//! collections. Caching them for a few seconds absorbs bursts of requests
//! without serving stale data for long. Uploads through this layer clear
//! the cache so the next request sees them.
//!
//! Each upload also bumps a generation counter. A read that started before
//! the bump does not insert what it fetched, since that may predate the
//! upload.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{DelayMap, Train};
use crate::store::{RecordStore, StoreError};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached collections. Zero disables caching.
    pub ttl: Duration,

    /// Maximum number of cached entries per collection.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5),
            max_capacity: 16,
        }
    }
}

/// Record store with cached collection reads.
pub struct CachedRecordStore {
    store: RecordStore,
    trains: Option<MokaCache<(), Arc<Vec<Train>>>>,
    delays: Option<MokaCache<(), Arc<DelayMap>>>,
    generation: AtomicU64,
}

impl CachedRecordStore {
    /// Create a new cached store.
    pub fn new(store: RecordStore, config: &CacheConfig) -> Self {
        let enabled = !config.ttl.is_zero();
        Self {
            store,
            trains: enabled.then(|| build_cache(config)),
            delays: enabled.then(|| build_cache(config)),
            generation: AtomicU64::new(0),
        }
    }

    /// All trains, from cache if fresh.
    pub async fn trains(&self) -> Result<Arc<Vec<Train>>, StoreError> {
        if let Some(cache) = &self.trains {
            if let Some(hit) = cache.get(&()).await {
                tracing::trace!("trains cache hit");
                return Ok(hit);
            }
        }

        let generation = self.generation();
        let trains = Arc::new(self.store.fetch_trains().await?);
        if let Some(cache) = &self.trains {
            self.insert_if_current(cache, generation, trains.clone()).await;
        }
        Ok(trains)
    }

    /// All delays, from cache if fresh.
    pub async fn delays(&self) -> Result<Arc<DelayMap>, StoreError> {
        if let Some(cache) = &self.delays {
            if let Some(hit) = cache.get(&()).await {
                tracing::trace!("delays cache hit");
                return Ok(hit);
            }
        }

        let generation = self.generation();
        let delays = Arc::new(self.store.fetch_delays().await?);
        if let Some(cache) = &self.delays {
            self.insert_if_current(cache, generation, delays.clone()).await;
        }
        Ok(delays)
    }

    /// Upload a record and drop cached collections.
    pub async fn upload(
        &self,
        collection: &str,
        data: &serde_json::Value,
    ) -> Result<serde_json::Value, StoreError> {
        let result = self.store.upload(collection, data).await;
        // Reads in flight may have fetched before the write landed
        self.invalidate_all();
        result
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Cache `value` unless an invalidation happened since `generation` was read.
    async fn insert_if_current<V: Clone + Send + Sync + 'static>(
        &self,
        cache: &MokaCache<(), V>,
        generation: u64,
        value: V,
    ) {
        if self.generation() == generation {
            cache.insert((), value).await;
        } else {
            tracing::trace!("discarding fetch that predates an upload");
        }
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(cache) = &self.trains {
            cache.invalidate_all();
        }
        if let Some(cache) = &self.delays {
            cache.invalidate_all();
        }
    }
}

fn build_cache<V: Clone + Send + Sync + 'static>(config: &CacheConfig) -> MokaCache<(), V> {
    MokaCache::builder()
        .time_to_live(config.ttl)
        .max_capacity(config.max_capacity)
        .build()
}
