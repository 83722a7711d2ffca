//! Cached query service over a resource catalog
//!
//! ## Observability
//!
//! - `mathstar.query.filtered` - Filter queries, with `cache_hit`
//! - `mathstar.query.recommendations` - Level recommendations, with `cache_hit`

use indexmap::IndexMap;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument};

use super::cache::{BoundedCache, EvictionPolicy};
use super::filter::ResourceFilter;
use crate::catalog::{sort_by_rating_desc, Level, Resource, ResourceCatalog, ResourceStats};
use crate::config::MathStarConfig;

/// Shared, immutable query result
pub type Resources = Arc<Vec<Resource>>;

/// Snapshot of cache state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub filtered_entries: usize,
    pub recommendation_entries: usize,
    pub capacity: usize,
    pub policy: EvictionPolicy,
    pub hits: u64,
    pub misses: u64,
    pub all_resources_cached: bool,
    pub stats_cached: bool,
}

/// Query service that memoizes aggregation and caches filter results
///
/// Each cache sits behind its own mutex and a missing entry is computed while
/// that mutex is held, so one key is never computed twice concurrently and no
/// reader sees a half-built entry.
#[derive(Debug)]
pub struct CatalogService {
    catalog: Arc<ResourceCatalog>,
    rating_floor: f64,
    all: Mutex<Option<Resources>>,
    stats: Mutex<Option<Arc<ResourceStats>>>,
    filtered: Mutex<BoundedCache<String, Resources>>,
    recommendations: Mutex<BoundedCache<String, Resources>>,
}

impl CatalogService {
    /// Build a service with settings from `config`
    pub fn new(catalog: Arc<ResourceCatalog>, config: &MathStarConfig) -> Self {
        let capacity = config.cache.capacity;
        let policy = config.cache.policy;
        Self {
            catalog,
            rating_floor: config.recommendations.rating_floor,
            all: Mutex::new(None),
            stats: Mutex::new(None),
            filtered: Mutex::new(BoundedCache::new(capacity, policy)),
            recommendations: Mutex::new(BoundedCache::new(capacity, policy)),
        }
    }

    /// Build a service with default settings
    pub fn with_defaults(catalog: Arc<ResourceCatalog>) -> Self {
        Self::new(catalog, &MathStarConfig::default())
    }

    /// The underlying catalog
    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Every resource, one entry per id
    ///
    /// A later table's record replaces an earlier one with the same id but
    /// keeps the earlier position.
    pub fn all_resources(&self) -> Resources {
        let mut memo = lock(&self.all);
        if let Some(all) = memo.as_ref() {
            return Arc::clone(all);
        }
        let all = Arc::new(dedup_by_id(self.catalog.iter()));
        debug!(
            raw = self.catalog.len(),
            unique = all.len(),
            "Memoized deduplicated resources"
        );
        *memo = Some(Arc::clone(&all));
        all
    }

    /// Statistics over the deduplicated resources
    ///
    /// The memo lock is held while the resources are read, so a concurrent
    /// `clear_cache` cannot be followed by a store of stale stats.
    pub fn stats(&self) -> Arc<ResourceStats> {
        let mut memo = lock(&self.stats);
        if let Some(stats) = memo.as_ref() {
            return Arc::clone(stats);
        }
        let all = self.all_resources();
        let stats = Arc::new(ResourceStats::compute(all.as_slice()));
        *memo = Some(Arc::clone(&stats));
        stats
    }

    /// Filtered resources, best rated first
    #[instrument(name = "mathstar.query.filtered", skip(self), fields(cache_hit = tracing::field::Empty, result_count = tracing::field::Empty))]
    pub fn filtered(&self, filter: &ResourceFilter) -> Resources {
        let key = filter.cache_key();
        let all = self.all_resources();
        let mut cache = lock(&self.filtered);

        if let Some(hit) = cache.get(&key) {
            tracing::Span::current().record("cache_hit", true);
            tracing::Span::current().record("result_count", hit.len());
            return hit;
        }

        let results = Arc::new(self.apply_filter(&all, filter));
        cache.insert(key, Arc::clone(&results));
        tracing::Span::current().record("cache_hit", false);
        tracing::Span::current().record("result_count", results.len());
        info!(count = results.len(), "Filter query computed");
        results
    }

    /// Resources matching the level's terms or rated at or above the floor
    #[instrument(name = "mathstar.query.recommendations", skip(self), fields(cache_hit = tracing::field::Empty, result_count = tracing::field::Empty))]
    pub fn recommendations(&self, level: Level, limit: usize) -> Resources {
        let key = format!("{}_{}", level, limit);
        let all = self.all_resources();
        let mut cache = lock(&self.recommendations);

        if let Some(hit) = cache.get(&key) {
            tracing::Span::current().record("cache_hit", true);
            tracing::Span::current().record("result_count", hit.len());
            return hit;
        }

        let table = self.catalog.recommendation_table();
        let mut results: Vec<Resource> = all
            .iter()
            .filter(|r| table.matches(level, r) || r.rating >= self.rating_floor)
            .cloned()
            .collect();
        sort_by_rating_desc(&mut results);
        results.truncate(limit);

        let results = Arc::new(results);
        cache.insert(key, Arc::clone(&results));
        tracing::Span::current().record("cache_hit", false);
        tracing::Span::current().record("result_count", results.len());
        results
    }

    /// Drop cached results and both memoized aggregates
    pub fn clear_cache(&self) {
        lock(&self.filtered).clear();
        lock(&self.recommendations).clear();
        *lock(&self.all) = None;
        *lock(&self.stats) = None;
        info!("Cleared query caches");
    }

    /// Current cache sizes and counters
    pub fn cache_stats(&self) -> CacheStats {
        let all_resources_cached = lock(&self.all).is_some();
        let stats_cached = lock(&self.stats).is_some();
        let filtered = lock(&self.filtered);
        let recommendations = lock(&self.recommendations);
        CacheStats {
            filtered_entries: filtered.len(),
            recommendation_entries: recommendations.len(),
            capacity: filtered.capacity(),
            policy: filtered.policy(),
            hits: filtered.hits() + recommendations.hits(),
            misses: filtered.misses() + recommendations.misses(),
            all_resources_cached,
            stats_cached,
        }
    }

    fn apply_filter(&self, all: &[Resource], filter: &ResourceFilter) -> Vec<Resource> {
        let mut results: Vec<Resource> = match &filter.section {
            Some(section) => match self.catalog.section(section) {
                Some(table) => dedup_by_id(table.resources.iter()),
                None => Vec::new(),
            },
            None => all.to_vec(),
        };
        results.retain(|r| filter.matches(r));
        sort_by_rating_desc(&mut results);
        results
    }
}

/// Last write wins for the value, first write wins for the position
pub(crate) fn dedup_by_id<'a>(resources: impl Iterator<Item = &'a Resource>) -> Vec<Resource> {
    let mut by_id: IndexMap<u32, Resource> = IndexMap::new();
    for resource in resources {
        by_id.insert(resource.id, resource.clone());
    }
    by_id.into_values().collect()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
