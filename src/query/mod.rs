//! Cached query layer
//!
//! Provides:
//! - Deduplicated, memoized view of the catalog
//! - Filter queries cached by their serialized parameters
//! - Level recommendations cached by level and limit
//! - A bounded cache with FIFO (default) or LRU eviction

mod cache;
mod filter;
mod service;

#[cfg(test)]
mod tests_service;

pub use cache::{BoundedCache, EvictionPolicy, DEFAULT_CACHE_CAPACITY};
pub use filter::ResourceFilter;
pub use service::{CacheStats, CatalogService, Resources};
