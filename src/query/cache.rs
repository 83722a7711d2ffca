//! Bounded result cache
//!
//! Entries live in an `IndexMap`, which keeps insertion order. When an insert
//! pushes the map past its capacity, the entry at index 0 is evicted.
//!
//! - `Fifo`: index 0 is the earliest inserted key, regardless of how often it
//!   was read since.
//! - `Lru`: every hit moves the key to the back, so index 0 is the least
//!   recently used key.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Default number of entries kept per cache
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Which entry is evicted when the cache overflows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Earliest inserted entry goes first
    #[default]
    Fifo,
    /// Least recently read or written entry goes first
    Lru,
}

impl std::fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fifo => write!(f, "fifo"),
            Self::Lru => write!(f, "lru"),
        }
    }
}

/// Capacity-bounded map with FIFO or LRU eviction
#[derive(Debug, Clone)]
pub struct BoundedCache<K, V> {
    entries: IndexMap<K, V>,
    capacity: usize,
    policy: EvictionPolicy,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq, V: Clone> BoundedCache<K, V> {
    /// Create a cache holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize, policy: EvictionPolicy) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity: capacity.max(1),
            policy,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up `key`, counting a hit or a miss
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get_index_of(key) {
            Some(index) => {
                self.hits += 1;
                if self.policy == EvictionPolicy::Lru {
                    let last = self.entries.len() - 1;
                    self.entries.move_index(index, last);
                }
                self.entries.get(key).cloned()
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert or replace `key`, evicting from the front while over capacity
    pub fn insert(&mut self, key: K, value: V) {
        if self.policy == EvictionPolicy::Lru {
            self.entries.shift_remove(&key);
        }
        self.entries.insert(key, value);
        while self.entries.len() > self.capacity {
            self.entries.shift_remove_index(0);
        }
    }

    /// Return the cached value or compute, store and return it
    pub fn get_or_insert_with<F>(&mut self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.insert(key, value.clone());
        value
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Keys from next-to-evict to most recent
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Drop every entry; counters are kept
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
