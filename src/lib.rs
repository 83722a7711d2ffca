//! Math Star: a catalog of mathematics learning resources
//!
//! The crate is organised around a static resource catalog and a cached query
//! layer on top of it:
//!
//! - [`catalog`]: typed resource tables, filters and aggregate statistics
//! - [`query`]: deduplicated, memoized views with a bounded result cache
//! - [`recommend`]: per-level keyword tables used for recommendations
//! - [`search`] and [`window`]: generic fuzzy ranking and windowed listing
//! - [`symbols`], [`paths`] and [`prefs`]: glossary, learning paths and
//!   the persisted user preferences that track progress through them

pub mod catalog;
pub mod config;
pub mod error;
pub mod paths;
pub mod prefs;
pub mod query;
pub mod recommend;
pub mod search;
pub mod symbols;
pub mod window;

// Re-export key types for convenience
pub use catalog::{Level, Resource, ResourceCatalog, ResourceStats, ResourceTable};
pub use config::MathStarConfig;
pub use error::{CatalogError, PreferenceError};
pub use paths::{LearningPath, LearningPaths};
pub use prefs::{PreferenceStore, Theme};
pub use query::{CatalogService, EvictionPolicy, ResourceFilter};
pub use recommend::RecommendationTable;
pub use search::{fuzzy_search, FuzzySearcher, SearchField, SearchHit, Searchable};
pub use symbols::{Symbol, SymbolCategory, SymbolGlossary};
pub use window::{PositionedRow, WindowedList};
