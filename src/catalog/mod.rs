//! Mathematics resource catalog
//!
//! Provides:
//! - Named source tables of websites, courses and applications
//! - Category, rating and substring queries over their union
//! - Aggregate statistics with per-category averages
//! - Level recommendations driven by a configurable term table

mod core;
mod registry;
mod stats;
mod types;

#[cfg(test)]
mod tests_catalog;

pub use core::{ResourceCatalog, DEFAULT_RECOMMENDED_LIMIT, DEFAULT_TOP_RATED_THRESHOLD};
pub(crate) use core::sort_by_rating_desc;
pub use stats::{mean, round2, CategoryStat, ResourceStats};
pub use types::{Level, Resource, ResourceTable};
