//! Aggregate statistics over a set of resources

use indexmap::IndexMap;
use std::borrow::Borrow;
use serde::{Deserialize, Serialize};

use super::types::Resource;

/// Per-category aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub name: String,
    pub count: usize,
    /// Mean rating, `None` when the bucket is empty
    pub avg_rating: Option<f64>,
}

/// Catalog-wide aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceStats {
    pub total_resources: usize,
    pub total_categories: usize,
    /// Mean rating rounded half-up to two decimals; `0.0` for an empty set
    pub average_rating: f64,
    /// Sorted by count, largest first
    pub category_stats: Vec<CategoryStat>,
}

impl ResourceStats {
    /// Compute statistics over `resources`
    pub fn compute<R: Borrow<Resource>>(resources: &[R]) -> Self {
        let mut buckets: IndexMap<&str, Vec<f64>> = IndexMap::new();
        for resource in resources {
            let resource = resource.borrow();
            buckets
                .entry(resource.category.as_str())
                .or_default()
                .push(resource.rating);
        }

        let mut category_stats: Vec<CategoryStat> = buckets
            .iter()
            .map(|(name, ratings)| CategoryStat {
                name: (*name).to_string(),
                count: ratings.len(),
                avg_rating: mean(ratings).map(round2),
            })
            .collect();
        // Stable: equal counts keep first-seen order
        category_stats.sort_by(|a, b| b.count.cmp(&a.count));

        let ratings: Vec<f64> = resources.iter().map(|r| r.borrow().rating).collect();

        Self {
            total_resources: resources.len(),
            total_categories: buckets.len(),
            average_rating: mean(&ratings).map(round2).unwrap_or(0.0),
            category_stats,
        }
    }

    /// Average rating formatted with two decimals, e.g. `"4.57"`
    pub fn average_rating_display(&self) -> String {
        format!("{:.2}", self.average_rating)
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Round half away from zero to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
