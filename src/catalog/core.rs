//! Core catalog operations
//!
//! ## Observability
//!
//! Query operations are instrumented with tracing spans:
//! - `mathstar.catalog.by_category` - Category-filtered queries
//! - `mathstar.catalog.top_rated` - Rating-threshold queries
//! - `mathstar.catalog.search` - Substring search
//! - `mathstar.catalog.recommended` - Level recommendations

use std::collections::HashSet;
use tracing::{debug, info, instrument};

use super::stats::ResourceStats;
use super::types::{Level, Resource, ResourceTable};
use crate::error::CatalogError;
use crate::recommend::RecommendationTable;

/// Cap applied by [`ResourceCatalog::recommended`] when no other limit is configured
pub const DEFAULT_RECOMMENDED_LIMIT: usize = 10;

/// Threshold applied by [`ResourceCatalog::top_rated`] callers when none is configured
pub const DEFAULT_TOP_RATED_THRESHOLD: f64 = 4.5;

/// The union of all resource tables
///
/// Unlike [`crate::query::CatalogService`], this view does not deduplicate:
/// a resource id present in two tables appears twice in [`Self::all_resources`].
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    pub(crate) tables: Vec<ResourceTable>,
    pub(crate) recommendations: RecommendationTable,
    pub(crate) recommended_limit: usize,
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceCatalog {
    /// Create empty catalog
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            recommendations: RecommendationTable::default(),
            recommended_limit: DEFAULT_RECOMMENDED_LIMIT,
        }
    }

    /// Load the built-in tables
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.register_tool_table();
        catalog.register_learning_table();
        catalog.register_visualization_table();
        catalog.register_application_table();
        catalog
    }

    /// Parse and validate a catalog from a JSON array of tables
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let tables: Vec<ResourceTable> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let mut catalog = Self::new();
        for table in tables {
            catalog.add_table(table);
        }
        catalog.validate()?;
        info!(
            tables = catalog.tables.len(),
            resources = catalog.len(),
            "Loaded catalog from JSON"
        );
        Ok(catalog)
    }

    /// Serialize the tables as a JSON array
    pub fn to_json(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(&self.tables).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Replace the recommendation terms
    pub fn with_recommendations(mut self, table: RecommendationTable) -> Self {
        self.recommendations = table;
        self
    }

    /// Replace the cap applied by [`Self::recommended`]
    pub fn with_recommended_limit(mut self, limit: usize) -> Self {
        self.recommended_limit = limit;
        self
    }

    /// Append a source table
    pub fn add_table(&mut self, table: ResourceTable) {
        self.tables.push(table);
    }

    /// Check every record and reject duplicate ids within a table
    pub fn validate(&self) -> Result<(), CatalogError> {
        for table in &self.tables {
            let mut seen = HashSet::new();
            for resource in &table.resources {
                resource.validate()?;
                if !seen.insert(resource.id) {
                    return Err(CatalogError::DuplicateId {
                        id: resource.id,
                        section: table.section.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Source tables in registration order
    pub fn tables(&self) -> &[ResourceTable] {
        &self.tables
    }

    /// Section names in registration order
    pub fn sections(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.section.as_str()).collect()
    }

    /// Get a table by section name (exact match)
    pub fn section(&self, name: &str) -> Option<&ResourceTable> {
        self.tables.iter().find(|t| t.section == name)
    }

    /// The recommendation terms in use
    pub fn recommendation_table(&self) -> &RecommendationTable {
        &self.recommendations
    }

    /// Total resource count across tables, duplicates included
    pub fn len(&self) -> usize {
        self.tables.iter().map(ResourceTable::len).sum()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate every resource in table order, then within-table order
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.tables.iter().flat_map(|t| t.resources.iter())
    }

    /// Concatenation of all tables
    pub fn all_resources(&self) -> Vec<&Resource> {
        self.iter().collect()
    }

    /// Distinct category labels in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.iter()
            .map(|r| r.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Resources whose category contains `category`, ignoring case
    #[instrument(name = "mathstar.catalog.by_category", skip(self), fields(result_count = tracing::field::Empty))]
    pub fn by_category(&self, category: &str) -> Vec<&Resource> {
        let needle = category.to_lowercase();
        let results: Vec<_> = self.iter().filter(|r| r.in_category(&needle)).collect();
        tracing::Span::current().record("result_count", results.len());
        debug!(
            category = category,
            count = results.len(),
            "Category query completed"
        );
        results
    }

    /// Resources rated at or above `min_rating`, original order
    #[instrument(name = "mathstar.catalog.top_rated", skip(self), fields(result_count = tracing::field::Empty))]
    pub fn top_rated(&self, min_rating: f64) -> Vec<&Resource> {
        let results: Vec<_> = self.iter().filter(|r| r.rating >= min_rating).collect();
        tracing::Span::current().record("result_count", results.len());
        debug!(min_rating, count = results.len(), "Top-rated query completed");
        results
    }

    /// Substring search over name, description and category
    #[instrument(name = "mathstar.catalog.search", skip(self), fields(result_count = tracing::field::Empty))]
    pub fn search(&self, query: &str) -> Vec<&Resource> {
        let needle = query.to_lowercase();
        let results: Vec<_> = self.iter().filter(|r| r.mentions(&needle)).collect();
        tracing::Span::current().record("result_count", results.len());
        info!(query = query, count = results.len(), "Catalog search completed");
        results
    }

    /// Aggregate statistics over every resource, duplicates included
    pub fn stats(&self) -> ResourceStats {
        ResourceStats::compute(&self.all_resources())
    }

    /// Keyword-matched resources for `level`, best rated first
    #[instrument(name = "mathstar.catalog.recommended", skip(self), fields(result_count = tracing::field::Empty))]
    pub fn recommended(&self, level: Level) -> Vec<&Resource> {
        let mut results: Vec<_> = self
            .iter()
            .filter(|r| self.recommendations.matches(level, r))
            .collect();
        sort_by_rating_desc(&mut results);
        results.truncate(self.recommended_limit);
        tracing::Span::current().record("result_count", results.len());
        debug!(level = %level, count = results.len(), "Recommendation query completed");
        results
    }
}

/// Stable sort, highest rating first
pub(crate) fn sort_by_rating_desc<R: std::borrow::Borrow<Resource>>(resources: &mut [R]) {
    resources.sort_by(|a, b| b.borrow().rating.total_cmp(&a.borrow().rating));
}
