//! Filter parameters for cached catalog queries

use serde::{Deserialize, Serialize};

use crate::catalog::Resource;

/// Optional constraints applied by [`super::CatalogService::filtered`]
///
/// The cache key is the JSON serialization of every field, with the rating
/// bound keyed by its bit pattern since JSON has no NaN or infinity. A NaN
/// bound constrains nothing and keys like an absent one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceFilter {
    /// Restrict to one named source table (exact name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Case-insensitive substring of the category label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Inclusive lower bound on rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    /// Case-insensitive substring of name, description or category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl ResourceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    /// Serialized form used as the cache key
    pub fn cache_key(&self) -> String {
        let key = FilterKey {
            section: self.section.as_deref(),
            category: self.category.as_deref(),
            min_rating: self.rating_bound().map(f64::to_bits),
            search_query: self.search_query.as_deref(),
        };
        // Strings and integers always serialize
        serde_json::to_string(&key).unwrap_or_default()
    }

    fn rating_bound(&self) -> Option<f64> {
        self.min_rating.filter(|r| !r.is_nan())
    }

    /// Category, rating and search constraints; the section is applied by the caller
    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(category) = &self.category {
            if !resource.in_category(&category.to_lowercase()) {
                return false;
            }
        }
        if let Some(min_rating) = self.rating_bound() {
            if resource.rating < min_rating {
                return false;
            }
        }
        if let Some(query) = &self.search_query {
            if !resource.mentions(&query.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

#[derive(Serialize)]
struct FilterKey<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_rating: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_query: Option<&'a str>,
}
