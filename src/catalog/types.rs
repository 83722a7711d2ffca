//! Core record types for the resource catalog

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CatalogError;

/// Learner level used by recommendations and learning paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

impl Level {
    /// Get all levels, easiest first
    pub fn all() -> &'static [Self] {
        &[
            Self::Beginner,
            Self::Intermediate,
            Self::Advanced,
            Self::Professional,
        ]
    }

    /// Lowercase identifier, also used in cache keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Professional => "professional",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Professional => "Professional",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "professional" => Ok(Self::Professional),
            other => Err(CatalogError::UnknownLevel(other.to_string())),
        }
    }
}

/// A catalog entry describing an external website or tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Identifier, unique within a table
    pub id: u32,
    /// Display name
    pub name: String,
    /// Link to the resource
    pub url: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Free-text grouping label
    pub category: String,
    /// Rating on a 0.0 to 5.0 scale
    pub rating: f64,
}

impl Resource {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        url: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            description: String::new(),
            category: category.into(),
            rating: 0.0,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Case-insensitive substring test against name, description and category.
    ///
    /// `needle_lower` must already be lowercase.
    pub(crate) fn mentions(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
            || self.category.to_lowercase().contains(needle_lower)
    }

    /// Case-insensitive substring test against the category only
    pub(crate) fn in_category(&self, needle_lower: &str) -> bool {
        self.category.to_lowercase().contains(needle_lower)
    }

    /// Check the record against the schema constraints
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(CatalogError::RatingOutOfRange {
                id: self.id,
                rating: self.rating,
            });
        }
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName { id: self.id });
        }
        Ok(())
    }
}

/// One named source table of resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceTable {
    /// Section name, selectable through `ResourceFilter::section`
    pub section: String,
    pub resources: Vec<Resource>,
}

impl ResourceTable {
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            resources: Vec::new(),
        }
    }

    pub fn with_resources(mut self, resources: Vec<Resource>) -> Self {
        self.resources = resources;
        self
    }

    pub fn push(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
