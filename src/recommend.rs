//! Level-based recommendation terms
//!
//! A recommendation table maps each learner level to the terms that mark a
//! resource as suitable for that level. The table is plain data so it can be
//! overridden from `mathstar.toml` and tested apart from the query layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{Level, Resource};

/// Match terms per learner level, keyed by the level's lowercase name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationTable {
    terms: BTreeMap<String, Vec<String>>,
}

impl Default for RecommendationTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.set_terms(
            Level::Beginner,
            &["basic", "elementary", "beginner", "arithmetic", "fraction", "practice", "khan"],
        );
        table.set_terms(
            Level::Intermediate,
            &["algebra", "geometry", "graph", "trigonometry", "statistics", "desmos", "geogebra"],
        );
        table.set_terms(
            Level::Advanced,
            &["calculus", "linear algebra", "differential", "analysis", "symbolic", "proof", "wolfram"],
        );
        table.set_terms(
            Level::Professional,
            &["research", "latex", "arxiv", "numerical", "programming", "matlab", "journal"],
        );
        table
    }
}

impl RecommendationTable {
    /// Table with no terms for any level
    pub fn empty() -> Self {
        Self {
            terms: BTreeMap::new(),
        }
    }

    /// Replace the terms for `level`; terms are stored lowercase
    pub fn set_terms(&mut self, level: Level, terms: &[&str]) {
        self.terms.insert(
            level.as_str().to_string(),
            terms.iter().map(|t| t.trim().to_lowercase()).collect(),
        );
    }

    /// Terms configured for `level` (empty when none)
    pub fn terms(&self, level: Level) -> &[String] {
        self.terms
            .get(level.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Does any term for `level` appear in the resource's name, description or category?
    pub fn matches(&self, level: Level, resource: &Resource) -> bool {
        self.terms(level)
            .iter()
            .filter(|t| !t.is_empty())
            .any(|term| resource.mentions(&term.to_lowercase()))
    }
}
