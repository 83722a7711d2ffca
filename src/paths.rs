//! Guided learning paths and progress tracking

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::catalog::{mean, round2, Level};
use crate::prefs::PreferenceStore;
use crate::search::Searchable;

/// An ordered sequence of topics for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    /// Stable identifier, also the key used for stored progress
    pub id: String,
    pub title: String,
    pub level: Level,
    pub description: String,
    pub topics: Vec<String>,
    pub estimated_hours: u32,
}

impl LearningPath {
    pub fn new(id: impl Into<String>, title: impl Into<String>, level: Level) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level,
            description: String::new(),
            topics: Vec::new(),
            estimated_hours: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_topics(mut self, topics: &[&str]) -> Self {
        self.topics = topics.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_hours(mut self, hours: u32) -> Self {
        self.estimated_hours = hours;
        self
    }
}

impl Searchable for LearningPath {
    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "title" => Some(Cow::Borrowed(&self.title)),
            "description" => Some(Cow::Borrowed(&self.description)),
            "level" => Some(Cow::Borrowed(self.level.as_str())),
            "topics" => Some(Cow::Owned(self.topics.join(", "))),
            _ => None,
        }
    }
}

/// A path paired with its recorded completion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathProgress<'a> {
    pub path: &'a LearningPath,
    pub percent: u8,
}

#[derive(Debug, Clone, Default)]
pub struct LearningPaths {
    paths: Vec<LearningPath>,
}

impl LearningPaths {
    pub fn new(paths: Vec<LearningPath>) -> Self {
        Self { paths }
    }

    /// One path per level
    pub fn standard() -> Self {
        Self::new(vec![
            LearningPath::new("arithmetic-basics", "Arithmetic Basics", Level::Beginner)
                .with_description("Number sense, operations and fractions")
                .with_topics(&[
                    "Place value",
                    "Addition and subtraction",
                    "Multiplication tables",
                    "Fractions and decimals",
                    "Percentages",
                ])
                .with_hours(20),
            LearningPath::new("algebra-geometry", "Algebra & Geometry", Level::Intermediate)
                .with_description("Equations, functions and shapes in the plane")
                .with_topics(&[
                    "Linear equations",
                    "Quadratics",
                    "Functions and graphs",
                    "Triangles and circles",
                    "Trigonometry",
                ])
                .with_hours(40),
            LearningPath::new("calculus-journey", "Calculus Journey", Level::Advanced)
                .with_description("Limits through multivariable calculus")
                .with_topics(&[
                    "Limits",
                    "Derivatives",
                    "Integrals",
                    "Series",
                    "Multivariable calculus",
                    "Differential equations",
                ])
                .with_hours(80),
            LearningPath::new("research-toolkit", "Research Toolkit", Level::Professional)
                .with_description("Writing, computing and proving like a working mathematician")
                .with_topics(&[
                    "LaTeX typesetting",
                    "Numerical methods",
                    "Computer algebra",
                    "Proof assistants",
                    "Reading the literature",
                ])
                .with_hours(60),
        ])
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn all(&self) -> &[LearningPath] {
        &self.paths
    }

    pub fn get(&self, id: &str) -> Option<&LearningPath> {
        self.paths.iter().find(|p| p.id == id)
    }

    pub fn by_level(&self, level: Level) -> Vec<&LearningPath> {
        self.paths.iter().filter(|p| p.level == level).collect()
    }

    /// Every path with the percent stored for it
    pub fn with_progress(&self, store: &PreferenceStore) -> Vec<PathProgress<'_>> {
        let progress = store.all_progress();
        self.paths
            .iter()
            .map(|path| PathProgress {
                path,
                percent: progress.get(&path.id).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Mean completion across all paths, rounded to 2 decimals
    pub fn overall_progress(&self, store: &PreferenceStore) -> f64 {
        let percents: Vec<f64> = self
            .with_progress(store)
            .iter()
            .map(|p| f64::from(p.percent))
            .collect();
        mean(&percents).map(round2).unwrap_or(0.0)
    }
}
