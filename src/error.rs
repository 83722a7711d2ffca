//! Catalog and preference errors
//!
//! Query operations are total and never return these; they surface only when
//! loading or validating data and when writing preferences.

use thiserror::Error;

/// Errors raised while building or loading a resource catalog
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Rating {rating} for resource {id} is outside 0.0..=5.0")]
    RatingOutOfRange { id: u32, rating: f64 },

    #[error("Resource {id} has an empty name")]
    EmptyName { id: u32 },

    #[error("Duplicate resource id {id} in section '{section}'")]
    DuplicateId { id: u32, section: String },

    #[error("Unknown level: {0}")]
    UnknownLevel(String),

    #[error("Catalog parse error: {0}")]
    Parse(String),
}

/// Errors raised by the preference store
#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Progress {percent}% for path '{path_id}' exceeds 100%")]
    ProgressOutOfRange { path_id: String, percent: u8 },

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Preference file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
