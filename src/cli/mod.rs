//! CLI command logic, kept out of main.rs so it can be tested
//!
//! Display functions live in the per-area modules; the pure helpers they
//! share (parsing, bars, highlighting) live here.

pub mod learning;
pub mod resources;
pub mod settings;

use anyhow::Context;
use mathstar::{
    CatalogService, Level, MathStarConfig, PreferenceStore, ResourceCatalog, SymbolCategory,
};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Output format shared by every listing command
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        self == Self::Json
    }
}

// ============================================================================
// Application context
// ============================================================================

/// Everything a command needs, resolved once from the global flags
pub struct AppContext {
    pub config: MathStarConfig,
    pub service: CatalogService,
    pub prefs_path: PathBuf,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn load(
        config_path: Option<&Path>,
        catalog_path: Option<&Path>,
        prefs_path: Option<PathBuf>,
        format: OutputFormat,
    ) -> anyhow::Result<Self> {
        let config = load_config(config_path)?;
        let catalog = load_catalog(catalog_path, &config)?;
        let prefs_path = prefs_path.unwrap_or_else(|| config.storage.preferences_path.clone());
        let service = CatalogService::new(Arc::new(catalog), &config);
        Ok(Self {
            config,
            service,
            prefs_path,
            format,
        })
    }

    pub fn open_prefs(&self) -> anyhow::Result<PreferenceStore> {
        PreferenceStore::open(&self.prefs_path).with_context(|| {
            format!("failed to open preferences: {}", self.prefs_path.display())
        })
    }
}

/// Explicit `--config` must exist; otherwise `mathstar.toml` is optional
pub fn load_config(path: Option<&Path>) -> anyhow::Result<MathStarConfig> {
    match path {
        Some(path) => {
            info!("Loading config from {:?}", path);
            MathStarConfig::load(path)
        }
        None => Ok(MathStarConfig::load_optional()?.unwrap_or_default()),
    }
}

/// Built-in tables, or a validated JSON catalog, with configured recommendation terms
pub fn load_catalog(
    path: Option<&Path>,
    config: &MathStarConfig,
) -> anyhow::Result<ResourceCatalog> {
    let catalog = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog: {}", path.display()))?;
            ResourceCatalog::from_json(&content)
                .with_context(|| format!("invalid catalog: {}", path.display()))?
        }
        None => ResourceCatalog::standard(),
    };
    debug!(resources = catalog.len(), "Catalog ready");
    Ok(catalog
        .with_recommendations(config.recommendations.terms.clone())
        .with_recommended_limit(config.recommendations.basic_limit))
}

// ============================================================================
// Argument parsing
// ============================================================================

pub fn parse_level(name: &str) -> anyhow::Result<Level> {
    name.parse::<Level>().map_err(|e| {
        anyhow::anyhow!(
            "{}. Valid: beginner, intermediate, advanced, professional",
            e
        )
    })
}

/// Accepts the display name or the snake_case name, ignoring case and spacing
pub fn parse_symbol_category(name: &str) -> anyhow::Result<SymbolCategory> {
    let wanted = normalize(name);
    SymbolCategory::all()
        .iter()
        .copied()
        .find(|c| {
            normalize(c.display_name()) == wanted
                || serde_json::to_value(c)
                    .ok()
                    .and_then(|v| v.as_str().map(normalize))
                    .is_some_and(|n| n == wanted)
        })
        .ok_or_else(|| {
            let valid: Vec<String> = SymbolCategory::all()
                .iter()
                .filter_map(|c| serde_json::to_value(c).ok())
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            anyhow::anyhow!("Unknown symbol category: {}. Valid: {}", name, valid.join(", "))
        })
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// Display helpers
// ============================================================================

/// Five-star bar for a 0-5 rating, rounded to the nearest star
pub fn rating_stars(rating: f64) -> String {
    let filled = rating.clamp(0.0, 5.0).round() as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// `[####------]` bar of `width` cells
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Split `text` into runs, flagging the runs covered by `ranges` (char indices)
pub fn split_highlights(text: &str, ranges: &[Range<usize>]) -> Vec<(String, bool)> {
    let mut runs: Vec<(String, bool)> = Vec::new();
    for (i, ch) in text.chars().enumerate() {
        let marked = ranges.iter().any(|r| r.contains(&i));
        match runs.last_mut() {
            Some((run, flag)) if *flag == marked => run.push(ch),
            _ => runs.push((ch.to_string(), marked)),
        }
    }
    runs
}

/// Shorten to `max` chars with a trailing ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
