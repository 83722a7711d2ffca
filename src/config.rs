use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::{DEFAULT_RECOMMENDED_LIMIT, DEFAULT_TOP_RATED_THRESHOLD};
use crate::query::{EvictionPolicy, DEFAULT_CACHE_CAPACITY};
use crate::recommend::RecommendationTable;

/// Filename looked up in the working directory when no `--config` is given.
pub const CONFIG_FILENAME: &str = "mathstar.toml";

/// Math Star configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MathStarConfig {
    /// Configuration file version
    pub version: String,

    /// Query defaults
    pub query: QueryConfig,

    /// Result cache settings
    pub cache: CacheConfig,

    /// Recommendation settings
    pub recommendations: RecommendationConfig,

    /// Windowed listing settings
    pub window: WindowConfig,

    /// Preference storage
    pub storage: StorageConfig,
}

impl Default for MathStarConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            query: QueryConfig::default(),
            cache: CacheConfig::default(),
            recommendations: RecommendationConfig::default(),
            window: WindowConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Inclusive threshold used by `top` when none is given
    pub top_rated_threshold: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_rated_threshold: DEFAULT_TOP_RATED_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum entries per result cache
    pub capacity: usize,

    /// Eviction order once the capacity is exceeded
    pub policy: EvictionPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            policy: EvictionPolicy::Fifo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Cap for keyword-only recommendations
    pub basic_limit: usize,

    /// Cap for cached recommendations when `--limit` is not given
    pub default_limit: usize,

    /// Resources rated at or above this are recommended at every level
    pub rating_floor: f64,

    /// Match terms per level
    pub terms: RecommendationTable,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            basic_limit: DEFAULT_RECOMMENDED_LIMIT,
            default_limit: 12,
            rating_floor: 4.5,
            terms: RecommendationTable::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Visible rows per page in `list`
    pub page_rows: usize,

    /// Extra rows rendered above and below the viewport
    pub overscan: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            page_rows: 20,
            overscan: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding theme, progress and favorites
    pub preferences_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            preferences_path: PathBuf::from(".mathstar-prefs.json"),
        }
    }
}

impl MathStarConfig {
    /// Load configuration from TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Load `mathstar.toml` from the current directory.
    /// Returns `Ok(None)` if the file does not exist, `Err` if malformed.
    pub fn load_optional() -> anyhow::Result<Option<Self>> {
        let path = Path::new(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Level;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = MathStarConfig::default();

        assert_eq!(config.version, "1.0");
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.cache.policy, EvictionPolicy::Fifo);
        assert_eq!(config.query.top_rated_threshold, 4.5);
        assert_eq!(config.recommendations.basic_limit, 10);
        assert_eq!(config.recommendations.default_limit, 12);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("mathstar.toml");

        let mut config = MathStarConfig::default();
        config.cache.capacity = 16;
        config.cache.policy = EvictionPolicy::Lru;
        config
            .recommendations
            .terms
            .set_terms(Level::Beginner, &["counting"]);

        config.save(&config_path).unwrap();
        assert!(config_path.exists());

        let loaded = MathStarConfig::load(&config_path).unwrap();
        assert_eq!(loaded.cache.capacity, 16);
        assert_eq!(loaded.cache.policy, EvictionPolicy::Lru);
        assert_eq!(
            loaded.recommendations.terms.terms(Level::Beginner),
            &["counting".to_string()]
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("mathstar.toml");
        std::fs::write(&config_path, "[cache]\npolicy = \"lru\"\n").unwrap();

        let loaded = MathStarConfig::load(&config_path).unwrap();
        assert_eq!(loaded.cache.policy, EvictionPolicy::Lru);
        assert_eq!(loaded.cache.capacity, 100);
        assert_eq!(loaded.window, WindowConfig::default());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = MathStarConfig::load(Path::new("/nonexistent/mathstar.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.toml");
        std::fs::write(&config_path, "invalid toml content [[[").unwrap();

        assert!(MathStarConfig::load(&config_path).is_err());
    }
}
