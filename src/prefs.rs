//! Persistent user preferences
//!
//! Preferences live in a single JSON object whose values are all strings.
//! Structured values (progress map, favorite list) are themselves JSON encoded
//! inside those strings, so the file stays a flat key/value store:
//!
//! ```json
//! {
//!   "theme": "dark",
//!   "learningProgress": "{\"algebra-foundations\":40}",
//!   "favoriteMathSymbols": "[12,32]"
//! }
//! ```
//!
//! Unknown keys are ignored. A value that fails to parse reads as its default
//! and is overwritten on the next write to that key.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::PreferenceError;

pub const THEME_KEY: &str = "theme";
pub const PROGRESS_KEY: &str = "learningProgress";
pub const FAVORITES_KEY: &str = "favoriteMathSymbols";

const KEYS: [&str; 3] = [THEME_KEY, PROGRESS_KEY, FAVORITES_KEY];

/// Color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(PreferenceError::UnknownTheme(s.to_string())),
        }
    }
}

/// File-backed preference store
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// In-memory store that will save to `path`
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: BTreeMap::new(),
        }
    }

    /// Load the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        if !path.exists() {
            debug!(path = %path.display(), "No preference file, starting empty");
            return Ok(Self::empty(path));
        }

        let content = std::fs::read_to_string(&path)?;
        let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Preference file is corrupt, ignoring it");
                return Ok(Self::empty(path));
            }
        };

        let mut values = BTreeMap::new();
        for (key, value) in raw {
            if !KEYS.contains(&key.as_str()) {
                continue;
            }
            match value {
                serde_json::Value::String(s) => {
                    values.insert(key, s);
                }
                other => warn!(key = %key, value = %other, "Preference value is not a string, ignoring it"),
            }
        }
        debug!(path = %path.display(), keys = values.len(), "Loaded preferences");
        Ok(Self { path, values })
    }

    /// Write the store back to its file
    pub fn save(&self) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "Saved preferences");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw stored string for `key`
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    // ========================================================================
    // Theme
    // ========================================================================

    pub fn theme(&self) -> Theme {
        match self.raw(THEME_KEY) {
            None => Theme::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Stored theme unreadable, using default");
                Theme::default()
            }),
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.values
            .insert(THEME_KEY.to_string(), theme.as_str().to_string());
    }

    /// Flip between light and dark, returning the new theme
    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.theme().toggled();
        self.set_theme(next);
        next
    }

    // ========================================================================
    // Learning progress
    // ========================================================================

    /// Completion percent for a path, 0 when never recorded
    pub fn progress(&self, path_id: &str) -> u8 {
        self.all_progress().get(path_id).copied().unwrap_or(0)
    }

    /// Every recorded path and its percent
    ///
    /// Entries that are not whole percents in 0..=100 are dropped one by one,
    /// so a single bad value does not hide the rest.
    pub fn all_progress(&self) -> BTreeMap<String, u8> {
        let stored: BTreeMap<String, serde_json::Value> =
            self.read_json(PROGRESS_KEY).unwrap_or_default();
        stored
            .into_iter()
            .filter_map(|(id, value)| {
                match value.as_u64().filter(|p| *p <= 100) {
                    Some(percent) => Some((id, percent as u8)),
                    None => {
                        warn!(path_id = %id, value = %value, "Stored progress is not a percent, ignoring it");
                        None
                    }
                }
            })
            .collect()
    }

    pub fn set_progress(&mut self, path_id: &str, percent: u8) -> Result<(), PreferenceError> {
        if percent > 100 {
            return Err(PreferenceError::ProgressOutOfRange {
                path_id: path_id.to_string(),
                percent,
            });
        }
        let mut progress = self.all_progress();
        progress.insert(path_id.to_string(), percent);
        self.write_json(PROGRESS_KEY, &progress)
    }

    // ========================================================================
    // Favorite symbols
    // ========================================================================

    /// Favorite symbol ids in the order they were added
    pub fn favorites(&self) -> Vec<u32> {
        let stored: Vec<serde_json::Value> = self.read_json(FAVORITES_KEY).unwrap_or_default();
        let mut seen = std::collections::HashSet::new();
        stored
            .into_iter()
            .filter_map(|value| {
                let id = value.as_u64().and_then(|id| u32::try_from(id).ok());
                if id.is_none() {
                    warn!(value = %value, "Stored favorite is not a symbol id, ignoring it");
                }
                id
            })
            .filter(|id| seen.insert(*id))
            .collect()
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites().contains(&id)
    }

    /// Add or remove `id`, returning whether it is now a favorite
    pub fn toggle_favorite(&mut self, id: u32) -> Result<bool, PreferenceError> {
        let mut ids = self.favorites();
        let now_favorite = match ids.iter().position(|f| *f == id) {
            Some(pos) => {
                ids.remove(pos);
                false
            }
            None => {
                ids.push(id);
                true
            }
        };
        self.write_json(FAVORITES_KEY, &ids)?;
        Ok(now_favorite)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.raw(key)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = key, error = %e, "Stored preference unreadable, using default");
                None
            }
        }
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), PreferenceError> {
        let encoded = serde_json::to_string(value)?;
        self.values.insert(key.to_string(), encoded);
        Ok(())
    }
}
