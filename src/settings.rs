//! Settings for a recipe shelf, read from YAML.
//!
//! Every field is optional:
//!
//! ```yaml
//! storage_key: recipes_v2
//! top_ingredient_limit: 12
//! preview_ingredient_limit: 8
//! default_sort: newest
//! ```

use crate::index::DEFAULT_TOP_INGREDIENTS;
use crate::search::SortKey;
use crate::store::DEFAULT_STORAGE_KEY;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of ingredient tokens shown on a recipe card by default.
pub const DEFAULT_PREVIEW_INGREDIENTS: usize = 8;

/// Errors that can occur when loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid settings: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Storage key the collection lives under
    pub storage_key: String,
    /// Maximum number of ingredient quick filters
    pub top_ingredient_limit: usize,
    /// Maximum number of ingredients previewed on a card
    pub preview_ingredient_limit: usize,
    /// Sort order selected when the shelf opens
    pub default_sort: SortKey,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            top_ingredient_limit: DEFAULT_TOP_INGREDIENTS,
            preview_ingredient_limit: DEFAULT_PREVIEW_INGREDIENTS,
            default_sort: SortKey::Unsorted,
        }
    }
}

impl Settings {
    /// Parses and validates settings from YAML. Blank input gives defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SettingsError> {
        if yaml.trim().is_empty() {
            return Ok(Settings::default());
        }
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: &Utf8Path) -> Result<Self, SettingsError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.storage_key.trim().is_empty() {
            return Err(SettingsError::Validation(
                "storage_key must not be empty".to_string(),
            ));
        }
        if self.top_ingredient_limit == 0 {
            return Err(SettingsError::Validation(
                "top_ingredient_limit must be at least 1".to_string(),
            ));
        }
        if self.preview_ingredient_limit == 0 {
            return Err(SettingsError::Validation(
                "preview_ingredient_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
