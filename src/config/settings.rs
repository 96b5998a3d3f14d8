//! User settings for Stockroom
//!
//! Manages the configured user, display preferences and listing page sizes.

use serde::{Deserialize, Serialize};

use super::paths::StockroomPaths;
use crate::error::StockroomError;
use crate::models::UserId;

/// User settings for Stockroom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// The user that owns products created from this installation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    /// Display name of the configured user
    #[serde(default = "default_user_name")]
    pub user_name: String,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Number of products per inventory page
    #[serde(default = "default_page_size")]
    pub inventory_page_size: usize,

    /// Number of entries per activity page
    #[serde(default = "default_page_size")]
    pub activity_page_size: usize,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_user_name() -> String {
    "owner".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_page_size() -> usize {
    6
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            user_id: None,
            user_name: default_user_name(),
            currency_symbol: default_currency(),
            inventory_page_size: default_page_size(),
            activity_page_size: default_page_size(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &StockroomPaths) -> Result<Self, StockroomError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                StockroomError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                StockroomError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &StockroomPaths) -> Result<(), StockroomError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            StockroomError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| StockroomError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
