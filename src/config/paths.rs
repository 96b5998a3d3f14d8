//! Path management for Stockroom
//!
//! Provides XDG-compliant path resolution for configuration and data files.
//!
//! ## Path Resolution Order
//!
//! 1. `STOCKROOM_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/stockroom` or `~/.config/stockroom`
//! 3. Windows: `%APPDATA%\stockroom`

use std::path::PathBuf;

use crate::error::StockroomError;

/// Manages all paths used by Stockroom
#[derive(Debug, Clone)]
pub struct StockroomPaths {
    /// Base directory for all Stockroom data
    base_dir: PathBuf,
}

impl StockroomPaths {
    /// Create a new StockroomPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, StockroomError> {
        let base_dir = if let Ok(custom) = std::env::var("STOCKROOM_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create StockroomPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/stockroom/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/stockroom/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to products.json
    pub fn products_file(&self) -> PathBuf {
        self.data_dir().join("products.json")
    }

    /// Get the path to the append-only activity log
    pub fn activity_log(&self) -> PathBuf {
        self.data_dir().join("activity.jsonl")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), StockroomError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| StockroomError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| StockroomError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Stockroom has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, StockroomError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                StockroomError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("stockroom"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, StockroomError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| StockroomError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("stockroom"))
}
