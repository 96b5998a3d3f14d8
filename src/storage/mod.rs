//! Storage layer for Stockroom
//!
//! Products live in a JSON file written atomically; activity is an
//! append-only JSONL log. Both are held in memory behind locks once loaded.

pub mod activity;
pub mod file_io;
pub mod products;
pub mod seed;

pub use activity::{ActivityFilter, ActivityRepository};
pub use file_io::{read_json, write_json_atomic};
pub use products::{ProductFilter, ProductRepository};
pub use seed::{seed_demo_products, DEFAULT_SEED_COUNT};

use crate::config::paths::StockroomPaths;
use crate::error::StockroomError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: StockroomPaths,
    pub products: ProductRepository,
    pub activity: ActivityRepository,
}

impl Storage {
    /// Create a new Storage instance, creating its directories
    pub fn new(paths: StockroomPaths) -> Result<Self, StockroomError> {
        paths.ensure_directories()?;

        Ok(Self {
            products: ProductRepository::new(paths.products_file()),
            activity: ActivityRepository::new(paths.activity_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &StockroomPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), StockroomError> {
        self.products.load()?;
        self.activity.load()?;
        Ok(())
    }

    /// Save all mutable data to disk
    ///
    /// Activity is written as it is appended and needs no save.
    pub fn save_all(&self) -> Result<(), StockroomError> {
        self.products.save()
    }

    /// Check if storage has been initialized (has a config file)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
