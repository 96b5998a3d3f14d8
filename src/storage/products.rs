//! Product repository for JSON storage
//!
//! Manages loading and saving products to products.json

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::StockroomError;
use crate::models::{Product, ProductId, UserId};
use crate::pagination::OffsetPage;

use super::file_io::{read_json, write_json_atomic};

/// Serializable product data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ProductData {
    products: Vec<Product>,
}

/// Which products a listing covers
#[derive(Debug, Clone)]
pub struct ProductFilter {
    /// Only products owned by this user
    pub user_id: UserId,
    /// Case-insensitive substring of the name
    pub q: Option<String>,
}

impl ProductFilter {
    pub fn for_user(user_id: UserId) -> Self {
        Self { user_id, q: None }
    }

    pub fn with_q(mut self, q: Option<String>) -> Self {
        self.q = q;
        self
    }

    fn matches(&self, product: &Product) -> bool {
        product.user_id == self.user_id
            && self
                .q
                .as_ref()
                .map_or(true, |q| product.name.to_lowercase().contains(&q.to_lowercase()))
    }
}

/// Newest first, ties broken by id descending
pub fn newest_first(a: &Product, b: &Product) -> Ordering {
    b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
}

/// Repository for product persistence
pub struct ProductRepository {
    path: PathBuf,
    data: RwLock<HashMap<ProductId, Product>>,
}

impl ProductRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load products from disk
    pub fn load(&self) -> Result<(), StockroomError> {
        let file_data: ProductData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for product in file_data.products {
            data.insert(product.id, product);
        }

        debug!(count = data.len(), path = %self.path.display(), "loaded products");
        Ok(())
    }

    /// Save products to disk
    pub fn save(&self) -> Result<(), StockroomError> {
        let data = self.data.read().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut products: Vec<Product> = data.values().cloned().collect();
        products.sort_by(newest_first);

        write_json_atomic(&self.path, &ProductData { products })
    }

    /// Get a product by ID
    pub fn get(&self, id: ProductId) -> Result<Option<Product>, StockroomError> {
        let data = self.data.read().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get a product by name (case-insensitive) among one user's products
    pub fn get_by_name(
        &self,
        user_id: UserId,
        name: &str,
    ) -> Result<Option<Product>, StockroomError> {
        let data = self.data.read().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name_lower = name.to_lowercase();
        Ok(data
            .values()
            .filter(|p| p.user_id == user_id && p.name.to_lowercase() == name_lower)
            .min_by(|a, b| newest_first(a, b))
            .cloned())
    }

    /// All products matching `filter`, newest first
    pub fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, StockroomError> {
        let data = self.data.read().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut products: Vec<Product> = data
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        products.sort_by(newest_first);
        Ok(products)
    }

    /// Count products matching `filter`
    pub fn count_matching(&self, filter: &ProductFilter) -> Result<usize, StockroomError> {
        let data = self.data.read().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().filter(|p| filter.matches(p)).count())
    }

    /// The slice of matching products selected by `page`
    pub fn page(
        &self,
        filter: &ProductFilter,
        page: &OffsetPage,
    ) -> Result<Vec<Product>, StockroomError> {
        Ok(page.slice(self.list(filter)?))
    }

    /// Insert or update a product
    pub fn upsert(&self, product: Product) -> Result<(), StockroomError> {
        let mut data = self.data.write().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(product.id, product);
        Ok(())
    }

    /// Delete a product, returning it if it existed
    pub fn delete(&self, id: ProductId) -> Result<Option<Product>, StockroomError> {
        let mut data = self.data.write().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id))
    }

    /// Count all stored products
    pub fn count(&self) -> Result<usize, StockroomError> {
        let data = self.data.read().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
