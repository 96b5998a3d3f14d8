//! Product service
//!
//! Provides business logic for product management: validated CRUD scoped to
//! the current user, with every change recorded in the activity log.

use chrono::Utc;
use tracing::info;

use crate::audit::{diff, ActivityEntry};
use crate::config::user::CurrentUser;
use crate::error::{StockroomError, StockroomResult};
use crate::models::{Money, Product, ProductId};
use crate::pagination::OffsetPage;
use crate::query::InventoryQuery;
use crate::storage::{ProductFilter, Storage};

/// Default number of products per inventory page
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Fields of a new product
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub sku: Option<String>,
    pub price: Money,
    pub quantity: u32,
    pub low_stock_at: Option<u32>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: Money, quantity: u32) -> Self {
        Self {
            name: name.into(),
            sku: None,
            price,
            quantity,
            low_stock_at: None,
        }
    }
}

/// A partial update; `None` leaves a field unchanged
///
/// For the optional fields, `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub sku: Option<Option<String>>,
    pub price: Option<Money>,
    pub quantity: Option<u32>,
    pub low_stock_at: Option<Option<u32>>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sku.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.low_stock_at.is_none()
    }

    fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.trim().to_string();
        }
        if let Some(sku) = &self.sku {
            product.sku = sku.as_ref().map(|s| s.trim().to_string());
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(low_stock_at) = self.low_stock_at {
            product.low_stock_at = low_stock_at;
        }
    }
}

/// One page of the inventory listing
#[derive(Debug, Clone)]
pub struct InventoryPage {
    pub products: Vec<Product>,
    pub page: OffsetPage,
    pub query: InventoryQuery,
}

impl InventoryPage {
    /// Query for the previous page, if there is one
    pub fn prev_query(&self) -> Option<InventoryQuery> {
        self.page
            .has_prev()
            .then(|| self.query.with_page(self.page.page.min(self.page.total_pages + 1) - 1))
    }

    /// Query for the next page, if there is one
    pub fn next_query(&self) -> Option<InventoryQuery> {
        self.page
            .has_next()
            .then(|| self.query.with_page(self.page.page + 1))
    }
}

/// Service for product management
pub struct ProductService<'a> {
    storage: &'a Storage,
    user: &'a CurrentUser,
    page_size: usize,
}

impl<'a> ProductService<'a> {
    /// Create a new product service acting for `user`
    pub fn new(storage: &'a Storage, user: &'a CurrentUser) -> Self {
        Self {
            storage,
            user,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Create a new product
    pub fn create(&self, input: ProductInput) -> StockroomResult<Product> {
        let mut product = Product::new(
            self.user.id,
            input.name.trim(),
            input.price,
            input.quantity,
        );
        product.sku = input.sku.map(|s| s.trim().to_string());
        product.low_stock_at = input.low_stock_at;

        product
            .validate()
            .map_err(|e| StockroomError::Validation(e.to_string()))?;

        // Record first: a change that cannot be audited is not applied
        self.storage
            .activity
            .append(ActivityEntry::product_created(self.user.id, &product))?;

        self.storage.products.upsert(product.clone())?;
        self.storage.products.save()?;

        info!(product = %product.id, name = %product.name, "created product");
        Ok(product)
    }

    /// Get one of the user's products by ID
    pub fn get(&self, id: ProductId) -> StockroomResult<Option<Product>> {
        Ok(self
            .storage
            .products
            .get(id)?
            .filter(|p| p.user_id == self.user.id))
    }

    /// Find a product by name (case-insensitive) or ID string
    pub fn find(&self, identifier: &str) -> StockroomResult<Option<Product>> {
        if let Some(product) = self
            .storage
            .products
            .get_by_name(self.user.id, identifier.trim())?
        {
            return Ok(Some(product));
        }

        if let Ok(id) = identifier.parse::<ProductId>() {
            return self.get(id);
        }

        Ok(None)
    }

    /// Like [`find`](Self::find), but a missing product is an error
    pub fn require(&self, identifier: &str) -> StockroomResult<Product> {
        self.find(identifier)?
            .ok_or_else(|| StockroomError::product_not_found(identifier))
    }

    /// All of the user's products, newest first
    pub fn list(&self) -> StockroomResult<Vec<Product>> {
        self.storage
            .products
            .list(&ProductFilter::for_user(self.user.id))
    }

    /// One page of the inventory listing
    pub fn list_page(&self, query: &InventoryQuery) -> StockroomResult<InventoryPage> {
        let filter = ProductFilter::for_user(self.user.id).with_q(query.q.clone());
        let total = self.storage.products.count_matching(&filter)?;
        let page = OffsetPage::new(total, query.page, self.page_size);
        let products = self.storage.products.page(&filter, &page)?;

        Ok(InventoryPage {
            products,
            page,
            query: query.clone(),
        })
    }

    /// Apply a partial update
    ///
    /// The activity entry carries the field-level changes. An update that
    /// changes nothing is neither saved nor logged.
    pub fn update(&self, id: ProductId, update: &ProductUpdate) -> StockroomResult<Product> {
        let before = self
            .get(id)?
            .ok_or_else(|| StockroomError::product_not_found(id.to_string()))?;

        let mut product = before.clone();
        update.apply(&mut product);

        product
            .validate()
            .map_err(|e| StockroomError::Validation(e.to_string()))?;

        let changes = diff(Some(&before.snapshot()), Some(&product.snapshot()));
        if changes.is_empty() {
            return Ok(before);
        }

        product.updated_at = Utc::now();
        let fields = changes.len();
        self.storage
            .activity
            .append(ActivityEntry::product_updated(self.user.id, &product, changes))?;

        self.storage.products.upsert(product.clone())?;
        self.storage.products.save()?;

        info!(product = %product.id, fields, "updated product");

        Ok(product)
    }

    /// Delete a product, returning its last state
    pub fn delete(&self, id: ProductId) -> StockroomResult<Product> {
        let product = self
            .get(id)?
            .ok_or_else(|| StockroomError::product_not_found(id.to_string()))?;

        self.storage
            .activity
            .append(ActivityEntry::product_deleted(self.user.id, &product))?;

        self.storage.products.delete(id)?;
        self.storage.products.save()?;

        info!(product = %product.id, name = %product.name, "deleted product");
        Ok(product)
    }
}
