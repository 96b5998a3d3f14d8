//! Product model
//!
//! Represents a stocked item owned by a single user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ProductId, UserId};
use super::money::Money;
use crate::audit::Snapshot;

/// Maximum length of a product name
pub const MAX_NAME_LEN: usize = 120;

/// A stocked product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,

    /// Owner of this product
    pub user_id: UserId,

    /// Product name (e.g., "Blue Widget")
    pub name: String,

    /// Optional stock keeping unit
    #[serde(default)]
    pub sku: Option<String>,

    /// Unit price
    pub price: Money,

    /// Units on hand
    pub quantity: u32,

    /// Quantity below which the product counts as low on stock
    #[serde(default)]
    pub low_stock_at: Option<u32>,

    /// When the product was created
    pub created_at: DateTime<Utc>,

    /// When the product was last modified
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product with no SKU and no low-stock threshold
    pub fn new(user_id: UserId, name: impl Into<String>, price: Money, quantity: u32) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            user_id,
            name: name.into(),
            sku: None,
            price,
            quantity,
            low_stock_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when a threshold is set and the quantity is below it
    pub fn is_low_stock(&self) -> bool {
        self.low_stock_at
            .is_some_and(|threshold| self.quantity < threshold)
    }

    /// Total value of the units on hand
    pub fn stock_value(&self) -> Money {
        self.price.times(self.quantity)
    }

    /// Snapshot of the audited fields, used to diff before/after states
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new()
            .with("name", self.name.as_str())
            .with("sku", self.sku.as_deref())
            .with("price", self.price)
            .with("quantity", self.quantity)
            .with("lowStockAt", self.low_stock_at)
    }

    /// Validate the product
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }

        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(ProductValidationError::NameTooLong(self.name.chars().count()));
        }

        if let Some(sku) = &self.sku {
            if sku.trim().is_empty() {
                return Err(ProductValidationError::EmptySku);
            }
        }

        if self.price.is_negative() {
            return Err(ProductValidationError::NegativePrice(self.price));
        }

        Ok(())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sku {
            Some(sku) => write!(f, "{} [{}]", self.name, sku),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Validation errors for products
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyName,
    NameTooLong(usize),
    EmptySku,
    NegativePrice(Money),
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Product name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Product name too long ({} characters, max {})",
                len, MAX_NAME_LEN
            ),
            Self::EmptySku => write!(f, "SKU cannot be blank"),
            Self::NegativePrice(price) => write!(f, "Price must be >= 0 (got {})", price),
        }
    }
}

impl std::error::Error for ProductValidationError {}
