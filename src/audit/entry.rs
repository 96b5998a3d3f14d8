//! Activity entry data structures
//!
//! Defines the actions that are audited and the shape of a single activity
//! entry, including the change set recorded for updates.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diff::ChangeSet;
use crate::models::{ActivityId, Product, ProductId, UserId};

/// Audited actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
}

impl ActivityAction {
    pub const ALL: [ActivityAction; 3] = [
        ActivityAction::CreateProduct,
        ActivityAction::UpdateProduct,
        ActivityAction::DeleteProduct,
    ];

    /// The wire name, e.g. `UPDATE_PRODUCT`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateProduct => "CREATE_PRODUCT",
            Self::UpdateProduct => "UPDATE_PRODUCT",
            Self::DeleteProduct => "DELETE_PRODUCT",
        }
    }

    /// Human-friendly label, e.g. `update product`
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ").to_lowercase()
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when an action name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown action '{}'. Valid actions: CREATE_PRODUCT, UPDATE_PRODUCT, DELETE_PRODUCT",
            self.0
        )
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for ActivityAction {
    type Err = UnknownAction;

    /// Accepts the wire name in any case, or the short forms `create`, `update`, `delete`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CREATE_PRODUCT" | "CREATE" => Ok(Self::CreateProduct),
            "UPDATE_PRODUCT" | "UPDATE" => Ok(Self::UpdateProduct),
            "DELETE_PRODUCT" | "DELETE" => Ok(Self::DeleteProduct),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}

/// Free-form metadata attached to an entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityMeta {
    /// Product name at the time of the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Product SKU at the time of the action
    #[serde(default)]
    pub sku: Option<String>,

    /// Field-level changes (updates only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<ChangeSet>,
}

impl ActivityMeta {
    /// Name and SKU of a product
    pub fn for_product(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            sku: product.sku.clone(),
            diff: None,
        }
    }

    /// Attach a change set
    pub fn with_diff(mut self, diff: ChangeSet) -> Self {
        self.diff = Some(diff);
        self
    }
}

/// A single activity entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: ActivityId,

    /// The user who performed the action
    pub user_id: UserId,

    pub action: ActivityAction,

    /// The affected product, if any
    #[serde(default)]
    pub product_id: Option<ProductId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ActivityMeta>,

    /// When the action happened (UTC)
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    /// Create a new entry timestamped now
    pub fn new(
        user_id: UserId,
        action: ActivityAction,
        product_id: Option<ProductId>,
        meta: Option<ActivityMeta>,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            user_id,
            action,
            product_id,
            meta,
            created_at: Utc::now(),
        }
    }

    /// Entry for a newly created product
    pub fn product_created(user_id: UserId, product: &Product) -> Self {
        Self::new(
            user_id,
            ActivityAction::CreateProduct,
            Some(product.id),
            Some(ActivityMeta::for_product(product)),
        )
    }

    /// Entry for an updated product, carrying the field-level changes
    pub fn product_updated(user_id: UserId, after: &Product, diff: ChangeSet) -> Self {
        Self::new(
            user_id,
            ActivityAction::UpdateProduct,
            Some(after.id),
            Some(ActivityMeta::for_product(after).with_diff(diff)),
        )
    }

    /// Entry for a deleted product, described by its last state
    pub fn product_deleted(user_id: UserId, before: &Product) -> Self {
        Self::new(
            user_id,
            ActivityAction::DeleteProduct,
            Some(before.id),
            Some(ActivityMeta::for_product(before)),
        )
    }

    pub fn name(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.name.as_deref())
    }

    pub fn sku(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.sku.as_deref())
    }

    pub fn diff(&self) -> Option<&ChangeSet> {
        self.meta.as_ref().and_then(|m| m.diff.as_ref())
    }

    /// Case-insensitive substring match against the product name or SKU
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [self.name(), self.sku()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
