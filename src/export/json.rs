//! JSON Export functionality
//!
//! Exports one user's products and activity to JSON with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::ActivityEntry;
use crate::config::user::CurrentUser;
use crate::error::{StockroomError, StockroomResult};
use crate::models::{Money, Product, UserId};
use crate::services::{ActivityService, ProductService};
use crate::query::ActivityQuery;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full export of one user's data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Owner of the exported data
    pub user_id: UserId,

    /// Products, newest first
    pub products: Vec<Product>,

    /// Activity, newest first
    pub activity: Vec<ActivityEntry>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub product_count: usize,
    pub activity_count: usize,

    /// Sum of price times quantity over all products
    pub total_value: Money,

    /// Creation time of the oldest product
    pub earliest_product: Option<DateTime<Utc>>,

    /// Creation time of the newest product
    pub latest_product: Option<DateTime<Utc>>,
}

impl FullExport {
    /// Collect everything visible to `user`
    pub fn from_storage(storage: &Storage, user: &CurrentUser) -> StockroomResult<Self> {
        let products = ProductService::new(storage, user).list()?;
        let activity = ActivityService::new(storage, user).all(&ActivityQuery::default())?;

        let metadata = ExportMetadata {
            product_count: products.len(),
            activity_count: activity.len(),
            total_value: products.iter().map(Product::stock_value).sum(),
            earliest_product: products.iter().map(|p| p.created_at).min(),
            latest_product: products.iter().map(|p| p.created_at).max(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user_id: user.id,
            products,
            activity,
            metadata,
        })
    }
}

/// Export the user's data to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    user: &CurrentUser,
    writer: &mut W,
    pretty: bool,
) -> StockroomResult<()> {
    let export = FullExport::from_storage(storage, user)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| StockroomError::Export(e.to_string()))?;

    Ok(())
}
