//! CSV Export functionality
//!
//! Exports products and activity to spreadsheet-friendly CSV.

use std::io::Write;

use crate::config::user::CurrentUser;
use crate::error::{StockroomError, StockroomResult};
use crate::query::ActivityQuery;
use crate::services::{ActivityService, ProductService};
use crate::storage::Storage;

fn export_err(e: csv::Error) -> StockroomError {
    StockroomError::Export(e.to_string())
}

/// Export the user's products to CSV, newest first
pub fn export_products_csv<W: Write>(
    storage: &Storage,
    user: &CurrentUser,
    writer: W,
) -> StockroomResult<()> {
    let products = ProductService::new(storage, user).list()?;
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record([
        "ID",
        "Name",
        "SKU",
        "Price",
        "Quantity",
        "Low Stock At",
        "Stock Value",
        "Created At",
        "Updated At",
    ])
    .map_err(export_err)?;

    for product in products {
        csv.write_record([
            product.id.to_full_string(),
            product.name.clone(),
            product.sku.clone().unwrap_or_default(),
            product.price.to_decimal_string(),
            product.quantity.to_string(),
            product
                .low_stock_at
                .map(|n| n.to_string())
                .unwrap_or_default(),
            product.stock_value().to_decimal_string(),
            product.created_at.to_rfc3339(),
            product.updated_at.to_rfc3339(),
        ])
        .map_err(export_err)?;
    }

    csv.flush()
        .map_err(|e| StockroomError::Export(e.to_string()))?;
    Ok(())
}

/// Export the user's activity to CSV, newest first
///
/// Changes are flattened into a single `field: from -> to` column.
pub fn export_activity_csv<W: Write>(
    storage: &Storage,
    user: &CurrentUser,
    writer: W,
) -> StockroomResult<()> {
    let entries = ActivityService::new(storage, user).all(&ActivityQuery::default())?;
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["ID", "Created At", "Action", "Product ID", "Name", "SKU", "Changes"])
        .map_err(export_err)?;

    for entry in entries {
        csv.write_record([
            entry.id.to_full_string(),
            entry.created_at.to_rfc3339(),
            entry.action.to_string(),
            entry
                .product_id
                .map(|id| id.to_full_string())
                .unwrap_or_default(),
            entry.name().unwrap_or_default().to_string(),
            entry.sku().unwrap_or_default().to_string(),
            entry.diff().and_then(|d| d.summary()).unwrap_or_default(),
        ])
        .map_err(export_err)?;
    }

    csv.flush()
        .map_err(|e| StockroomError::Export(e.to_string()))?;
    Ok(())
}
