//! Product display formatting
//!
//! Formats the inventory listing and single products for terminal output.

use crate::models::Product;
use crate::services::InventoryPage;

/// Format one inventory page as a table with a page footer
pub fn format_inventory_page(page: &InventoryPage) -> String {
    let mut output = String::new();

    if page.products.is_empty() {
        output.push_str("No products found.\n");
    } else {
        output.push_str(&format_product_table(&page.products));
    }

    output.push_str(&format!(
        "\nPage {} of {} ({} products)\n",
        page.page.page, page.page.total_pages, page.page.total_count
    ));

    if let Some(prev) = page.prev_query() {
        output.push_str(&format!("  prev: ?{}\n", prev.to_query_string()));
    }
    if let Some(next) = page.next_query() {
        output.push_str(&format!("  next: ?{}\n", next.to_query_string()));
    }

    output
}

/// Format products as a table
pub fn format_product_table(products: &[Product]) -> String {
    let name_width = products
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let sku_width = products
        .iter()
        .filter_map(|p| p.sku.as_ref().map(|s| s.chars().count()))
        .max()
        .unwrap_or(3)
        .max(3);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:<sku_width$}  {:>10}  {:>8}  {:>5}\n",
        "ID",
        "Name",
        "SKU",
        "Price",
        "Qty",
        "Low",
        name_width = name_width,
        sku_width = sku_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<sku_width$}  {:->10}  {:->8}  {:->5}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        sku_width = sku_width,
    ));

    for product in products {
        let low = if product.is_low_stock() { "!" } else { "" };
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:<sku_width$}  {:>10}  {:>8}  {:>5}\n",
            product.id.to_string(),
            product.name,
            product.sku.as_deref().unwrap_or("—"),
            product.price.to_string(),
            product.quantity,
            low,
            name_width = name_width,
            sku_width = sku_width,
        ));
    }

    output
}

/// Format a single product's details
pub fn format_product_details(product: &Product, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Product: {}\n", product.name));
    output.push_str(&format!("  ID:          {}\n", product.id.to_full_string()));
    output.push_str(&format!(
        "  SKU:         {}\n",
        product.sku.as_deref().unwrap_or("—")
    ));
    output.push_str(&format!("  Price:       {}\n", product.price));
    output.push_str(&format!("  Quantity:    {}\n", product.quantity));
    output.push_str(&format!("  Stock Value: {}\n", product.stock_value()));
    match product.low_stock_at {
        Some(threshold) => output.push_str(&format!(
            "  Low Stock:   below {}{}\n",
            threshold,
            if product.is_low_stock() { " (LOW)" } else { "" }
        )),
        None => output.push_str("  Low Stock:   —\n"),
    }
    output.push('\n');
    output.push_str(&format!(
        "  Created:     {}\n",
        product.created_at.format(date_format)
    ));
    output.push_str(&format!(
        "  Updated:     {}\n",
        product.updated_at.format(date_format)
    ));

    output
}
