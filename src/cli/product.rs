//! Product CLI commands
//!
//! Implements CLI commands for inventory management.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::config::user::CurrentUser;
use crate::display::product::{format_inventory_page, format_product_details};
use crate::error::{StockroomError, StockroomResult};
use crate::models::Money;
use crate::query::InventoryQuery;
use crate::services::{ProductInput, ProductService, ProductUpdate};
use crate::storage::Storage;

/// Product subcommands
#[derive(Subcommand)]
pub enum ProductCommands {
    /// Add a new product
    Add {
        /// Product name
        name: String,
        /// Unit price (e.g., "12.50" or "12")
        #[arg(short, long)]
        price: String,
        /// Units in stock
        #[arg(short, long)]
        quantity: u32,
        /// Stock keeping unit
        #[arg(short, long)]
        sku: Option<String>,
        /// Quantity at or below which the product counts as low stock
        #[arg(short, long)]
        low_stock: Option<u32>,
    },
    /// List products one page at a time, newest first
    List {
        /// Only products whose name contains this text
        #[arg(long)]
        q: Option<String>,
        /// Page number, starting at 1
        #[arg(long)]
        page: Option<String>,
        /// Raw query string such as "q=bolt&page=2", as printed by earlier listings
        #[arg(long, conflicts_with_all = ["q", "page"])]
        query: Option<String>,
    },
    /// Show product details
    Show {
        /// Product name or ID
        product: String,
    },
    /// Edit a product
    Edit {
        /// Product name or ID
        product: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New unit price
        #[arg(short, long)]
        price: Option<String>,
        /// New quantity
        #[arg(short, long)]
        quantity: Option<u32>,
        /// New SKU
        #[arg(short, long, conflicts_with = "clear_sku")]
        sku: Option<String>,
        /// New low-stock threshold
        #[arg(short, long, conflicts_with = "clear_low_stock")]
        low_stock: Option<u32>,
        /// Remove the SKU
        #[arg(long)]
        clear_sku: bool,
        /// Remove the low-stock threshold
        #[arg(long)]
        clear_low_stock: bool,
    },
    /// Delete a product
    Delete {
        /// Product name or ID
        product: String,
    },
}

fn parse_price(raw: &str) -> StockroomResult<Money> {
    Money::parse(raw).map_err(|e| {
        StockroomError::Validation(format!(
            "Invalid price: '{}'. Use format like '12.50' or '12'. Error: {}",
            raw, e
        ))
    })
}

/// Handle a product command
pub fn handle_product_command(
    storage: &Storage,
    settings: &Settings,
    user: &CurrentUser,
    cmd: ProductCommands,
) -> StockroomResult<()> {
    let service = ProductService::new(storage, user).with_page_size(settings.inventory_page_size);

    match cmd {
        ProductCommands::Add {
            name,
            price,
            quantity,
            sku,
            low_stock,
        } => {
            let input = ProductInput {
                sku,
                low_stock_at: low_stock,
                ..ProductInput::new(name, parse_price(&price)?, quantity)
            };
            let product = service.create(input)?;

            println!("Created product: {}", product.name);
            println!(
                "  Price: {}",
                product.price.format_with_symbol(&settings.currency_symbol)
            );
            println!("  Quantity: {}", product.quantity);
            println!("  ID: {}", product.id);
        }

        ProductCommands::List { q, page, query } => {
            let query = match query {
                Some(raw) => InventoryQuery::parse(&raw),
                None => {
                    let mut query = InventoryQuery {
                        q,
                        ..Default::default()
                    };
                    if let Some(page) = page {
                        query.set_page(&page);
                    }
                    query
                }
            };

            let page = service.list_page(&query)?;
            print!("{}", format_inventory_page(&page));
        }

        ProductCommands::Show { product } => {
            let found = service.require(&product)?;
            print!("{}", format_product_details(&found, &settings.date_format));
        }

        ProductCommands::Edit {
            product,
            name,
            price,
            quantity,
            sku,
            low_stock,
            clear_sku,
            clear_low_stock,
        } => {
            let found = service.require(&product)?;

            let update = ProductUpdate {
                name,
                sku: if clear_sku { Some(None) } else { sku.map(Some) },
                price: price.as_deref().map(parse_price).transpose()?,
                quantity,
                low_stock_at: if clear_low_stock {
                    Some(None)
                } else {
                    low_stock.map(Some)
                },
            };

            if update.is_empty() {
                println!("No changes specified. Use --help to see the editable fields.");
                return Ok(());
            }

            let updated = service.update(found.id, &update)?;
            if updated.updated_at == found.updated_at {
                println!("No changes to product: {}", updated.name);
            } else {
                println!("Updated product: {}", updated.name);
            }
        }

        ProductCommands::Delete { product } => {
            let found = service.require(&product)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted product: {}", deleted.name);
        }
    }

    Ok(())
}
