//! Display formatting for terminal output
//!
//! Formats products and activity as plain-text tables and detail views.

pub mod activity;
pub mod product;

pub use activity::{format_activity_entry, format_activity_page, format_change};
pub use product::{format_inventory_page, format_product_details, format_product_table};
