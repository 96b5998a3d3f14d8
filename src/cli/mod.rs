//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod activity;
pub mod dashboard;
pub mod export;
pub mod product;

pub use activity::{handle_activity_command, ActivityCommands};
pub use dashboard::handle_dashboard_command;
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use product::{handle_product_command, ProductCommands};
