//! Stockroom - Terminal-based inventory manager
//!
//! This library provides the core functionality for the Stockroom inventory
//! application: products with prices and stock levels, an activity log that
//! records field-level changes, and paginated listings of both.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, path management and the current user
//! - `error`: Custom error types
//! - `models`: Core data models (products, money, IDs)
//! - `audit`: Change diffs and the activity entry format
//! - `pagination`: Cursor and offset pagination
//! - `query`: Query-string parsing for listings
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: The inventory dashboard
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use stockroom::config::{paths::StockroomPaths, settings::Settings};
//!
//! let paths = StockroomPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod pagination;
pub mod query;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::StockroomError;
