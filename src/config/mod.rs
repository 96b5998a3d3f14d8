//! Configuration module for Stockroom
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Resolution of the current user

pub mod paths;
pub mod settings;
pub mod user;

pub use paths::StockroomPaths;
pub use settings::Settings;
pub use user::CurrentUser;
