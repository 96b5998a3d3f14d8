//! Service layer for Stockroom
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, scoping to the current user, and activity logging.

pub mod activity;
pub mod product;

pub use activity::{ActivityPage, ActivityService};
pub use product::{InventoryPage, ProductInput, ProductService, ProductUpdate};
