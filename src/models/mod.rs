//! Core data models for Stockroom
//!
//! This module contains the data structures that represent the inventory
//! domain: products, their prices, and the strongly-typed IDs that tie
//! products and activity entries to their owners.

pub mod ids;
pub mod money;
pub mod product;

pub use ids::{ActivityId, ProductId, UserId};
pub use money::Money;
pub use product::{Product, ProductValidationError};
