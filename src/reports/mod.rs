//! Reports module for Stockroom
//!
//! Provides the dashboard: aggregate inventory metrics for one user.

pub mod dashboard;

pub use dashboard::{DashboardReport, StockBucket, StockLevel, WeeklyCount};
