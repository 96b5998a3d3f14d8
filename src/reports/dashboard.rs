//! Dashboard Report
//!
//! Aggregate inventory metrics for one user: totals, stock levels, low-stock
//! items, weekly additions and recent activity.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::audit::ActivityEntry;
use crate::config::user::CurrentUser;
use crate::error::StockroomResult;
use crate::models::{Money, Product};
use crate::services::{ActivityService, ProductService};
use crate::storage::Storage;

/// Products with more units than this are comfortably in stock
pub const IN_STOCK_ABOVE: u32 = 5;

/// Number of weekly buckets on the dashboard
pub const WEEKS: usize = 12;

/// Number of low-stock items listed
pub const LOW_STOCK_LIMIT: usize = 5;

/// Number of recent products and activity entries listed
pub const RECENT_LIMIT: usize = 6;

/// Coarse stock status of one product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Out,
    Low,
    InStock,
}

impl StockLevel {
    /// Out at zero, low up to the product's threshold (5 when unset)
    pub fn of(product: &Product) -> Self {
        let threshold = product.low_stock_at.unwrap_or(IN_STOCK_ABOVE);
        if product.quantity == 0 {
            Self::Out
        } else if product.quantity <= threshold {
            Self::Low
        } else {
            Self::InStock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Out => "out",
            Self::Low => "low",
            Self::InStock => "ok",
        }
    }
}

/// Count and rounded share of products in one stock bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockBucket {
    pub count: usize,
    /// Whole percent of all products, 0 when there are none
    pub percentage: u32,
}

impl StockBucket {
    fn new(count: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            (count as f64 * 100.0 / total as f64).round() as u32
        };
        Self { count, percentage }
    }
}

/// Products created in one calendar week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyCount {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `MM/DD` of the week start
    pub label: String,
    pub products: usize,
}

/// Dashboard Report
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub total_products: usize,
    /// Sum of price times quantity
    pub total_value: Money,
    /// Products with a threshold and fewer units than it
    pub low_stock_count: usize,
    /// Up to five low-stock products, fewest units first
    pub low_stock_items: Vec<Product>,
    /// More than five units
    pub in_stock: StockBucket,
    /// One to five units
    pub low: StockBucket,
    /// No units
    pub out_of_stock: StockBucket,
    /// Oldest week first
    pub weekly: Vec<WeeklyCount>,
    pub recent_products: Vec<Product>,
    pub recent_activity: Vec<ActivityEntry>,
}

impl DashboardReport {
    /// Generate the dashboard for `user` as of `now`
    pub fn generate(
        storage: &Storage,
        user: &CurrentUser,
        now: DateTime<Utc>,
    ) -> StockroomResult<Self> {
        let products = ProductService::new(storage, user).list()?;
        let recent_activity = ActivityService::new(storage, user).recent(RECENT_LIMIT)?;

        let total_products = products.len();
        let total_value: Money = products.iter().map(Product::stock_value).sum();

        let mut low_stock_items: Vec<Product> =
            products.iter().filter(|p| p.is_low_stock()).cloned().collect();
        let low_stock_count = low_stock_items.len();
        low_stock_items.sort_by_key(|p| p.quantity);
        low_stock_items.truncate(LOW_STOCK_LIMIT);

        let in_stock = products.iter().filter(|p| p.quantity > IN_STOCK_ABOVE).count();
        let out_of_stock = products.iter().filter(|p| p.quantity == 0).count();
        let low = total_products - in_stock - out_of_stock;

        Ok(Self {
            generated_at: now,
            total_products,
            total_value,
            low_stock_count,
            low_stock_items,
            in_stock: StockBucket::new(in_stock, total_products),
            low: StockBucket::new(low, total_products),
            out_of_stock: StockBucket::new(out_of_stock, total_products),
            weekly: weekly_counts(&products, now),
            recent_products: products.into_iter().take(RECENT_LIMIT).collect(),
            recent_activity,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Dashboard\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str(&format!("Total Products:  {:>12}\n", self.total_products));
        output.push_str(&format!("Total Value:     {:>12}\n", self.total_value));
        output.push_str(&format!("Low Stock:       {:>12}\n", self.low_stock_count));
        output.push('\n');

        output.push_str("Stock Levels\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for (label, bucket) in [
            ("In stock (>5)", self.in_stock),
            ("Low (1-5)", self.low),
            ("Out of stock", self.out_of_stock),
        ] {
            output.push_str(&format!(
                "{:<20} {:>6} {:>5}%\n",
                label, bucket.count, bucket.percentage
            ));
        }
        output.push('\n');

        output.push_str("Low-stock\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.low_stock_items.is_empty() {
            output.push_str("All good, nothing below threshold.\n");
        }
        for item in &self.low_stock_items {
            output.push_str(&format!(
                "{:<36} Qty {:>4}  Min {:>4}\n",
                truncate(&item.name, 36),
                item.quantity,
                item.low_stock_at.unwrap_or_default()
            ));
        }
        output.push('\n');

        output.push_str("New Products per Week\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for week in &self.weekly {
            output.push_str(&format!(
                "{}  {:>4}  {}\n",
                week.label,
                week.products,
                "#".repeat(week.products.min(40))
            ));
        }
        output.push('\n');

        output.push_str("Recent Products\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for product in &self.recent_products {
            output.push_str(&format!(
                "[{:<3}] {:<40} {:>6} units\n",
                StockLevel::of(product).label(),
                truncate(&product.name, 40),
                product.quantity
            ));
        }
        output.push('\n');

        output.push_str("Recent Activity\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for entry in &self.recent_activity {
            output.push_str(&format!(
                "{} {} - {} ({})\n",
                entry.created_at.format("%Y-%m-%d %H:%M"),
                entry.name().unwrap_or("Product"),
                entry.action.label(),
                entry.sku().unwrap_or("—")
            ));
        }

        output
    }
}

/// Weekly creation counts for the `WEEKS` weeks ending with the one starting today
fn weekly_counts(products: &[Product], now: DateTime<Utc>) -> Vec<WeeklyCount> {
    (0..WEEKS)
        .rev()
        .map(|weeks_ago| {
            let day = (now - Duration::days(7 * weeks_ago as i64)).date_naive();
            let start = day.and_time(NaiveTime::MIN).and_utc();
            let end = start + Duration::days(7) - Duration::milliseconds(1);

            WeeklyCount {
                start,
                end,
                label: start.format("%m/%d").to_string(),
                products: products
                    .iter()
                    .filter(|p| p.created_at >= start && p.created_at <= end)
                    .count(),
            }
        })
        .collect()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
