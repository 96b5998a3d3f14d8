//! Demo data
//!
//! Fills an installation with a predictable set of products so that the
//! listings and the dashboard have something to show.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::error::StockroomError;
use crate::models::{Money, Product, UserId};

use super::Storage;

/// Number of products created when no count is given
pub const DEFAULT_SEED_COUNT: usize = 25;

/// Low-stock threshold given to every demo product
pub const SEED_LOW_STOCK_AT: u32 = 5;

/// Create `count` demo products for `user_id`
///
/// Product N is created `5 * (N - 1)` days before `now`. Prices fall between
/// 10.00 and 99.99 and quantities between 0 and 19. No activity is recorded.
pub fn seed_demo_products(
    storage: &Storage,
    user_id: UserId,
    count: usize,
    now: DateTime<Utc>,
) -> Result<Vec<Product>, StockroomError> {
    let mut created = Vec::with_capacity(count);

    for i in 0..count {
        let n = i as i64 + 1;
        let mut product = Product::new(
            user_id,
            format!("Product {}", n),
            Money::from_cents(1000 + (n * 3719) % 9000),
            ((n * 7) % 20) as u32,
        );
        product.sku = Some(format!("SKU-{:04}", n));
        product.low_stock_at = Some(SEED_LOW_STOCK_AT);
        product.created_at = now - Duration::days(5 * i as i64);
        product.updated_at = product.created_at;

        storage.products.upsert(product.clone())?;
        created.push(product);
    }

    storage.products.save()?;
    info!(count, user = %user_id, "seeded demo products");

    Ok(created)
}
