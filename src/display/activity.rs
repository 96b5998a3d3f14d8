//! Activity display formatting

use crate::audit::{ActivityEntry, FieldChange, FieldValue, BLANK};
use crate::services::ActivityPage;

fn format_value(value: Option<&FieldValue>) -> String {
    match value {
        None | Some(FieldValue::Null) => BLANK.to_string(),
        Some(value) => value.to_string(),
    }
}

/// `field: from → to`
pub fn format_change(field: &str, change: &FieldChange) -> String {
    format!(
        "{}: {} → {}",
        field,
        format_value(change.from.as_ref()),
        format_value(change.to.as_ref())
    )
}

/// One entry: a headline followed by its changes, one per line
pub fn format_activity_entry(entry: &ActivityEntry, date_format: &str) -> String {
    let mut output = format!(
        "{}  {} - {} [{}]\n",
        entry.created_at.format(date_format),
        entry.name().unwrap_or("Product"),
        entry.action.label(),
        entry.sku().unwrap_or(BLANK)
    );

    if let Some(diff) = entry.diff() {
        for (field, change) in diff.iter() {
            output.push_str(&format!("    {}\n", format_change(field, change)));
        }
    }

    output
}

/// One activity page with navigation footer
pub fn format_activity_page(page: &ActivityPage, date_format: &str) -> String {
    let mut output = String::new();

    if page.entries().is_empty() {
        output.push_str("No activity found.\n");
    }
    for entry in page.entries() {
        output.push_str(&format_activity_entry(entry, date_format));
    }

    if let Some(prev) = page.prev_query() {
        output.push_str(&format!("\n  prev: ?{}\n", prev.to_query_string()));
    }
    if let Some(next) = page.next_query() {
        let lead = if page.prev_query().is_some() { "" } else { "\n" };
        output.push_str(&format!("{}  next: ?{}\n", lead, next.to_query_string()));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::diff;
    use crate::models::{Money, Product, UserId};

    #[test]
    fn test_format_change_blanks() {
        let change = FieldChange {
            from: None,
            to: Some(FieldValue::Text("W-1".into())),
        };
        assert_eq!(format_change("sku", &change), "sku: — → W-1");

        let change = FieldChange {
            from: Some(FieldValue::Integer(5)),
            to: Some(FieldValue::Null),
        };
        assert_eq!(format_change("lowStockAt", &change), "lowStockAt: 5 → —");
    }

    #[test]
    fn test_format_update_entry() {
        let before = Product::new(UserId::new(), "Widget", Money::from_cents(1000), 5);
        let mut after = before.clone();
        after.price = Money::from_cents(1200);

        let changes = diff(Some(&before.snapshot()), Some(&after.snapshot()));
        let entry = ActivityEntry::product_updated(after.user_id, &after, changes);

        let output = format_activity_entry(&entry, "%Y-%m-%d");
        assert!(output.contains("Widget - update product [—]"));
        assert!(output.contains("price: 10.00 → 12.00"));
    }
}
