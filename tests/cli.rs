//! End-to-end tests for the stockroom binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stockroom(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stockroom").unwrap();
    cmd.env("STOCKROOM_DATA_DIR", dir.path())
        .env("STOCKROOM_LOG", "error")
        .env_remove("STOCKROOM_USER");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    stockroom(&dir)
        .args(["init", "--user-name", "dana"])
        .assert()
        .success();
    dir
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).unwrap()
}

/// The query string after `label: ?` in a listing footer
fn link(output: &str, label: &str) -> Option<String> {
    let marker = format!("{}: ?", label);
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix(&marker).map(str::to_string))
}

#[test]
fn init_creates_user_and_config_shows_it() {
    let dir = initialized();

    stockroom(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("dana"))
        .stdout(predicate::str::contains("Inventory page size: 6"));
}

#[test]
fn product_commands_require_a_user() {
    let dir = TempDir::new().unwrap();

    stockroom(&dir)
        .args(["product", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user configured"));
}

#[test]
fn add_and_list_products() {
    let dir = initialized();

    stockroom(&dir)
        .args(["product", "add", "Widget", "--price", "10", "--quantity", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created product: Widget"));

    stockroom(&dir)
        .args(["product", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("$10.00"))
        .stdout(predicate::str::contains("Page 1 of 1 (1 products)"));
}

#[test]
fn invalid_price_is_rejected() {
    let dir = initialized();

    stockroom(&dir)
        .args(["product", "add", "Widget", "--price", "ten", "--quantity", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid price"));
}

#[test]
fn edit_records_field_changes_in_activity() {
    let dir = initialized();

    stockroom(&dir)
        .args(["product", "add", "Widget", "--price", "10", "--quantity", "5"])
        .assert()
        .success();

    stockroom(&dir)
        .args(["product", "edit", "widget", "--price", "12", "--sku", "W-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated product: Widget"));

    stockroom(&dir)
        .args(["activity", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget - update product [W-1]"))
        .stdout(predicate::str::contains("price: 10.00 → 12.00"))
        .stdout(predicate::str::contains("sku: — → W-1"))
        .stdout(predicate::str::contains("Widget - create product"));

    stockroom(&dir)
        .args(["activity", "list", "--action", "UPDATE_PRODUCT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("update product"))
        .stdout(predicate::str::contains("create product").not());
}

#[test]
fn edit_without_changes_logs_nothing() {
    let dir = initialized();

    stockroom(&dir)
        .args(["product", "add", "Widget", "--price", "10", "--quantity", "5"])
        .assert()
        .success();

    stockroom(&dir)
        .args(["product", "edit", "Widget", "--price", "10.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes to product"));

    stockroom(&dir)
        .args(["activity", "list", "--action", "update"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity found."));
}

#[test]
fn inventory_pages_link_to_each_other() {
    let dir = initialized();

    stockroom(&dir)
        .args(["seed", "--count", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 25 demo products."));

    let first = stdout_of(stockroom(&dir).args(["product", "list"]));
    assert!(first.contains("Page 1 of 5 (25 products)"));
    assert!(first.contains("Product 1 "));
    assert_eq!(link(&first, "prev"), None);
    assert_eq!(link(&first, "next").as_deref(), Some("page=2"));

    let last = stdout_of(stockroom(&dir).args(["product", "list", "--query", "page=5"]));
    assert!(last.contains("Page 5 of 5"));
    assert!(last.contains("Product 25"));
    assert_eq!(link(&last, "prev").as_deref(), Some("page=4"));
    assert_eq!(link(&last, "next"), None);

    let clamped = stdout_of(stockroom(&dir).args(["product", "list", "--page=-3"]));
    assert!(clamped.contains("Page 1 of 5"));

    let searched = stdout_of(stockroom(&dir).args(["product", "list", "--q", "product 2"]));
    assert!(searched.contains("Page 1 of 2 (7 products)"));
    assert_eq!(link(&searched, "next").as_deref(), Some("q=product%202&page=2"));
}

#[test]
fn activity_pages_link_to_each_other() {
    let dir = initialized();

    for i in 1..=7 {
        stockroom(&dir)
            .args(["product", "add", &format!("Row {}", i), "--price", "1", "--quantity", "1"])
            .assert()
            .success();
    }

    let first = stdout_of(stockroom(&dir).args(["activity", "list"]));
    assert!(first.contains("Row 7 - create product"));
    assert!(first.contains("Row 2 - create product"));
    assert!(!first.contains("Row 1 - create product"));
    assert_eq!(link(&first, "prev"), None);

    let next = link(&first, "next").unwrap();
    assert!(next.starts_with("cursorId="));
    assert!(next.ends_with("&dir=next"));

    let second = stdout_of(stockroom(&dir).args(["activity", "list", "--query", &next]));
    assert!(second.contains("Row 1 - create product"));
    assert!(!second.contains("Row 2 - create product"));
    assert_eq!(link(&second, "next"), None);

    let prev = link(&second, "prev").unwrap();
    assert!(prev.ends_with("&dir=prev"));

    let back = stdout_of(stockroom(&dir).args(["activity", "list", "--query", &prev]));
    assert!(back.contains("Row 7 - create product"));
    assert!(back.contains("Row 2 - create product"));
    assert_eq!(link(&back, "prev"), None);
    assert!(link(&back, "next").is_some());
}

#[test]
fn prev_without_cursor_shows_first_page() {
    let dir = initialized();

    for i in 1..=7 {
        stockroom(&dir)
            .args(["product", "add", &format!("Row {}", i), "--price", "1", "--quantity", "1"])
            .assert()
            .success();
    }

    let page = stdout_of(stockroom(&dir).args(["activity", "list", "--query", "dir=prev"]));
    assert!(page.contains("Row 7 - create product"));
    assert!(page.contains("Row 2 - create product"));
    assert!(!page.contains("Row 1 - create product"));
    assert_eq!(link(&page, "prev"), None);
    assert!(link(&page, "next").is_some());
}

#[test]
fn unknown_cursor_gives_empty_page() {
    let dir = initialized();

    stockroom(&dir)
        .args(["product", "add", "Widget", "--price", "1", "--quantity", "1"])
        .assert()
        .success();

    stockroom(&dir)
        .args([
            "activity",
            "list",
            "--cursor-id",
            "550e8400-e29b-41d4-a716-446655440000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity found."));
}

#[test]
fn dashboard_summarizes_inventory() {
    let dir = initialized();

    stockroom(&dir).args(["seed"]).assert().success();

    stockroom(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Products:"))
        .stdout(predicate::str::contains("25"))
        .stdout(predicate::str::contains("New Products per Week"));
}

#[test]
fn export_json_to_stdout() {
    let dir = initialized();

    stockroom(&dir)
        .args(["product", "add", "Widget", "--price", "2.50", "--quantity", "4"])
        .assert()
        .success();

    let output = stdout_of(stockroom(&dir).args(["export", "--format", "json"]));
    let export: serde_json::Value = serde_json::from_str(output.trim()).unwrap();

    assert_eq!(export["schema_version"], "1.0.0");
    assert_eq!(export["metadata"]["product_count"], 1);
    assert_eq!(export["metadata"]["activity_count"], 1);
    assert_eq!(export["products"][0]["name"], "Widget");
    assert_eq!(export["activity"][0]["action"], "CREATE_PRODUCT");
}

#[test]
fn export_csv_to_file() {
    let dir = initialized();
    let output = dir.path().join("products.csv");

    stockroom(&dir)
        .args(["product", "add", "Widget", "--price", "2.50", "--quantity", "4"])
        .assert()
        .success();

    stockroom(&dir)
        .args(["export", "--format", "csv", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported to:"));

    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("ID,Name,SKU,Price,Quantity"));
    assert!(csv.contains("Widget,,2.50,4"));
}

#[test]
fn user_override_isolates_data() {
    let dir = initialized();

    stockroom(&dir)
        .args(["product", "add", "Widget", "--price", "1", "--quantity", "1"])
        .assert()
        .success();

    stockroom(&dir)
        .args(["product", "list"])
        .env("STOCKROOM_USER", "550e8400-e29b-41d4-a716-446655440000")
        .assert()
        .success()
        .stdout(predicate::str::contains("No products found."))
        .stdout(predicate::str::contains("Page 1 of 1 (0 products)"));

    stockroom(&dir)
        .args(["product", "show", "Widget"])
        .args(["--user", "550e8400-e29b-41d4-a716-446655440000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product not found: Widget"));
}
