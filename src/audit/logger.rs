//! Append-only activity log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{StockroomError, StockroomResult};

use super::entry::ActivityEntry;

/// Writes activity entries to a line-delimited JSON (JSONL) file
pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry to the log and flush it
    pub fn log(&self, entry: &ActivityEntry) -> StockroomResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries, flushing once at the end
    pub fn log_batch(&self, entries: &[ActivityEntry]) -> StockroomResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StockroomError::Io(format!("Failed to create log directory: {}", e))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| StockroomError::Io(format!("Failed to open activity log: {}", e)))?;

        for entry in entries {
            let json = serde_json::to_string(entry).map_err(|e| {
                StockroomError::Json(format!("Failed to serialize activity entry: {}", e))
            })?;

            writeln!(file, "{}", json).map_err(|e| {
                StockroomError::Io(format!("Failed to write activity entry: {}", e))
            })?;
        }

        file.flush()
            .map_err(|e| StockroomError::Io(format!("Failed to flush activity log: {}", e)))?;

        Ok(())
    }

    /// Read every entry in file order (oldest first)
    pub fn read_all(&self) -> StockroomResult<Vec<ActivityEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| StockroomError::Io(format!("Failed to open activity log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                StockroomError::Io(format!(
                    "Failed to read activity log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: ActivityEntry = serde_json::from_str(&line).map_err(|e| {
                StockroomError::Json(format!(
                    "Failed to parse activity entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::ActivityAction;
    use crate::models::{Money, Product, UserId};
    use tempfile::TempDir;

    fn create_test_logger() -> (ActivityLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = ActivityLogger::new(temp_dir.path().join("data").join("activity.jsonl"));
        (logger, temp_dir)
    }

    fn created(name: &str) -> ActivityEntry {
        let product = Product::new(UserId::new(), name, Money::from_cents(100), 1);
        ActivityEntry::product_created(product.user_id, &product)
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        let entry = created("Widget");

        logger.log(&entry).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries, vec![entry]);
        assert_eq!(entries[0].action, ActivityAction::CreateProduct);
    }

    #[test]
    fn test_entries_kept_in_append_order() {
        let (logger, _temp) = create_test_logger();

        for i in 0..5 {
            logger.log(&created(&format!("Product {}", i))).unwrap();
        }

        let names: Vec<String> = logger
            .read_all()
            .unwrap()
            .iter()
            .filter_map(|e| e.name().map(str::to_string))
            .collect();
        assert_eq!(
            names,
            vec!["Product 0", "Product 1", "Product 2", "Product 3", "Product 4"]
        );
    }

    #[test]
    fn test_log_batch() {
        let (logger, _temp) = create_test_logger();
        let entries: Vec<ActivityEntry> = (0..3).map(|i| created(&i.to_string())).collect();

        logger.log_batch(&entries).unwrap();
        logger.log_batch(&[]).unwrap();

        assert_eq!(logger.read_all().unwrap().len(), 3);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();

        assert!(!logger.exists());
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let (logger, _temp) = create_test_logger();
        logger.log(&created("Widget")).unwrap();

        let mut file = OpenOptions::new().append(true).open(logger.path()).unwrap();
        writeln!(file).unwrap();

        assert_eq!(logger.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_line_reports_position() {
        let (logger, _temp) = create_test_logger();
        logger.log(&created("Widget")).unwrap();

        let mut file = OpenOptions::new().append(true).open(logger.path()).unwrap();
        writeln!(file, "{{not json").unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger.log(&created("Widget")).unwrap();

        let reopened = ActivityLogger::new(temp.path().join("data").join("activity.jsonl"));
        assert_eq!(reopened.read_all().unwrap().len(), 1);
    }
}
