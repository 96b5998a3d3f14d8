//! Activity repository
//!
//! Keeps the activity log in memory for querying and appends new entries
//! through the JSONL logger.

use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::audit::{ActivityAction, ActivityEntry, ActivityLogger};
use crate::error::StockroomError;
use crate::models::{ActivityId, UserId};
use crate::pagination::{OrderedSource, SortOrder};

/// Which entries an activity listing covers
#[derive(Debug, Clone)]
pub struct ActivityFilter {
    /// Only entries recorded for this user
    pub user_id: UserId,
    pub action: Option<ActivityAction>,
    /// Case-insensitive substring of the product name or SKU
    pub q: Option<String>,
}

impl ActivityFilter {
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            action: None,
            q: None,
        }
    }

    fn matches(&self, entry: &ActivityEntry) -> bool {
        entry.user_id == self.user_id
            && self.action.map_or(true, |action| entry.action == action)
            && self.q.as_deref().map_or(true, |q| entry.matches_text(q))
    }
}

/// Canonical activity order: newest first, ties broken by id descending
fn canonical(a: &ActivityEntry, b: &ActivityEntry) -> Ordering {
    b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
}

/// Repository for activity entries
pub struct ActivityRepository {
    logger: ActivityLogger,
    entries: RwLock<Vec<ActivityEntry>>,
}

impl ActivityRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            logger: ActivityLogger::new(path),
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Load the log from disk
    pub fn load(&self) -> Result<(), StockroomError> {
        let loaded = self.logger.read_all()?;

        let mut entries = self.entries.write().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        debug!(count = loaded.len(), path = %self.logger.path().display(), "loaded activity");
        *entries = loaded;
        Ok(())
    }

    /// Persist an entry and make it visible to queries
    pub fn append(&self, entry: ActivityEntry) -> Result<(), StockroomError> {
        let mut entries = self.entries.write().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        self.logger.log(&entry)?;
        entries.push(entry);
        Ok(())
    }

    /// The newest `limit` entries matching `filter`
    pub fn recent(
        &self,
        filter: &ActivityFilter,
        limit: usize,
    ) -> Result<Vec<ActivityEntry>, StockroomError> {
        self.fetch(filter, SortOrder::Canonical, None, limit)
    }

    /// Count entries matching `filter`
    pub fn count_matching(&self, filter: &ActivityFilter) -> Result<usize, StockroomError> {
        let entries = self.entries.read().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.iter().filter(|e| filter.matches(e)).count())
    }

    /// All entries matching `filter`, newest first
    pub fn list(&self, filter: &ActivityFilter) -> Result<Vec<ActivityEntry>, StockroomError> {
        self.fetch(filter, SortOrder::Canonical, None, usize::MAX)
    }

    pub fn count(&self) -> Result<usize, StockroomError> {
        let entries = self.entries.read().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.len())
    }
}

impl OrderedSource for ActivityRepository {
    type Item = ActivityEntry;
    type Key = ActivityId;
    type Filter = ActivityFilter;
    type Error = StockroomError;

    /// The cursor is located among all of the user's entries, so a page can
    /// continue from an entry that the current filter would hide.
    fn fetch(
        &self,
        filter: &ActivityFilter,
        order: SortOrder,
        after: Option<&ActivityId>,
        limit: usize,
    ) -> Result<Vec<ActivityEntry>, StockroomError> {
        let entries = self.entries.read().map_err(|e| {
            StockroomError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let in_order = |a: &ActivityEntry, b: &ActivityEntry| match order {
            SortOrder::Canonical => canonical(a, b),
            SortOrder::Reversed => canonical(b, a),
        };

        let cursor = match after {
            Some(id) => match entries
                .iter()
                .find(|e| e.id == *id && e.user_id == filter.user_id)
            {
                Some(entry) => Some(entry),
                None => {
                    debug!(cursor = %id, "cursor names no visible entry");
                    return Ok(Vec::new());
                }
            },
            None => None,
        };

        let mut matching: Vec<&ActivityEntry> = entries
            .iter()
            .filter(|e| filter.matches(e))
            .filter(|e| cursor.map_or(true, |c| in_order(c, *e) == Ordering::Less))
            .collect();
        matching.sort_by(|a, b| in_order(*a, *b));

        Ok(matching.into_iter().take(limit).cloned().collect())
    }

    fn key_of(item: &ActivityEntry) -> ActivityId {
        item.id
    }
}
