//! Activity service
//!
//! Browses the current user's activity log with cursor pagination.

use crate::audit::ActivityEntry;
use crate::config::user::CurrentUser;
use crate::error::StockroomResult;
use crate::models::ActivityId;
use crate::pagination::{CursorPaginator, Direction, PageWindow};
use crate::query::ActivityQuery;
use crate::storage::{ActivityFilter, Storage};

/// Default number of entries per activity page
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// One page of the activity listing
#[derive(Debug, Clone)]
pub struct ActivityPage {
    pub window: PageWindow<ActivityEntry, ActivityId>,
    pub query: ActivityQuery,
}

impl ActivityPage {
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.window.items
    }

    /// Query for the newer neighbouring page, if there is one
    pub fn prev_query(&self) -> Option<ActivityQuery> {
        self.window
            .prev_cursor()
            .map(|cursor| self.query.at(*cursor, Direction::Backward))
    }

    /// Query for the older neighbouring page, if there is one
    pub fn next_query(&self) -> Option<ActivityQuery> {
        self.window
            .next_cursor()
            .map(|cursor| self.query.at(*cursor, Direction::Forward))
    }
}

/// Service for browsing activity
pub struct ActivityService<'a> {
    storage: &'a Storage,
    user: &'a CurrentUser,
    paginator: CursorPaginator,
}

impl<'a> ActivityService<'a> {
    pub fn new(storage: &'a Storage, user: &'a CurrentUser) -> Self {
        Self {
            storage,
            user,
            paginator: CursorPaginator::new(DEFAULT_PAGE_SIZE),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.paginator = CursorPaginator::new(page_size);
        self
    }

    fn filter(&self, query: &ActivityQuery) -> ActivityFilter {
        ActivityFilter {
            user_id: self.user.id,
            action: query.action,
            q: query.q.clone(),
        }
    }

    /// The page of activity addressed by `query`
    pub fn page(&self, query: &ActivityQuery) -> StockroomResult<ActivityPage> {
        let window = self.paginator.page(
            &self.storage.activity,
            &self.filter(query),
            query.dir,
            query.cursor_id.as_ref(),
        )?;

        Ok(ActivityPage {
            window,
            query: query.clone(),
        })
    }

    /// The newest `limit` entries
    pub fn recent(&self, limit: usize) -> StockroomResult<Vec<ActivityEntry>> {
        self.storage
            .activity
            .recent(&ActivityFilter::for_user(self.user.id), limit)
    }

    /// Every entry matching the query's filters, newest first
    pub fn all(&self, query: &ActivityQuery) -> StockroomResult<Vec<ActivityEntry>> {
        self.storage.activity.list(&self.filter(query))
    }
}
