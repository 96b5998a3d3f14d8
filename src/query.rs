//! Listing request parameters
//!
//! Inventory and activity listings are addressed by URL-style query strings
//! (`?q=widget&page=2`, `?action=UPDATE_PRODUCT&cursorId=...&dir=prev`).
//! Parsing is lenient: a malformed parameter is dropped or replaced by its
//! default, never an error.

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::warn;

use crate::audit::ActivityAction;
use crate::models::ActivityId;
use crate::pagination::Direction;

/// Characters escaped in rendered values; RFC 3986 unreserved marks stay literal
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Split a query string into decoded `(key, value)` pairs
///
/// A leading `?` is ignored, `+` decodes to a space and keys without `=`
/// get an empty value.
pub fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    let raw = raw.trim();
    let raw = raw.strip_prefix('?').unwrap_or(raw);

    raw.split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn encode(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, QUERY_VALUE).into()
}

/// Trimmed text, or `None` when nothing is left
fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn render(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parameters of the activity listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityQuery {
    pub action: Option<ActivityAction>,
    pub q: Option<String>,
    pub cursor_id: Option<ActivityId>,
    pub dir: Direction,
}

impl ActivityQuery {
    pub fn parse(raw: &str) -> Self {
        let mut query = Self::default();

        for (key, value) in parse_pairs(raw) {
            match key.as_str() {
                "action" => query.set_action(&value),
                "q" => query.q = non_empty(&value),
                "cursorId" => query.set_cursor_id(&value),
                "dir" => query.dir = Direction::from_param(Some(&value)),
                other => warn!(param = other, "ignoring unknown activity query parameter"),
            }
        }

        query
    }

    /// Set the action filter from a request value; unknown actions are ignored
    pub fn set_action(&mut self, raw: &str) {
        self.action = match non_empty(raw) {
            None => None,
            Some(value) => match value.parse::<ActivityAction>() {
                Ok(action) => Some(action),
                Err(e) => {
                    warn!(error = %e, "ignoring action filter");
                    None
                }
            },
        };
    }

    /// Set the cursor from a request value; unparseable ids count as absent
    pub fn set_cursor_id(&mut self, raw: &str) {
        self.cursor_id = match non_empty(raw) {
            None => None,
            Some(value) => match value.parse::<ActivityId>() {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!(cursor_id = %value, error = %e, "ignoring malformed cursor");
                    None
                }
            },
        };
    }

    /// The same filters, positioned at `cursor` moving in `dir`
    pub fn at(&self, cursor: ActivityId, dir: Direction) -> Self {
        Self {
            cursor_id: Some(cursor),
            dir,
            ..self.clone()
        }
    }

    /// Render as a query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(action) = self.action {
            pairs.push(("action", action.as_str().to_string()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(cursor) = self.cursor_id {
            pairs.push(("cursorId", cursor.to_full_string()));
            pairs.push(("dir", self.dir.as_param().to_string()));
        }
        render(&pairs)
    }
}

/// Parameters of the inventory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryQuery {
    pub q: Option<String>,
    /// 1-based page number
    pub page: i64,
}

impl Default for InventoryQuery {
    fn default() -> Self {
        Self { q: None, page: 1 }
    }
}

impl InventoryQuery {
    pub fn parse(raw: &str) -> Self {
        let mut query = Self::default();

        for (key, value) in parse_pairs(raw) {
            match key.as_str() {
                "q" => query.q = non_empty(&value),
                "page" => query.set_page(&value),
                other => warn!(param = other, "ignoring unknown inventory query parameter"),
            }
        }

        query
    }

    /// Set the page from a request value; unparseable values mean page 1
    pub fn set_page(&mut self, raw: &str) {
        self.page = match raw.trim().parse::<i64>() {
            Ok(page) => page.max(1),
            Err(_) => {
                if !raw.trim().is_empty() {
                    warn!(page = raw, "ignoring malformed page number");
                }
                1
            }
        };
    }

    /// The same search on another page
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: i64::try_from(page).unwrap_or(i64::MAX),
            ..self.clone()
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        pairs.push(("page", self.page.to_string()));
        render(&pairs)
    }
}
