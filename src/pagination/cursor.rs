//! Keyset (cursor) pagination
//!
//! Pages are windows over a collection totally ordered by
//! `(timestamp desc, id desc)`. Moving forward continues after the last item
//! shown; moving backward continues before the first one. Whether more items
//! exist is detected by over-fetching a single item.

use std::fmt;

/// Which way to move from the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Towards older items (`next`)
    #[default]
    Forward,
    /// Towards newer items (`prev`)
    Backward,
}

impl Direction {
    /// Parse a `dir` request parameter
    ///
    /// Only `prev` selects backward; anything else, including no value, is
    /// forward.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("prev") => Self::Backward,
            _ => Self::Forward,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Forward => "next",
            Self::Backward => "prev",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

/// Order in which a source is asked to yield items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// `(timestamp desc, id desc)`
    Canonical,
    /// `(timestamp asc, id asc)`
    Reversed,
}

/// A collection that can be read in either direction of its canonical order
pub trait OrderedSource {
    type Item;
    /// Identifies an item; used as the cursor
    type Key: Clone;
    /// Source-specific restriction on which items are visible
    type Filter;
    type Error;

    /// Return up to `limit` items matching `filter`, in `order`
    ///
    /// With a cursor, only items strictly after the cursor item in `order`
    /// are returned. A cursor that names no visible item yields nothing.
    fn fetch(
        &self,
        filter: &Self::Filter,
        order: SortOrder,
        after: Option<&Self::Key>,
        limit: usize,
    ) -> Result<Vec<Self::Item>, Self::Error>;

    /// The key of an item
    fn key_of(item: &Self::Item) -> Self::Key;
}

/// One page of results plus navigation state
#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow<T, K> {
    /// Items in canonical order
    pub items: Vec<T>,
    pub can_go_backward: bool,
    pub can_go_forward: bool,
    pub first_key: Option<K>,
    pub last_key: Option<K>,
}

impl<T, K> PageWindow<T, K> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Cursor for the previous page, when there is one
    pub fn prev_cursor(&self) -> Option<&K> {
        self.first_key.as_ref().filter(|_| self.can_go_backward)
    }

    /// Cursor for the next page, when there is one
    pub fn next_cursor(&self) -> Option<&K> {
        self.last_key.as_ref().filter(|_| self.can_go_forward)
    }
}

/// Computes page windows of a fixed size
#[derive(Debug, Clone, Copy)]
pub struct CursorPaginator {
    page_size: usize,
}

impl CursorPaginator {
    /// A page size of zero is treated as one
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch the window next to `cursor` in `direction`
    ///
    /// Without a cursor the direction is ignored and the first page is
    /// returned. The flags are asymmetric:
    /// a forward page can go back exactly when it was reached through a
    /// cursor, and a non-empty backward page can always go forward again
    /// (at least the cursor item lies that way).
    pub fn page<S: OrderedSource>(
        &self,
        source: &S,
        filter: &S::Filter,
        direction: Direction,
        cursor: Option<&S::Key>,
    ) -> Result<PageWindow<S::Item, S::Key>, S::Error> {
        let direction = if cursor.is_some() {
            direction
        } else {
            Direction::Forward
        };

        let order = match direction {
            Direction::Forward => SortOrder::Canonical,
            Direction::Backward => SortOrder::Reversed,
        };

        let mut items = source.fetch(filter, order, cursor, self.page_size + 1)?;
        let has_more = items.len() > self.page_size;

        // Keep the items nearest the cursor, then restore canonical order
        items.truncate(self.page_size);
        if direction == Direction::Backward {
            items.reverse();
        }

        let can_go_backward = match direction {
            Direction::Forward => cursor.is_some(),
            Direction::Backward => has_more,
        };
        let can_go_forward = match direction {
            Direction::Forward => has_more,
            Direction::Backward => !items.is_empty(),
        };

        Ok(PageWindow {
            first_key: items.first().map(S::key_of),
            last_key: items.last().map(S::key_of),
            items,
            can_go_backward,
            can_go_forward,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    /// Rows of `(timestamp, id)`
    struct Rows(Vec<(i64, u32)>);

    impl Rows {
        /// `count` rows, id i created at time i
        fn sequential(count: u32) -> Self {
            Self((1..=count).map(|i| (i64::from(i), i)).collect())
        }
    }

    impl OrderedSource for Rows {
        type Item = (i64, u32);
        type Key = u32;
        type Filter = ();
        type Error = Infallible;

        fn fetch(
            &self,
            _filter: &(),
            order: SortOrder,
            after: Option<&u32>,
            limit: usize,
        ) -> Result<Vec<(i64, u32)>, Infallible> {
            let mut rows = self.0.clone();
            rows.sort_by(|a, b| b.cmp(a));
            if order == SortOrder::Reversed {
                rows.reverse();
            }

            let start = match after {
                Some(key) => match rows.iter().position(|row| row.1 == *key) {
                    Some(pos) => pos + 1,
                    None => return Ok(Vec::new()),
                },
                None => 0,
            };

            Ok(rows.into_iter().skip(start).take(limit).collect())
        }

        fn key_of(item: &(i64, u32)) -> u32 {
            item.1
        }
    }

    fn ids<K>(window: &PageWindow<(i64, u32), K>) -> Vec<u32> {
        window.items.iter().map(|row| row.1).collect()
    }

    #[test]
    fn test_direction_from_param() {
        assert_eq!(Direction::from_param(Some("prev")), Direction::Backward);
        assert_eq!(Direction::from_param(Some("next")), Direction::Forward);
        assert_eq!(Direction::from_param(Some("sideways")), Direction::Forward);
        assert_eq!(Direction::from_param(None), Direction::Forward);
        assert_eq!(Direction::Backward.to_string(), "prev");
    }

    #[test]
    fn test_empty_collection() {
        let paginator = CursorPaginator::new(6);
        let window = paginator
            .page(&Rows(Vec::new()), &(), Direction::Forward, None)
            .unwrap();

        assert!(window.is_empty());
        assert!(!window.can_go_backward);
        assert!(!window.can_go_forward);
        assert!(window.first_key.is_none());
        assert!(window.last_key.is_none());
    }

    #[test]
    fn test_seven_rows_first_and_second_page() {
        let rows = Rows::sequential(7);
        let paginator = CursorPaginator::new(6);

        let first = paginator.page(&rows, &(), Direction::Forward, None).unwrap();
        assert_eq!(ids(&first), vec![7, 6, 5, 4, 3, 2]);
        assert!(first.can_go_forward);
        assert!(!first.can_go_backward);
        assert_eq!(first.next_cursor(), Some(&2));
        assert_eq!(first.prev_cursor(), None);

        let second = paginator
            .page(&rows, &(), Direction::Forward, first.last_key.as_ref())
            .unwrap();
        assert_eq!(ids(&second), vec![1]);
        assert!(!second.can_go_forward);
        assert!(second.can_go_backward);
    }

    #[test]
    fn test_backward_without_cursor_is_first_page() {
        let rows = Rows::sequential(7);
        let paginator = CursorPaginator::new(6);

        let window = paginator
            .page(&rows, &(), Direction::Backward, None)
            .unwrap();
        assert_eq!(ids(&window), vec![7, 6, 5, 4, 3, 2]);
        assert!(!window.can_go_backward);
        assert!(window.can_go_forward);
        assert_eq!(window.next_cursor(), Some(&2));
    }

    #[test]
    fn test_round_trip_restores_first_page() {
        let rows = Rows::sequential(15);
        let paginator = CursorPaginator::new(6);

        let p1 = paginator.page(&rows, &(), Direction::Forward, None).unwrap();
        let p2 = paginator
            .page(&rows, &(), Direction::Forward, p1.next_cursor())
            .unwrap();
        let back = paginator
            .page(&rows, &(), Direction::Backward, p2.prev_cursor())
            .unwrap();

        assert_eq!(back.items, p1.items);
        assert!(!back.can_go_backward);
        assert!(back.can_go_forward);
    }

    #[test]
    fn test_backward_window_is_adjacent_to_cursor() {
        // Three full pages: going back from the third lands on the second
        let rows = Rows::sequential(18);
        let paginator = CursorPaginator::new(6);

        let p1 = paginator.page(&rows, &(), Direction::Forward, None).unwrap();
        let p2 = paginator
            .page(&rows, &(), Direction::Forward, p1.next_cursor())
            .unwrap();
        let p3 = paginator
            .page(&rows, &(), Direction::Forward, p2.next_cursor())
            .unwrap();
        assert_eq!(ids(&p3), vec![6, 5, 4, 3, 2, 1]);

        let back = paginator
            .page(&rows, &(), Direction::Backward, p3.prev_cursor())
            .unwrap();
        assert_eq!(back.items, p2.items);
        assert!(back.can_go_backward);
        assert!(back.can_go_forward);
    }

    #[test]
    fn test_forward_flags_depend_only_on_cursor_and_overfetch() {
        let rows = Rows::sequential(6);
        let paginator = CursorPaginator::new(6);

        let exact = paginator.page(&rows, &(), Direction::Forward, None).unwrap();
        assert_eq!(exact.len(), 6);
        assert!(!exact.can_go_forward);

        let past_end = paginator
            .page(&rows, &(), Direction::Forward, Some(&1))
            .unwrap();
        assert!(past_end.is_empty());
        assert!(past_end.can_go_backward);
        assert!(!past_end.can_go_forward);
    }

    #[test]
    fn test_backward_page_can_always_go_forward_when_non_empty() {
        let rows = Rows::sequential(3);
        let paginator = CursorPaginator::new(6);

        let back = paginator
            .page(&rows, &(), Direction::Backward, Some(&1))
            .unwrap();
        assert_eq!(ids(&back), vec![3, 2]);
        assert!(!back.can_go_backward);
        assert!(back.can_go_forward);

        let nothing_newer = paginator
            .page(&rows, &(), Direction::Backward, Some(&3))
            .unwrap();
        assert!(nothing_newer.is_empty());
        assert!(!nothing_newer.can_go_forward);
        assert!(!nothing_newer.can_go_backward);
    }

    #[test]
    fn test_unknown_cursor_yields_empty_page() {
        let rows = Rows::sequential(4);
        let paginator = CursorPaginator::new(6);

        let window = paginator
            .page(&rows, &(), Direction::Forward, Some(&99))
            .unwrap();
        assert!(window.is_empty());
        assert!(!window.can_go_forward);
    }

    #[test]
    fn test_ties_broken_by_id() {
        let rows = Rows(vec![(10, 1), (10, 3), (10, 2), (5, 4)]);
        let paginator = CursorPaginator::new(2);

        let p1 = paginator.page(&rows, &(), Direction::Forward, None).unwrap();
        assert_eq!(ids(&p1), vec![3, 2]);

        let p2 = paginator
            .page(&rows, &(), Direction::Forward, p1.next_cursor())
            .unwrap();
        assert_eq!(ids(&p2), vec![1, 4]);
        assert!(!p2.can_go_forward);
    }

    #[test]
    fn test_zero_page_size_clamped() {
        let paginator = CursorPaginator::new(0);
        assert_eq!(paginator.page_size(), 1);

        let window = paginator
            .page(&Rows::sequential(2), &(), Direction::Forward, None)
            .unwrap();
        assert_eq!(ids(&window), vec![2]);
        assert!(window.can_go_forward);
    }
}
