//! Pagination for listings
//!
//! - [`OffsetPage`]: numbered pages over a counted collection (inventory).
//! - [`CursorPaginator`]: bidirectional keyset windows over an
//!   [`OrderedSource`] (activity).
//!
//! Both are pure: they never touch storage themselves.

mod cursor;
mod offset;

pub use cursor::{CursorPaginator, Direction, OrderedSource, PageWindow, SortOrder};
pub use offset::OffsetPage;
