//! Activity auditing for Stockroom
//!
//! Every product create, update and delete is recorded in an append-only
//! activity log. Updates carry a field-level change set.
//!
//! # Architecture
//!
//! - `Snapshot` / `FieldValue`: the audited fields of an entity at one point
//!   in time.
//! - `diff`: computes the `ChangeSet` between two snapshots.
//! - `ActivityEntry`: one logged action with its metadata.
//! - `ActivityLogger`: JSONL persistence for entries.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockroom::audit::{diff, ActivityEntry, ActivityLogger};
//!
//! let changes = diff(Some(&before.snapshot()), Some(&after.snapshot()));
//! let entry = ActivityEntry::product_updated(user.id, &after, changes);
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;
mod value;

pub use diff::{diff, ChangeSet, FieldChange, EXCLUDED_FIELDS, BLANK};
pub use entry::{ActivityAction, ActivityEntry, ActivityMeta, UnknownAction};
pub use logger::ActivityLogger;
pub use value::{FieldValue, Snapshot};
