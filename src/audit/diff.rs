//! Field-level change sets for audit logging
//!
//! [`diff`] compares two snapshots of the same entity and reports only the
//! fields whose canonical values differ. Identity and bookkeeping fields are
//! never reported.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

use super::value::{FieldValue, Snapshot};

/// Fields that never appear in a change set
pub const EXCLUDED_FIELDS: [&str; 4] = ["id", "userId", "createdAt", "updatedAt"];

/// Rendering of an absent or null side in human-readable output
pub const BLANK: &str = "—";

/// The before/after values of one changed field
///
/// `None` means the field was absent on that side, which is distinct from an
/// explicit null. Absent sides are omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub from: Option<FieldValue>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub to: Option<FieldValue>,
}

/// A present key always yields `Some`, even when its value is null
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<FieldValue>, D::Error> {
    FieldValue::deserialize(deserializer).map(Some)
}

/// Mapping of field name to change, for changed fields only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet(BTreeMap<String, FieldChange>);

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&FieldChange> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldChange)> {
        self.0.iter().map(|(field, change)| (field.as_str(), change))
    }

    /// One-line summary such as `price: 10.00 -> 12.00, quantity: 5 -> 4`
    pub fn summary(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let parts: Vec<String> = self
            .iter()
            .map(|(field, change)| {
                format!(
                    "{}: {} -> {}",
                    field,
                    format_side(change.from.as_ref()),
                    format_side(change.to.as_ref())
                )
            })
            .collect();

        Some(parts.join(", "))
    }
}

/// Compute the change set between two snapshots
///
/// A missing snapshot is treated as empty. Values are compared in canonical
/// form and the canonical values are what gets recorded.
pub fn diff(before: Option<&Snapshot>, after: Option<&Snapshot>) -> ChangeSet {
    let empty = Snapshot::new();
    let before = before.unwrap_or(&empty);
    let after = after.unwrap_or(&empty);

    let fields: BTreeSet<&str> = before.keys().chain(after.keys()).collect();

    let mut changes = BTreeMap::new();
    for field in fields {
        if EXCLUDED_FIELDS.contains(&field) {
            continue;
        }

        let from = before.get(field).map(FieldValue::canonical);
        let to = after.get(field).map(FieldValue::canonical);

        if from != to {
            changes.insert(field.to_string(), FieldChange { from, to });
        }
    }

    ChangeSet(changes)
}

fn format_side(value: Option<&FieldValue>) -> String {
    match value {
        None | Some(FieldValue::Null) => BLANK.to_string(),
        Some(FieldValue::Text(s)) => {
            // Truncate long strings
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Some(other) => other.to_string(),
    }
}
