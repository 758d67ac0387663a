//! Descriptions for rows that differ

use crate::render::DiffReport;
use crate::table::{natural_key_cmp, Table};
use indexmap::IndexSet;
use serde::Serialize;

/// Default name of the description column
pub const DEFAULT_DESCRIPTION_COLUMN: &str = "Description";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub key: String,
    pub text: String,
}

/// Descriptions of differing keys, ordered by key
#[derive(Debug, Clone, Serialize)]
pub struct Descriptions {
    pub column: String,
    /// False when the description source has no such column
    pub column_found: bool,
    pub entries: Vec<Description>,
}

impl Descriptions {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|d| d.key == key)
            .map(|d| d.text.as_str())
    }
}

/// Look up `description_column` in `source` for every key of `report`.
///
/// Keys the source does not contain, and blank descriptions, are left out.
pub fn annotate(report: &DiffReport, source: &Table, description_column: &str) -> Descriptions {
    if !source.has_column(description_column) {
        log::debug!(
            "No '{}' column in '{}', skipping descriptions",
            description_column,
            source.source()
        );
        return Descriptions {
            column: description_column.to_string(),
            column_found: false,
            entries: Vec::new(),
        };
    }

    let keys: IndexSet<&str> = report.keys().collect();
    let mut entries: Vec<Description> = Vec::new();
    for key in keys {
        let Some(value) = source.get(key, description_column) else {
            continue;
        };
        let text = value.as_display();
        if text.trim().is_empty() {
            continue;
        }
        entries.push(Description {
            key: key.to_string(),
            text: text.to_string(),
        });
    }
    entries.sort_by(|a, b| natural_key_cmp(&a.key, &b.key));

    Descriptions {
        column: description_column.to_string(),
        column_found: true,
        entries,
    }
}
