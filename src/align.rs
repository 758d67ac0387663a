//! Outer join of two tables on their key columns

use crate::table::{CellValue, Table};
use indexmap::{IndexMap, IndexSet};

/// One side of an aligned pair
#[derive(Debug, Clone)]
pub struct AlignedTable {
    source: String,
    columns: Vec<String>,
    rows: IndexMap<String, Vec<CellValue>>,
}

impl AlignedTable {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, key: &str) -> Option<&[CellValue]> {
        self.rows.get(key).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[CellValue])> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Two tables with identical key order and column order
#[derive(Debug, Clone)]
pub struct AlignedPair {
    key_column: String,
    first: AlignedTable,
    second: AlignedTable,
}

impl AlignedPair {
    /// Name of the identifier column, taken from the first table
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    pub fn columns(&self) -> &[String] {
        &self.first.columns
    }

    pub fn first(&self) -> &AlignedTable {
        &self.first
    }

    pub fn second(&self) -> &AlignedTable {
        &self.second
    }

    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }
}

/// Align `first` and `second` on their keys.
///
/// With no (or an empty) column selection the columns shared by both tables
/// are compared, in `first`'s order. A selected column that one side lacks
/// is filled with [`CellValue::Missing`] on that side. Keys keep `first`'s
/// order, followed by keys only found in `second` in `second`'s order.
pub fn align(first: &Table, second: &Table, columns_to_compare: Option<&[String]>) -> AlignedPair {
    let columns = resolve_columns(first, second, columns_to_compare);

    let mut keys: IndexSet<&str> = first.keys().collect();
    keys.extend(second.keys());

    log::debug!(
        "Aligned '{}' ({} rows) with '{}' ({} rows): {} keys, {} columns",
        first.source(),
        first.len(),
        second.source(),
        second.len(),
        keys.len(),
        columns.len()
    );

    AlignedPair {
        key_column: first.key_column().to_string(),
        first: project(first, &keys, &columns),
        second: project(second, &keys, &columns),
    }
}

fn resolve_columns(first: &Table, second: &Table, requested: Option<&[String]>) -> Vec<String> {
    match requested {
        Some(requested) if !requested.is_empty() => {
            let is_key = |name: &str| {
                (name == first.key_column() || name == second.key_column())
                    && !first.has_column(name)
                    && !second.has_column(name)
            };
            let selected: IndexSet<&String> = requested.iter().collect();
            selected
                .into_iter()
                .filter(|name| {
                    if is_key(name) {
                        log::info!("'{}' is the identifier column and is not compared", name);
                        return false;
                    }
                    true
                })
                .cloned()
                .collect()
        }
        _ => {
            for name in first.columns().iter().filter(|c| !second.has_column(c)) {
                log::info!("Column '{}' only in '{}', not compared", name, first.source());
            }
            for name in second.columns().iter().filter(|c| !first.has_column(c)) {
                log::info!("Column '{}' only in '{}', not compared", name, second.source());
            }
            first
                .columns()
                .iter()
                .filter(|c| second.has_column(c))
                .cloned()
                .collect()
        }
    }
}

fn project(table: &Table, keys: &IndexSet<&str>, columns: &[String]) -> AlignedTable {
    let indices: Vec<Option<usize>> = columns.iter().map(|c| table.column_index(c)).collect();

    let rows = keys
        .iter()
        .map(|key| {
            let cells = match table.row(key) {
                Some(row) => indices
                    .iter()
                    .map(|idx| idx.map_or(CellValue::Missing, |i| row[i].clone()))
                    .collect(),
                None => vec![CellValue::Missing; columns.len()],
            };
            (key.to_string(), cells)
        })
        .collect();

    AlignedTable {
        source: table.source().to_string(),
        columns: columns.to_vec(),
        rows,
    }
}
