//! Cell-by-cell classification of an aligned pair

use crate::align::AlignedPair;
use crate::table::CellValue;
use indexmap::IndexMap;
use serde::Serialize;

/// Outcome of comparing one (key, column) position
#[derive(Debug, Clone, PartialEq)]
pub enum DiffCell {
    Unchanged,
    Changed { first: CellValue, second: CellValue },
    /// Missing from the first table, present in the second
    AddedInSecond(CellValue),
    /// Present in the first table, missing from the second
    RemovedFromFirst(CellValue),
}

impl DiffCell {
    pub fn classify(first: &CellValue, second: &CellValue) -> Self {
        match (first.is_missing(), second.is_missing()) {
            (true, true) => Self::Unchanged,
            (true, false) => Self::AddedInSecond(second.clone()),
            (false, true) => Self::RemovedFromFirst(first.clone()),
            (false, false) if first == second => Self::Unchanged,
            (false, false) => Self::Changed {
                first: first.clone(),
                second: second.clone(),
            },
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// Classified cells for every key and column of an aligned pair
#[derive(Debug, Clone)]
pub struct DiffGrid {
    key_column: String,
    columns: Vec<String>,
    rows: IndexMap<String, Vec<DiffCell>>,
}

impl DiffGrid {
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[DiffCell])> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn row(&self, key: &str) -> Option<&[DiffCell]> {
        self.rows.get(key).map(Vec::as_slice)
    }

    pub fn get(&self, key: &str, column: &str) -> Option<&DiffCell> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(key).map(|row| &row[idx])
    }

    /// True if no position differs
    pub fn is_identical(&self) -> bool {
        self.rows.values().flatten().all(DiffCell::is_unchanged)
    }

    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary {
            rows_compared: self.rows.len(),
            ..DiffSummary::default()
        };
        for cells in self.rows.values() {
            if cells.iter().any(|c| !c.is_unchanged()) {
                summary.rows_with_differences += 1;
            }
            for cell in cells {
                match cell {
                    DiffCell::Unchanged => {}
                    DiffCell::Changed { .. } => summary.changed += 1,
                    DiffCell::AddedInSecond(_) => summary.added += 1,
                    DiffCell::RemovedFromFirst(_) => summary.removed += 1,
                }
            }
        }
        summary
    }
}

/// Counts of differing rows and cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub rows_compared: usize,
    pub rows_with_differences: usize,
    pub changed: usize,
    pub added: usize,
    pub removed: usize,
}

impl DiffSummary {
    pub fn has_changes(&self) -> bool {
        self.rows_with_differences > 0
    }
}

/// Classify every cell of an aligned pair
pub fn diff(pair: &AlignedPair) -> DiffGrid {
    let rows = pair
        .first()
        .rows()
        .zip(pair.second().rows())
        .map(|((key, first), (_, second))| {
            let cells = first
                .iter()
                .zip(second)
                .map(|(a, b)| DiffCell::classify(a, b))
                .collect();
            (key.to_string(), cells)
        })
        .collect();

    DiffGrid {
        key_column: pair.key_column().to_string(),
        columns: pair.columns().to_vec(),
        rows,
    }
}
