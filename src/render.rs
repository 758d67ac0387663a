//! Textual rendering of a diff grid into the combined report

use crate::diff::{DiffCell, DiffGrid};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Short environment label for an input identifier (usually a file name)
pub fn derive_label(identifier: &str) -> String {
    let upper = identifier.to_uppercase();
    if upper.contains("PROD") {
        "PROD".to_string()
    } else if upper.contains("QA") {
        "QA".to_string()
    } else {
        "UNKNOWN".to_string()
    }
}

/// One surviving row of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    pub key: String,
    /// One entry per report column, empty where nothing differs
    pub cells: Vec<String>,
}

impl DiffRow {
    pub fn has_differences(&self) -> bool {
        self.cells.iter().any(|c| !c.is_empty())
    }
}

/// The combined-values report: key column first, then the compared columns
#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    pub key_column: String,
    pub columns: Vec<String>,
    pub rows: Vec<DiffRow>,
}

impl DiffReport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.key.as_str())
    }

    pub fn row(&self, key: &str) -> Option<&DiffRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Rendered text for a (key, column) position
    pub fn cell(&self, key: &str, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.row(key).map(|r| r.cells[idx].as_str())
    }

    /// Write the report as CSV with a header line
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(std::iter::once(&self.key_column).chain(&self.columns))?;
        for row in &self.rows {
            csv_writer.write_record(std::iter::once(&row.key).chain(&row.cells))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn save_csv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(path)?;
        self.write_csv(std::io::BufWriter::new(file))
    }
}

/// Formats classified cells with the two source labels
#[derive(Debug, Clone)]
pub struct Renderer {
    first_label: String,
    second_label: String,
}

impl Renderer {
    pub fn new(first_label: impl Into<String>, second_label: impl Into<String>) -> Self {
        Self {
            first_label: first_label.into(),
            second_label: second_label.into(),
        }
    }

    /// Renderer labelled from the two input identifiers
    pub fn from_identifiers(first: &str, second: &str) -> Self {
        Self::new(derive_label(first), derive_label(second))
    }

    pub fn first_label(&self) -> &str {
        &self.first_label
    }

    pub fn second_label(&self) -> &str {
        &self.second_label
    }

    pub fn render_cell(&self, cell: &DiffCell) -> String {
        match cell {
            DiffCell::Unchanged => String::new(),
            DiffCell::Changed { first, second } => format!(
                "{}: {} / {}: {}",
                self.first_label, first, self.second_label, second
            ),
            DiffCell::RemovedFromFirst(first) => format!("{}: {} / ", self.first_label, first),
            DiffCell::AddedInSecond(second) => format!(" / {}: {}", self.second_label, second),
        }
    }

    /// Render every row, dropping those without any difference
    pub fn render(&self, grid: &DiffGrid) -> DiffReport {
        let rows = grid
            .rows()
            .map(|(key, cells)| DiffRow {
                key: key.to_string(),
                cells: cells.iter().map(|c| self.render_cell(c)).collect(),
            })
            .filter(DiffRow::has_differences)
            .collect();

        DiffReport {
            key_column: grid.key_column().to_string(),
            columns: grid.columns().to_vec(),
            rows,
        }
    }
}

/// Render `grid` with explicit labels
pub fn render(grid: &DiffGrid, first_label: &str, second_label: &str) -> DiffReport {
    Renderer::new(first_label, second_label).render(grid)
}
