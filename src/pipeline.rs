//! End-to-end comparison: load, align, diff, render, annotate

use crate::align::align;
use crate::annotate::{annotate, Descriptions, DEFAULT_DESCRIPTION_COLUMN};
use crate::diff::{diff, DiffSummary};
use crate::error::Result;
use crate::loader::TableLoader;
use crate::progress::ProgressReporter;
use crate::render::{DiffReport, Renderer};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Supplies the raw bytes of one input table
pub trait TableSource {
    /// Name used for labels and error messages
    fn identifier(&self) -> &str;

    fn read_bytes(&self) -> Result<Vec<u8>>;
}

/// Receives a finished comparison for display or export
pub trait ReportSink {
    fn accept(&mut self, outcome: &ComparisonOutcome) -> Result<()>;
}

/// A table stored in a file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    identifier: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let identifier = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, identifier }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for FileSource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| {
            crate::error::ConfdiffError::invalid_input(format!(
                "Failed to read '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// A table already held in memory, e.g. an uploaded file
#[derive(Debug, Clone)]
pub struct MemorySource {
    identifier: String,
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(identifier: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            identifier: identifier.into(),
            bytes: bytes.into(),
        }
    }
}

impl TableSource for MemorySource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// Options for one comparison
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Empty compares every shared column
    pub columns_to_compare: Vec<String>,
    pub description_column: String,
    /// Overrides the labels derived from the input identifiers
    pub labels: Option<(String, String)>,
    pub show_progress: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            columns_to_compare: Vec::new(),
            description_column: DEFAULT_DESCRIPTION_COLUMN.to_string(),
            labels: None,
            show_progress: false,
        }
    }
}

/// Everything one comparison produces
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonOutcome {
    pub first_source: String,
    pub second_source: String,
    pub first_label: String,
    pub second_label: String,
    pub summary: DiffSummary,
    pub report: DiffReport,
    pub descriptions: Descriptions,
}

/// Runs the comparison pipeline with a configured loader
pub struct Comparator {
    loader: TableLoader,
    options: CompareOptions,
}

impl Comparator {
    pub fn new(loader: TableLoader, options: CompareOptions) -> Self {
        Self { loader, options }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Compare two inputs, taking descriptions from the first
    pub fn compare(
        &self,
        first: &dyn TableSource,
        second: &dyn TableSource,
    ) -> Result<ComparisonOutcome> {
        self.compare_with_descriptions(first, second, None)
    }

    /// Compare two inputs, taking descriptions from `descriptions` when given.
    ///
    /// The description table is loaded without a preamble and with an
    /// auto-detected delimiter.
    pub fn compare_with_descriptions(
        &self,
        first: &dyn TableSource,
        second: &dyn TableSource,
        descriptions: Option<&dyn TableSource>,
    ) -> Result<ComparisonOutcome> {
        let mut progress = if self.options.show_progress {
            ProgressReporter::new("Loading tables...")
        } else {
            ProgressReporter::new_minimal()
        };

        let table1 = self.loader.load_bytes(&first.read_bytes()?, first.identifier())?;
        let table2 = self.loader.load_bytes(&second.read_bytes()?, second.identifier())?;
        progress.set_message("Comparing...");

        let (first_label, second_label) = match &self.options.labels {
            Some((l1, l2)) => (l1.clone(), l2.clone()),
            None => {
                let renderer = Renderer::from_identifiers(first.identifier(), second.identifier());
                (renderer.first_label().to_string(), renderer.second_label().to_string())
            }
        };
        if first_label == second_label {
            log::warn!(
                "Both inputs are labelled '{}'; use --label1/--label2 to tell them apart",
                first_label
            );
        }

        let columns = Some(self.options.columns_to_compare.as_slice());
        let pair = align(&table1, &table2, columns);
        let grid = diff(&pair);
        let summary = grid.summary();
        let report = Renderer::new(first_label.clone(), second_label.clone()).render(&grid);

        let descriptions = match descriptions {
            Some(source) => {
                let side_table = TableLoader::new(0)
                    .with_delimiter(crate::loader::Delimiter::Auto)
                    .load_bytes(&source.read_bytes()?, source.identifier())?;
                annotate(&report, &side_table, &self.options.description_column)
            }
            None => annotate(&report, &table1, &self.options.description_column),
        };

        log::info!(
            "Compared {} rows: {} differ ({} changed, {} added, {} removed cells)",
            summary.rows_compared,
            summary.rows_with_differences,
            summary.changed,
            summary.added,
            summary.removed
        );
        progress.finish("Comparison complete!");

        Ok(ComparisonOutcome {
            first_source: first.identifier().to_string(),
            second_source: second.identifier().to_string(),
            first_label,
            second_label,
            summary,
            report,
            descriptions,
        })
    }
}
