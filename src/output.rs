//! Output formatting and report sinks

use crate::error::Result;
use crate::pipeline::{ComparisonOutcome, ReportSink};
use crate::settings::Settings;
use std::path::{Path, PathBuf};

/// Output style for console results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
    Quiet,
}

impl OutputFormat {
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "quiet" => Ok(Self::Quiet),
            _ => Err(format!(
                "Invalid output format: {}. Use 'pretty', 'json' or 'quiet'",
                s
            )),
        }
    }
}

/// Pretty printer for confdiff output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print the differing rows and their descriptions
    pub fn print_comparison(outcome: &ComparisonOutcome) {
        println!(
            "🔍 Comparison: {} ({}) → {} ({})",
            outcome.first_source, outcome.first_label, outcome.second_source, outcome.second_label
        );

        let summary = &outcome.summary;
        println!("├─ Rows compared: {}", summary.rows_compared);
        if summary.has_changes() {
            println!("├─ ❌ Rows with differences: {}", summary.rows_with_differences);
            println!(
                "│  └─ Cells: {} changed, {} only in {}, {} only in {}",
                summary.changed,
                summary.removed,
                outcome.first_label,
                summary.added,
                outcome.second_label
            );
        } else {
            println!("├─ ✅ No differences");
        }

        let report = &outcome.report;
        for (i, row) in report.rows.iter().enumerate() {
            let last_row = i == report.rows.len() - 1;
            let (prefix, indent) = if last_row { ("└─", "   ") } else { ("├─", "│  ") };
            println!("{} {}: {}", prefix, report.key_column, row.key);

            let differing: Vec<(&String, &String)> = report
                .columns
                .iter()
                .zip(&row.cells)
                .filter(|(_, cell)| !cell.is_empty())
                .collect();
            for (j, (column, cell)) in differing.iter().enumerate() {
                let branch = if j == differing.len() - 1 { "└─" } else { "├─" };
                println!("{}{} {}: {}", indent, branch, column, cell);
            }
        }
        if report.is_empty() {
            println!("└─ Nothing to report");
        }

        Self::print_descriptions(outcome);
    }

    fn print_descriptions(outcome: &ComparisonOutcome) {
        let descriptions = &outcome.descriptions;
        if !descriptions.column_found {
            println!(
                "\nℹ️  No '{}' column found in the description source.",
                descriptions.column
            );
            return;
        }
        if outcome.report.is_empty() {
            return;
        }

        println!("\n📝 Descriptions for items with differences");
        if descriptions.is_empty() {
            println!("└─ No descriptions found for the items with differences.");
            return;
        }
        for (i, entry) in descriptions.entries.iter().enumerate() {
            let prefix = if i == descriptions.len() - 1 { "└─" } else { "├─" };
            println!("{} {}: {}", prefix, entry.key, entry.text);
        }
    }

    /// Machine-readable summary lines
    pub fn print_quiet(outcome: &ComparisonOutcome) {
        println!("rows_compared={}", outcome.summary.rows_compared);
        println!("rows_with_differences={}", outcome.summary.rows_with_differences);
        println!("cells_changed={}", outcome.summary.changed);
        println!("cells_added={}", outcome.summary.added);
        println!("cells_removed={}", outcome.summary.removed);
    }

    /// Print the key column and the comparable columns of a file
    pub fn print_columns(source: &str, key_column: Option<&str>, columns: &[String]) {
        println!("📋 Columns of {}", source);
        match key_column {
            Some(key) => println!("├─ 🔑 Key column: {}", key),
            None => println!("├─ ⚠️  No identifier column found"),
        }
        for (i, column) in columns.iter().enumerate() {
            let prefix = if i == columns.len() - 1 { "└─" } else { "├─" };
            println!("{} {}", prefix, column);
        }
    }

    pub fn print_settings(settings: &Settings, path: &Path) {
        println!("⚙️  Settings ({})", path.display());
        println!("├─ Header row: {}", settings.header_row);
        if settings.columns_to_compare.is_empty() {
            println!("├─ Columns to compare: all shared columns");
        } else {
            println!("├─ Columns to compare: {}", settings.columns_to_compare.join(", "));
        }
        match settings.updated_at {
            Some(ts) => println!("└─ Last saved: {}", ts.to_rfc3339()),
            None => println!("└─ Last saved: never"),
        }
    }
}

/// JSON formatter for confdiff output
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format_comparison(outcome: &ComparisonOutcome) -> Result<String> {
        Ok(serde_json::to_string_pretty(outcome)?)
    }
}

/// Prints a comparison to stdout
pub struct ConsoleSink {
    format: OutputFormat,
}

impl ConsoleSink {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl ReportSink for ConsoleSink {
    fn accept(&mut self, outcome: &ComparisonOutcome) -> Result<()> {
        match self.format {
            OutputFormat::Pretty => PrettyPrinter::print_comparison(outcome),
            OutputFormat::Json => println!("{}", JsonFormatter::format_comparison(outcome)?),
            OutputFormat::Quiet => PrettyPrinter::print_quiet(outcome),
        }
        Ok(())
    }
}

/// Writes the report as a CSV file
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for CsvFileSink {
    fn accept(&mut self, outcome: &ComparisonOutcome) -> Result<()> {
        outcome.report.save_csv(&self.path)?;
        log::info!("Wrote {} report rows to {}", outcome.report.len(), self.path.display());
        Ok(())
    }
}
