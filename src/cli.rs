//! Command-line interface for confdiff

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "confdiff")]
#[command(about = "Compare two tabular configuration exports cell by cell")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override workspace location
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two delimited files keyed by their identifier column
    Compare {
        /// First (reference) file
        file1: PathBuf,

        /// Second file
        file2: PathBuf,

        /// Lines to skip before the header (defaults to the saved setting)
        #[arg(long)]
        header_row: Option<usize>,

        /// Comma-separated columns to compare (defaults to the saved setting)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Compare every shared column, ignoring saved columns
        #[arg(long, conflicts_with = "columns")]
        all_columns: bool,

        /// Delimiter: "comma", "tab", "semicolon", "pipe", "auto" or a single character
        #[arg(long, default_value = "comma")]
        delimiter: String,

        /// Use this exact column as the identifier instead of the first "id"-like one
        #[arg(long)]
        key_column: Option<String>,

        /// Column holding item descriptions
        #[arg(long, default_value = crate::annotate::DEFAULT_DESCRIPTION_COLUMN)]
        description_column: String,

        /// Separate table to take descriptions from (defaults to FILE1)
        #[arg(long)]
        descriptions: Option<PathBuf>,

        /// Label for FILE1 (derived from its name by default)
        #[arg(long, requires = "label2")]
        label1: Option<String>,

        /// Label for FILE2 (derived from its name by default)
        #[arg(long, requires = "label1")]
        label2: Option<String>,

        /// CSV report path (defaults to the workspace reports directory)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: "pretty", "json" or "quiet"
        #[arg(long, default_value = "pretty")]
        format: String,

        /// Do not remember header row and columns for the next run
        #[arg(long)]
        no_save: bool,
    },

    /// List the identifier column and comparable columns of a file
    Columns {
        /// Input file
        file: PathBuf,

        /// Lines to skip before the header (defaults to the saved setting)
        #[arg(long)]
        header_row: Option<usize>,

        /// Delimiter: "comma", "tab", "semicolon", "pipe", "auto" or a single character
        #[arg(long, default_value = "comma")]
        delimiter: String,
    },

    /// Show or change the remembered settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current settings
    Show,

    /// Update the stored settings
    Set {
        /// Lines to skip before the header
        #[arg(long)]
        header_row: Option<usize>,

        /// Comma-separated columns to compare; pass "" to compare all
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,
    },

    /// Restore the default settings
    Reset,
}

/// Drop blank entries left by values such as "A,,B" or ""
pub fn clean_columns(columns: Vec<String>) -> Vec<String> {
    columns
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}
