//! # confdiff
//!
//! Compares two tabular exports (for example the configuration of two
//! environments) keyed by an identifier column, and reports every differing
//! cell in a combined `"PROD: a / QA: b"` form.
//!
//! The stages are independent and can be used on their own:
//! [`loader`] → [`align`] → [`diff`] → [`render`] → [`annotate`], tied
//! together by [`pipeline::Comparator`].

pub mod cli;
pub mod error;
pub mod table;
pub mod key;
pub mod loader;
pub mod align;
pub mod diff;
pub mod render;
pub mod annotate;
pub mod settings;
pub mod workspace;
pub mod pipeline;
pub mod output;
pub mod progress;
pub mod commands;

pub use error::{ConfdiffError, Result};
pub use loader::{Delimiter, TableLoader};
pub use pipeline::{Comparator, CompareOptions, ComparisonOutcome};
pub use table::{CellValue, Table};
pub use workspace::ConfdiffWorkspace;
