//! Command implementations for confdiff CLI

use crate::cli::{clean_columns, Commands, ConfigAction};
use crate::error::{ConfdiffError, Result};
use crate::key::{IdSubstringMatcher, KeyColumnStrategy, NamedColumnMatcher};
use crate::loader::{Delimiter, TableLoader};
use crate::output::{ConsoleSink, CsvFileSink, OutputFormat, PrettyPrinter};
use crate::pipeline::{CompareOptions, Comparator, FileSource, ReportSink, TableSource};
use crate::settings::{JsonSettingsStore, Settings, SettingsStore};
use crate::workspace::ConfdiffWorkspace;
use std::panic::{self, catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Serialises panic hook swaps between concurrent guarded steps
static PANIC_HOOK_LOCK: Mutex<()> = Mutex::new(());

/// Arguments of the compare command
#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub file1: PathBuf,
    pub file2: PathBuf,
    pub header_row: Option<usize>,
    pub columns: Option<Vec<String>>,
    pub all_columns: bool,
    pub delimiter: String,
    pub key_column: Option<String>,
    pub description_column: String,
    pub descriptions: Option<PathBuf>,
    pub labels: Option<(String, String)>,
    pub output: Option<PathBuf>,
    pub format: String,
    pub no_save: bool,
}

/// Execute a command
pub fn execute_command(command: Commands, workspace_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Compare {
            file1,
            file2,
            header_row,
            columns,
            all_columns,
            delimiter,
            key_column,
            description_column,
            descriptions,
            label1,
            label2,
            output,
            format,
            no_save,
        } => compare_command(
            workspace_path,
            CompareRequest {
                file1,
                file2,
                header_row,
                columns,
                all_columns,
                delimiter,
                key_column,
                description_column,
                descriptions,
                labels: label1.zip(label2),
                output,
                format,
                no_save,
            },
        ),
        Commands::Columns {
            file,
            header_row,
            delimiter,
        } => columns_command(workspace_path, &file, header_row, &delimiter),
        Commands::Config { action } => config_command(workspace_path, action),
    }
}

/// Compare two files and write the combined-values report
fn compare_command(workspace_path: Option<&Path>, request: CompareRequest) -> Result<()> {
    let workspace = ConfdiffWorkspace::find_or_create(workspace_path)?;
    let store = JsonSettingsStore::new(workspace.settings_path());
    let saved = store.get(Settings::default());

    let format = OutputFormat::parse(&request.format).map_err(ConfdiffError::invalid_input)?;
    let delimiter = Delimiter::parse(&request.delimiter).map_err(ConfdiffError::invalid_input)?;

    let header_row = request.header_row.unwrap_or(saved.header_row);
    let columns_to_compare = if request.all_columns {
        Vec::new()
    } else {
        match request.columns {
            Some(columns) => clean_columns(columns),
            None => saved.columns_to_compare.clone(),
        }
    };
    log::debug!(
        "Effective settings: header_row={}, columns={:?}",
        header_row,
        columns_to_compare
    );

    let mut loader = TableLoader::new(header_row).with_delimiter(delimiter);
    if let Some(name) = &request.key_column {
        loader = loader.with_key_strategy(NamedColumnMatcher::new(name.clone()));
    }

    let options = CompareOptions {
        columns_to_compare: columns_to_compare.clone(),
        description_column: request.description_column.clone(),
        labels: request.labels.clone(),
        show_progress: format == OutputFormat::Pretty,
    };
    let comparator = Comparator::new(loader, options);

    let first = FileSource::new(resolve_input(&workspace, &request.file1));
    let second = FileSource::new(resolve_input(&workspace, &request.file2));
    let side_table = request
        .descriptions
        .as_ref()
        .map(|p| FileSource::new(resolve_input(&workspace, p)));

    let outcome = run_guarded(|| {
        comparator.compare_with_descriptions(
            &first,
            &second,
            side_table.as_ref().map(|s| s as &dyn TableSource),
        )
    })?;

    let report_path = match &request.output {
        Some(path) => resolve_output(path)?,
        None => workspace.report_path(&outcome.first_label, &outcome.second_label),
    };
    let mut csv_sink = CsvFileSink::new(report_path);
    run_guarded(|| {
        ConsoleSink::new(format).accept(&outcome)?;
        csv_sink.accept(&outcome)
    })?;
    if format == OutputFormat::Pretty {
        println!("\n💾 Report saved to: {}", csv_sink.path().display());
    }

    if !request.no_save {
        let settings = Settings {
            header_row,
            columns_to_compare,
            updated_at: Some(chrono::Utc::now()),
        };
        // settings are a convenience; a failed write must not fail the comparison
        if let Err(e) = store.put(&settings) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    Ok(())
}

/// List the key column and comparable columns of a file
fn columns_command(
    workspace_path: Option<&Path>,
    file: &Path,
    header_row: Option<usize>,
    delimiter: &str,
) -> Result<()> {
    let workspace = ConfdiffWorkspace::find_or_create(workspace_path)?;
    let saved = JsonSettingsStore::new(workspace.settings_path()).get(Settings::default());
    let delimiter = Delimiter::parse(delimiter).map_err(ConfdiffError::invalid_input)?;

    let source = FileSource::new(resolve_input(&workspace, file));
    let loader = TableLoader::new(header_row.unwrap_or(saved.header_row)).with_delimiter(delimiter);
    let headers = loader.read_headers(&source.read_bytes()?, source.identifier())?;

    let key_column = IdSubstringMatcher.find_key_column(&headers);
    let columns: Vec<String> = headers
        .into_iter()
        .filter(|h| Some(h) != key_column.as_ref())
        .collect();

    PrettyPrinter::print_columns(source.identifier(), key_column.as_deref(), &columns);
    Ok(())
}

/// Show, update or reset the stored settings
fn config_command(workspace_path: Option<&Path>, action: ConfigAction) -> Result<()> {
    let workspace = ConfdiffWorkspace::find_or_create(workspace_path)?;
    let store = JsonSettingsStore::new(workspace.settings_path());

    match action {
        ConfigAction::Show => {
            PrettyPrinter::print_settings(&store.get(Settings::default()), store.path());
        }
        ConfigAction::Set {
            header_row,
            columns,
        } => {
            if header_row.is_none() && columns.is_none() {
                return Err(ConfdiffError::config(
                    "Nothing to set. Use --header-row and/or --columns",
                ));
            }
            let mut settings = store.get(Settings::default());
            if let Some(header_row) = header_row {
                settings.header_row = header_row;
            }
            if let Some(columns) = columns {
                settings.columns_to_compare = clean_columns(columns);
            }
            settings.updated_at = Some(chrono::Utc::now());
            store.put(&settings)?;
            PrettyPrinter::print_settings(&settings, store.path());
        }
        ConfigAction::Reset => {
            store.clear()?;
            println!("✅ Settings reset to defaults");
        }
    }

    Ok(())
}

/// Inputs are taken as given when they exist, otherwise relative to the workspace root
fn resolve_input(workspace: &ConfdiffWorkspace, path: &Path) -> PathBuf {
    if path.exists() {
        path.to_path_buf()
    } else {
        workspace.resolve(path)
    }
}

/// Output paths are taken relative to the current directory, like inputs
fn resolve_output(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Run a pipeline step, turning a panic into an `Unexpected` error.
///
/// The panic message only reaches the debug log, never stderr.
fn run_guarded<T>(step: impl FnOnce() -> Result<T>) -> Result<T> {
    let outcome = {
        let _lock = PANIC_HOOK_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|info| log::debug!("Comparison panicked: {}", info)));
        let outcome = catch_unwind(AssertUnwindSafe(step));
        panic::set_hook(previous);
        outcome
    };

    match outcome {
        Ok(result) => result,
        Err(_) => Err(ConfdiffError::unexpected(
            "internal error while comparing; rerun with --verbose for details",
        )),
    }
}
