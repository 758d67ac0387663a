//! Integration tests for the config and columns commands

use crate::common::{sample_data, CliTestRunner};
use confdiff::settings::{JsonSettingsStore, Settings, SettingsStore, DEFAULT_HEADER_ROW};
use confdiff::ConfdiffError;

#[test]
fn test_config_set_show_reset() {
    let runner = CliTestRunner::new().unwrap();
    let store = JsonSettingsStore::new(runner.fixture().workspace.settings_path());

    runner.expect_success(&["config", "show"]);
    runner.expect_success(&["config", "set", "--header-row", "2", "--columns", "Name,Status"]);

    let settings = store.get(Settings::default());
    assert_eq!(settings.header_row, 2);
    assert_eq!(settings.columns_to_compare, vec!["Name".to_string(), "Status".to_string()]);

    runner.expect_success(&["config", "set", "--columns", ""]);
    let settings = store.get(Settings::default());
    assert_eq!(settings.header_row, 2);
    assert!(settings.columns_to_compare.is_empty());

    runner.expect_success(&["config", "reset"]);
    assert_eq!(store.get(Settings::default()).header_row, DEFAULT_HEADER_ROW);
}

#[test]
fn test_config_set_requires_a_value() {
    let runner = CliTestRunner::new().unwrap();
    let error = runner.expect_failure(&["config", "set"]);
    assert!(matches!(error, ConfdiffError::Config { .. }));
}

#[test]
fn test_columns_command() {
    let runner = CliTestRunner::new().unwrap();
    let prod = runner.fixture().create_export("PROD.csv", &sample_data::prod_rows()).unwrap();

    runner.expect_success(&["columns", prod.to_str().unwrap()]);
    runner.expect_success(&["columns", prod.to_str().unwrap(), "--header-row", "4", "--delimiter", "auto"]);
}

#[test]
fn test_columns_command_on_empty_file() {
    let runner = CliTestRunner::new().unwrap();
    let empty = runner.fixture().create_csv_raw("empty.csv", "").unwrap();

    let error = runner.expect_failure(&["columns", empty.to_str().unwrap(), "--header-row", "0"]);
    assert!(matches!(error, ConfdiffError::EmptyInput { .. }));
}
