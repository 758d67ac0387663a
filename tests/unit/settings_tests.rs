//! Unit tests for settings persistence and workspace layout

use confdiff::settings::{JsonSettingsStore, MemorySettingsStore, Settings, SettingsStore};
use confdiff::ConfdiffWorkspace;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.header_row, 4);
    assert!(settings.columns_to_compare.is_empty());
    assert!(settings.updated_at.is_none());
}

#[test]
fn test_settings_file_format() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = ConfdiffWorkspace::create_new(temp_dir.path().to_path_buf()).unwrap();
    let store = JsonSettingsStore::new(workspace.settings_path());

    store
        .put(&Settings {
            header_row: 1,
            columns_to_compare: vec!["Name".to_string(), "Status".to_string()],
            updated_at: None,
        })
        .unwrap();

    let content = fs::read_to_string(workspace.settings_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["header_row"], 1);
    assert_eq!(json["columns_to_compare"][1], "Status");
    assert!(json.get("updated_at").is_none());
}

#[test]
fn test_last_writer_wins() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    let first = JsonSettingsStore::new(&path);
    let second = JsonSettingsStore::new(&path);

    first
        .put(&Settings {
            header_row: 1,
            ..Settings::default()
        })
        .unwrap();
    second
        .put(&Settings {
            header_row: 7,
            ..Settings::default()
        })
        .unwrap();

    assert_eq!(first.get(Settings::default()).header_row, 7);
}

#[test]
fn test_stores_are_interchangeable() {
    fn round_trip(store: &dyn SettingsStore) -> Settings {
        store
            .put(&Settings {
                header_row: 0,
                columns_to_compare: vec!["A".to_string()],
                updated_at: None,
            })
            .unwrap();
        store.get(Settings::default())
    }

    let temp_dir = TempDir::new().unwrap();
    let json = round_trip(&JsonSettingsStore::new(temp_dir.path().join("s.json")));
    let memory = round_trip(&MemorySettingsStore::default());
    assert_eq!(json, memory);
}
