//! Last-used comparison settings

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

/// Lines skipped before the header when nothing else is configured
pub const DEFAULT_HEADER_ROW: usize = 4;

/// Remembered options for the next comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_header_row")]
    pub header_row: usize,
    /// Empty means every shared column
    #[serde(default)]
    pub columns_to_compare: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_header_row() -> usize {
    DEFAULT_HEADER_ROW
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            header_row: DEFAULT_HEADER_ROW,
            columns_to_compare: Vec::new(),
            updated_at: None,
        }
    }
}

/// Key-value persistence for [`Settings`]
pub trait SettingsStore {
    /// Stored settings, or `defaults` when nothing usable is stored
    fn get(&self, defaults: Settings) -> Settings;

    fn put(&self, settings: &Settings) -> Result<()>;
}

/// Settings kept as a JSON file
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Remove the stored record, if any
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get(&self, defaults: Settings) -> Settings {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return defaults,
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", self.path.display(), e);
                return defaults;
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring corrupt settings in {}: {}", self.path.display(), e);
                defaults
            }
        }
    }

    fn put(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(settings)?)?;
        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Settings held in memory for the lifetime of the store
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    stored: RefCell<Option<Settings>>,
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, defaults: Settings) -> Settings {
        self.stored.borrow().clone().unwrap_or(defaults)
    }

    fn put(&self, settings: &Settings) -> Result<()> {
        *self.stored.borrow_mut() = Some(settings.clone());
        Ok(())
    }
}
