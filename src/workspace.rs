//! Workspace management for confdiff state

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the state directory inside a workspace root
pub const STATE_DIR: &str = ".confdiff";

/// Manages the .confdiff workspace directory
#[derive(Debug, Clone)]
pub struct ConfdiffWorkspace {
    /// Project root directory (where .confdiff/ lives)
    pub root: PathBuf,
    /// .confdiff/ directory path
    pub state_dir: PathBuf,
    /// .confdiff/reports/ directory path
    pub reports_dir: PathBuf,
}

impl ConfdiffWorkspace {
    /// Find existing workspace or create a new one
    pub fn find_or_create(start_dir: Option<&Path>) -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        let start = start_dir.unwrap_or(&current_dir);

        if let Some(workspace) = Self::find_existing(start) {
            return Ok(workspace);
        }

        Self::create_new(start.to_path_buf())
    }

    /// Find existing .confdiff workspace by walking up the directory tree
    fn find_existing(start_dir: &Path) -> Option<Self> {
        let mut current = start_dir;

        loop {
            let state_dir = current.join(STATE_DIR);
            if state_dir.is_dir() {
                return Some(Self::from_root(current.to_path_buf()));
            }

            // A repository root is as far as we go
            if current.join(".git").exists() {
                return None;
            }

            current = current.parent()?;
        }
    }

    /// Create a new workspace in the specified root directory
    pub fn create_new(root: PathBuf) -> Result<Self> {
        let workspace = Self::from_root(root);

        fs::create_dir_all(&workspace.state_dir)?;
        fs::create_dir_all(&workspace.reports_dir)?;

        log::info!("Created confdiff workspace at: {}", workspace.root.display());

        Ok(workspace)
    }

    /// Create workspace from root directory path
    pub fn from_root(root: PathBuf) -> Self {
        let state_dir = root.join(STATE_DIR);
        let reports_dir = state_dir.join("reports");

        Self {
            root,
            state_dir,
            reports_dir,
        }
    }

    /// Path of the persisted settings record
    pub fn settings_path(&self) -> PathBuf {
        self.state_dir.join("settings.json")
    }

    /// Default location of the CSV report for a pair of labels
    pub fn report_path(&self, first_label: &str, second_label: &str) -> PathBuf {
        self.reports_dir
            .join(format!("differences_{}_{}.csv", first_label, second_label))
    }

    /// Resolve a user-supplied path relative to the workspace root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
