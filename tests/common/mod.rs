//! Common test utilities and helpers

use confdiff::{ConfdiffWorkspace, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture manager for creating temporary test environments
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub workspace: ConfdiffWorkspace,
}

impl TestFixture {
    /// Create a new test fixture with initialized workspace
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let workspace = ConfdiffWorkspace::create_new(temp_dir.path().to_path_buf())?;

        Ok(Self {
            temp_dir,
            workspace,
        })
    }

    /// Get the root path of the test fixture
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a CSV file from rows of fields
    pub fn create_csv(&self, name: &str, data: &[Vec<&str>]) -> Result<PathBuf> {
        let mut content = String::new();
        for row in data {
            content.push_str(&row.join(","));
            content.push('\n');
        }
        self.create_csv_raw(name, &content)
    }

    /// Create a CSV file preceded by the four metadata lines of a typical
    /// export, with a blank separator line that does not count towards them
    pub fn create_export(&self, name: &str, data: &[Vec<&str>]) -> Result<PathBuf> {
        let mut content = String::from(
            "Configuration export\nEnvironment,unknown\n\nGenerated,2024-05-01 10:00\nSection,parameters\n",
        );
        for row in data {
            content.push_str(&row.join(","));
            content.push('\n');
        }
        self.create_csv_raw(name, &content)
    }

    /// Create a file with raw string content
    pub fn create_csv_raw(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }
}

/// Helper for running CLI commands in tests
pub struct CliTestRunner {
    fixture: TestFixture,
}

impl CliTestRunner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fixture: TestFixture::new()?,
        })
    }

    pub fn fixture(&self) -> &TestFixture {
        &self.fixture
    }

    /// Run a confdiff command and return the result
    pub fn run_command(&self, args: &[&str]) -> Result<()> {
        use clap::Parser;
        use confdiff::cli::Cli;
        use confdiff::commands::execute_command;

        let mut cmd_args = vec!["confdiff"];
        cmd_args.extend(args);

        let cli = Cli::try_parse_from(cmd_args)
            .map_err(|e| confdiff::ConfdiffError::invalid_input(e.to_string()))?;

        // Default to the fixture root unless --workspace was given
        let workspace_path = cli.workspace.as_deref().or(Some(self.fixture.root()));
        execute_command(cli.command, workspace_path)
    }

    /// Run a command and expect it to succeed
    pub fn expect_success(&self, args: &[&str]) {
        if let Err(e) = self.run_command(args) {
            panic!("Command {:?} should succeed: {}", args, e);
        }
    }

    /// Run a command and expect it to fail
    pub fn expect_failure(&self, args: &[&str]) -> confdiff::ConfdiffError {
        self.run_command(args).expect_err("Command should fail")
    }
}

/// Sample data generators for testing
pub mod sample_data {
    pub fn prod_rows() -> Vec<Vec<&'static str>> {
        vec![
            vec!["Id", "Name", "Status", "Description"],
            vec!["1", "Alice", "on", "Primary admin"],
            vec!["2", "Bob", "off", "Backup operator"],
            vec!["4", "Dana", "on", "Auditor"],
        ]
    }

    pub fn qa_rows() -> Vec<Vec<&'static str>> {
        vec![
            vec!["Id", "Name", "Status", "Description"],
            vec!["1", "Alice", "on", "Primary admin"],
            vec!["4", "Dana", "off", "Auditor"],
            vec!["3", "Carl", "on", "Tester"],
        ]
    }

    /// Same as `qa_rows` without the Status column
    pub fn qa_rows_without_status() -> Vec<Vec<&'static str>> {
        vec![
            vec!["Id", "Name", "Description"],
            vec!["1", "Alice", "Primary admin"],
            vec!["4", "Dana", "Auditor"],
            vec!["3", "Carl", "Tester"],
        ]
    }
}

/// Assertion helpers for test validation
pub mod assertions {
    use std::path::Path;

    /// Read a CSV report into its header and rows
    pub fn read_report(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        assert!(path.exists(), "Report should exist: {}", path.display());
        let mut reader = csv::Reader::from_path(path).expect("report should be readable");
        let header = reader
            .headers()
            .expect("report should have a header")
            .iter()
            .map(str::to_string)
            .collect();
        let rows = reader
            .records()
            .map(|r| r.expect("valid record").iter().map(str::to_string).collect())
            .collect();
        (header, rows)
    }

    /// Find the report row for a key (first field)
    pub fn report_row<'a>(rows: &'a [Vec<String>], key: &str) -> Option<&'a Vec<String>> {
        rows.iter().find(|r| r.first().map(String::as_str) == Some(key))
    }
}
