//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a comparison runs
#[derive(Debug)]
pub struct ProgressReporter {
    pub spinner: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Start a spinner with an initial message
    pub fn new(message: &str) -> Self {
        Self {
            spinner: Some(create_spinner(message)),
        }
    }

    /// Create minimal progress reporter (no spinner)
    pub fn new_minimal() -> Self {
        Self { spinner: None }
    }

    pub fn set_message(&mut self, message: &str) {
        if let Some(pb) = &self.spinner {
            pb.set_message(message.to_string());
        }
    }

    pub fn finish(&mut self, message: &str) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // Clear silently if the run ended early
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner progress bar
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
