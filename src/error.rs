//! Error types for confdiff operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfdiffError>;

#[derive(Error, Debug)]
pub enum ConfdiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not parse '{input}': {message}")]
    Parse { input: String, message: String },

    #[error("'{input}' contains no data rows")]
    EmptyInput { input: String },

    #[error("'{input}' has no identifier column (columns: {})", columns.join(", "))]
    MissingKeyColumn { input: String, columns: Vec<String> },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Comparison aborted: {message}")]
    Unexpected { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl ConfdiffError {
    pub fn parse(input: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            message: msg.into(),
        }
    }

    pub fn empty_input(input: impl Into<String>) -> Self {
        Self::EmptyInput {
            input: input.into(),
        }
    }

    pub fn missing_key_column(input: impl Into<String>, columns: &[String]) -> Self {
        Self::MissingKeyColumn {
            input: input.into(),
            columns: columns.to_vec(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected {
            message: msg.into(),
        }
    }

    /// Category shown to the user in front of the message
    pub fn label(&self) -> &'static str {
        match self {
            Self::Parse { .. } | Self::Csv(_) => "Parse error",
            Self::EmptyInput { .. } => "Empty input",
            Self::MissingKeyColumn { .. } => "Missing key column",
            Self::Io(_) => "I/O error",
            Self::Json(_) | Self::Config { .. } => "Configuration error",
            Self::InvalidInput { .. } => "Invalid input",
            Self::Unexpected { .. } | Self::Generic(_) => "Unexpected error",
        }
    }

    /// True for failures caused by the content of one of the input tables
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Csv(_) | Self::EmptyInput { .. } | Self::MissingKeyColumn { .. }
        )
    }
}
