//! Error types for the CLI

use core_types::HeapError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Config file could not be read
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file or stats could not be (de)serialized
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Heap rejected an operation or a configuration
    #[error(transparent)]
    Heap(#[from] HeapError),

    /// Scenario name not in the catalogue
    #[error("unknown scenario '{0}' (run 'gc-sim list' to see the catalogue)")]
    UnknownScenario(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
