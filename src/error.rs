//! Error types for loading trip data and collecting answers.

use std::io;
use std::path::Path;

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, BikeshareError>;

/// Failures while loading a city's trip file.
///
/// Each of these ends the current analysis cycle; the session reports it and
/// moves on to the restart prompt.
#[derive(Debug, Error)]
pub enum BikeshareError {
    /// The trip file could not be opened or read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A required column is absent from the header.
    #[error("'{path}' is missing required column '{column}'")]
    MissingColumn { path: String, column: &'static str },

    /// A cell could not be parsed into its typed value.
    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// The CSV layer rejected a record.
    #[error("malformed record: {0}")]
    Csv(#[from] csv::Error),
}

impl BikeshareError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        BikeshareError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Whether the file was readable but did not have the expected shape.
    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            BikeshareError::MissingColumn { .. } | BikeshareError::InvalidValue { .. }
        )
    }
}

/// Ways a prompt can fail to produce an answer.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The user pressed Ctrl-C while filters were being collected.
    #[error("interrupted by user")]
    Interrupted,

    /// Standard input was closed while filters were being collected.
    #[error("input closed")]
    InputClosed,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
