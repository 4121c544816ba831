//! Error types for listing conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a conversion run.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The listing file could not be read.
    #[error("Failed to read listing file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV file could not be opened or appended to.
    #[error("Failed to write CSV file {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be encoded as CSV.
    #[error("Failed to encode CSV record: {0}")]
    Encode(#[from] csv::Error),
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
