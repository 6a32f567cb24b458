//! Error types for surface extraction.
//!
//! Only the primary component file can fail an analysis. Everything reached
//! through an import is reported as a [`sinopia_carton::ResolveMiss`] instead.

use std::path::PathBuf;

/// Fatal extraction error.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The component file could not be read.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The component file could not be parsed.
    #[error("{}: parse failed: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Result type for extraction.
pub type ExtractResult<T> = Result<T, ExtractError>;
