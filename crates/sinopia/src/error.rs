//! Error types for the sinopia pipeline.

use std::path::PathBuf;

use sinopia_croquis::ExtractError;

use crate::config::ConfigError;

/// Fatal analysis error.
#[derive(Debug, thiserror::Error)]
pub enum SinopiaError {
    /// The component could not be read or parsed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The test file could not be read.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// `sinopia.config.json` is unreadable or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for the sinopia pipeline.
pub type SinopiaResult<T> = Result<T, SinopiaError>;
