//! Error types for Icon Atlas.

use std::path::PathBuf;

use icon_atlas_net::NetworkError;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Errors that can occur while loading configuration or remote data.
///
/// Filtering, grouping and chunking never fail; they operate on data that has
/// already been validated.
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    /// Fetching from the registry failed.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AtlasError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
