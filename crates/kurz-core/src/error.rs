use std::path::PathBuf;
use thiserror::Error;

/// Errors related to the core types of the URL shortener.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("store file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("store file {} is not accessible: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store serialization failed: {0}")]
    Serialization(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

impl StorageError {
    /// Wraps an I/O error, mapping `NotFound` to [`StorageError::NotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io { path, source },
        }
    }
}

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("missing url")]
    MissingUrl,
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("{0} is not found")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<CoreError> for MappingError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidShortCode(message),
        }
    }
}
