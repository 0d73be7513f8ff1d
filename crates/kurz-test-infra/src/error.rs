use std::result::Result as StdResult;
use thiserror::Error;

/// Errors that can occur when setting up or inspecting test fixtures.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A type alias for `Result` with `TestInfraError`.
pub type Result<T> = StdResult<T, TestInfraError>;
