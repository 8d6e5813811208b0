use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolkitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("invalid asset allocation: {0}")]
    InvalidAllocation(String),
}
