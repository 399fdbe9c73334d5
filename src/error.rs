use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostsnapError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("KDL parse error: {0}")]
    KdlError(#[from] kdl::KdlError),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    YamlError(#[from] serde_yml::Error),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("System command '{command}' timed out after {seconds} seconds")]
    CommandTimedOut { command: String, seconds: u64 },

    #[error("Operation interrupted by user")]
    Interrupted,

    /// Path resolution or validation error
    #[error("Path error: {0}")]
    PathError(String),

    #[error("{0}")]
    Other(String),
}

impl HostsnapError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HostsnapError::IoError {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HostsnapError>;
