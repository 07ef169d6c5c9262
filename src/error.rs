//! Error types for the memtree namespace.

use thiserror::Error;

/// Errors raised by tree operations (resolution, mutation, content access)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("No such file or directory: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("'{0}' already exists")]
    AlreadyExists(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    #[error("Refusing to touch protected node: {0}")]
    ProtectedNode(String),

    #[error("Tree invariant violated: {0}")]
    Corrupted(String),
}

/// Persistence-related errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("State I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed state document: {0}")]
    Malformed(String),

    #[error("Invalid file system state: {0}")]
    InvalidState(String),

    #[error("Reconstructed tree is inconsistent: {0}")]
    Corrupted(#[from] FsError),
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Malformed(err.to_string())
    }
}

/// Session-level errors surfaced by the shell and the binary
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Fs(#[from] FsError),

    #[error("{0}")]
    Persistence(#[from] PersistenceError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    InputError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
