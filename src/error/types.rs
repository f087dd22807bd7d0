//! Error types
//!
//! Defines the storage error taxonomy and the process-level server error.

use std::fmt;
use std::io;

/// Storage module errors
///
/// Every file operation reports exactly one of these kinds. The HTTP layer
/// maps them to status codes and performs no recovery of its own.
#[derive(Debug)]
pub enum StorageError {
    /// The client-supplied path failed resolution or validation.
    InvalidPath(String),
    /// A malformed name or payload.
    InvalidInput(String),
    /// The target does not exist.
    NotFound(String),
    /// The target already exists where uniqueness is required.
    Conflict(String),
    /// Underlying storage failure. Never retried.
    Io(io::Error),
}

impl StorageError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            StorageError::InvalidPath(_) => "invalid_path",
            StorageError::InvalidInput(_) => "invalid_input",
            StorageError::NotFound(_) => "not_found",
            StorageError::Conflict(_) => "conflict",
            StorageError::Io(_) => "io_error",
        }
    }

    /// Whether the client caused the failure
    pub fn is_client_error(&self) -> bool {
        !matches!(self, StorageError::Io(_))
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            StorageError::InvalidInput(s) => write!(f, "Invalid input: {}", s),
            StorageError::NotFound(p) => write!(f, "Not found: {}", p),
            StorageError::Conflict(p) => write!(f, "Already exists: {}", p),
            StorageError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Io(error)
    }
}

/// Errors that stop the server from starting or serving
#[derive(Debug)]
pub enum ServerError {
    Config(config::ConfigError),
    Storage(StorageError),
    Io(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::Storage(e) => write!(f, "Storage error: {}", e),
            ServerError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Config(e) => Some(e),
            ServerError::Storage(e) => Some(e),
            ServerError::Io(e) => Some(e),
        }
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}

impl From<StorageError> for ServerError {
    fn from(error: StorageError) -> Self {
        ServerError::Storage(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::Io(error)
    }
}
