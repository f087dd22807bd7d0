//! Error handlers
//!
//! Maps storage errors onto HTTP status codes and logs them.

use axum::http::StatusCode;
use log::{error, warn};

use crate::error::types::StorageError;

/// Log a failed operation at a level matching who caused it
pub fn handle_error(operation: &str, err: &StorageError) {
    if err.is_client_error() {
        warn!("{} rejected: {}", operation, err);
    } else {
        error!("{} failed: {}", operation, err);
    }
}

/// Convert error to HTTP status code
pub fn error_to_status(err: &StorageError) -> StatusCode {
    match err {
        StorageError::InvalidPath(_) => StatusCode::BAD_REQUEST,
        StorageError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        StorageError::NotFound(_) => StatusCode::NOT_FOUND,
        StorageError::Conflict(_) => StatusCode::CONFLICT,
        StorageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
