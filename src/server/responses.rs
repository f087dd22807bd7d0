//! HTTP response bodies
//!
//! JSON shapes returned by the routes, and rendering of errors.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::warn;
use serde::Serialize;

use crate::error::StorageError;
use crate::error::handlers::{error_to_status, handle_error};
use crate::storage::Entry;

/// Directory listing
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub path: String,
    pub entries: Vec<Entry>,
}

/// Confirmation of a mutating operation
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            name: None,
            size: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// Anything a route can fail with
#[derive(Debug)]
pub enum ApiError {
    Storage(StorageError),
    /// Request body rejected before it reached storage
    Rejected(StatusCode, String),
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        ApiError::Storage(error)
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        ApiError::Rejected(error.status(), error.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Storage(err) => {
                handle_error("Request", &err);
                let body = ErrorBody {
                    error: err.kind(),
                    message: err.to_string(),
                };
                (error_to_status(&err), Json(body)).into_response()
            }
            ApiError::Rejected(status, message) => {
                warn!("Request body rejected ({}): {}", status, message);
                let body = ErrorBody {
                    error: "rejected",
                    message,
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Error for a missing required request parameter
pub fn missing_parameter(name: &str) -> ApiError {
    ApiError::Storage(StorageError::InvalidInput(format!(
        "{} parameter is missing",
        name
    )))
}

/// `Content-Disposition` value for a download.
///
/// Quotes and backslashes are replaced and control characters dropped so the
/// name cannot break out of the header.
pub fn content_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            c => c,
        })
        .collect();
    format!("attachment; filename=\"{}\"", safe)
}
