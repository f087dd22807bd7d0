//! HTTP routes
//!
//! Extracts request parameters, runs the matching storage operation on the
//! blocking pool and renders the outcome. No recovery happens here; storage
//! errors go straight back to the client.

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Form, Multipart, Path as UrlPath, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router, middleware};
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::error::StorageError;
use crate::server::middleware::log_request;
use crate::server::responses::{
    ApiError, ListingResponse, MessageResponse, content_disposition, missing_parameter,
};
use crate::storage::FileStore;

/// Multipart framing allowance on top of the file size limit
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Top-level paths bound to operations. A directory with one of these names
/// directly under the root would be shadowed by the route, so the store
/// refuses to create one.
pub const ACTION_ROUTES: [&str; 5] = ["upload", "delete", "rename", "download", "mkdir"];

/// State shared by all routes
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FileStore>,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub dir: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub file: Option<String>,
    #[serde(default)]
    pub recursive: bool,
}

#[derive(Debug, Deserialize)]
pub struct RenameQuery {
    pub old: Option<String>,
    pub new: Option<String>,
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MkdirForm {
    #[serde(rename = "dirName")]
    pub dir_name: Option<String>,
    #[serde(default)]
    pub parents: bool,
}

/// Build the application router
pub fn router(state: AppState, max_upload_bytes: u64) -> Router {
    let body_limit = usize::try_from(max_upload_bytes.saturating_add(MULTIPART_OVERHEAD))
        .unwrap_or(usize::MAX);

    Router::new()
        .route("/", get(list_root))
        .route("/{*path}", get(list_path))
        .route("/upload", post(upload))
        .route("/delete", delete(delete_entry))
        .route("/rename", patch(rename))
        .route("/download", get(download))
        .route("/mkdir", put(mkdir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Run a storage operation on the blocking thread pool
async fn run_blocking<T, F>(operation: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(operation).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => Err(ApiError::from(StorageError::Io(std::io::Error::other(e)))),
    }
}

// An empty value passes through so path validation reports it
fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value.ok_or_else(|| missing_parameter(name))
}

/// GET / - list the storage root
async fn list_root(State(state): State<AppState>) -> Result<Json<ListingResponse>, ApiError> {
    list_directory(state, String::new()).await
}

/// GET /{path} - list a directory below the root
async fn list_path(
    State(state): State<AppState>,
    UrlPath(path): UrlPath<String>,
) -> Result<Json<ListingResponse>, ApiError> {
    list_directory(state, path).await
}

async fn list_directory(
    state: AppState,
    path: String,
) -> Result<Json<ListingResponse>, ApiError> {
    let store = Arc::clone(&state.store);
    let raw_path = path.clone();
    let entries = run_blocking(move || store.list(&raw_path)).await?;

    Ok(Json(ListingResponse {
        path: format!("/{}", path.trim_start_matches('/')),
        entries,
    }))
}

/// POST /upload - store the multipart field `file`
async fn upload(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let declared_name = field.file_name().unwrap_or_default().to_string();
        let content = field.bytes().await?;
        upload = Some((declared_name, content));
        break;
    }
    let (declared_name, content) = upload.ok_or_else(|| missing_parameter("file"))?;

    let store = Arc::clone(&state.store);
    let dir = query.dir.unwrap_or_default();
    let stored = run_blocking(move || store.upload_to(&dir, &declared_name, &content)).await?;

    let mut response = MessageResponse::new("uploaded").with_name(stored.name);
    response.size = Some(stored.size);
    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /delete?file=... - remove a file or directory
async fn delete_entry(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let file = required(query.file, "file")?;
    let recursive = query.recursive;

    let store = Arc::clone(&state.store);
    let target = file.clone();
    run_blocking(move || store.delete(&target, recursive)).await?;

    Ok(Json(
        MessageResponse::new("file deleted successfully").with_name(file),
    ))
}

/// PATCH /rename?old=...&new=... - rename within the same directory
async fn rename(
    State(state): State<AppState>,
    Query(query): Query<RenameQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (Some(old), Some(new)) = (query.old, query.new) else {
        return Err(missing_parameter("old and new"));
    };
    let overwrite = query.overwrite;

    let store = Arc::clone(&state.store);
    let renamed = run_blocking(move || store.rename(&old, &new, overwrite)).await?;

    Ok(Json(
        MessageResponse::new("file renamed successfully").with_name(renamed.name),
    ))
}

/// GET /download?path=... - stream a file as an attachment
async fn download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let path = required(query.path, "path")?;

    let store = Arc::clone(&state.store);
    let retrieved = run_blocking(move || store.download(&path)).await?;

    let file = tokio::fs::File::from_std(retrieved.file);
    let body = Body::from_stream(ReaderStream::new(file));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_LENGTH, retrieved.size.to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&retrieved.file_name),
            ),
        ],
        body,
    )
        .into_response())
}

/// PUT /mkdir - create the directory named by form field `dirName`
async fn mkdir(
    State(state): State<AppState>,
    Form(form): Form<MkdirForm>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let dir_name = required(form.dir_name, "dirName")?;
    let parents = form.parents;

    let store = Arc::clone(&state.store);
    let target = dir_name.clone();
    run_blocking(move || store.mkdir(&target, parents)).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Directory created successfully").with_name(dir_name)),
    ))
}
