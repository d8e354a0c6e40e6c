use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::api::response::ApiError;
use crate::object_store::ObjectStoreError;
use crate::AppState;

/// Serve a stored project file by object key.
/// Route: GET /files/:key (local storage backend only)
pub async fn serve_file(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let data = state.object_store.get(&key).await.map_err(|e| match e {
        ObjectStoreError::NotFound(_) => ApiError::upload(StatusCode::NOT_FOUND, "File not found"),
        _ => ApiError::upload(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to retrieve file: {e}"),
        ),
    })?;

    let content_type = mime_guess::from_path(&key)
        .first_or_octet_stream()
        .to_string();

    let mut response = (StatusCode::OK, data).into_response();
    let headers = response.headers_mut();

    headers.insert(
        header::CONTENT_TYPE,
        content_type
            .parse()
            .unwrap_or(header::HeaderValue::from_static("application/octet-stream")),
    );

    // Keys are never reused, so the content behind one never changes
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("public, max-age=31536000, immutable"),
    );

    Ok(response)
}
