use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::response::{ApiError, Message};
use crate::upload::object_key;
use crate::AppState;

/// Echo endpoint for checking what a client sends.
/// Logs the `name`, `number` and `class` fields and request headers, and writes
/// the `reqfile` part into the scratch upload directory.
pub async fn echo_upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Message>, ApiError> {
    let mut multipart =
        multipart.map_err(|e| ApiError::text(StatusCode::BAD_REQUEST, e.body_text()))?;

    let mut name: Option<String> = None;
    let mut number: Option<String> = None;
    let mut class: Option<String> = None;
    let mut saved: Option<(PathBuf, usize)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::text(e.status(), e.body_text()))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "reqfile" => {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .unwrap_or("reqfile")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::text(e.status(), e.body_text()))?;

                let path =
                    PathBuf::from(&state.config.storage.upload_dir).join(object_key(&file_name));
                tokio::fs::write(&path, &data).await.map_err(|e| {
                    tracing::error!(
                        path = %path.display(),
                        error = %e,
                        "Failed to write scratch upload"
                    );
                    ApiError::text(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
                })?;
                saved = Some((path, data.len()));
            }
            "name" | "number" | "class" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::text(e.status(), e.body_text()))?;
                match field_name.as_str() {
                    "name" => name = Some(value),
                    "number" => number = Some(value),
                    _ => class = Some(value),
                }
            }
            _ => {}
        }
    }

    tracing::info!(
        name = ?name,
        number = ?number,
        class = ?class,
        file = ?saved.as_ref().map(|(path, _)| path.display().to_string()),
        bytes = saved.as_ref().map(|(_, len)| *len).unwrap_or(0),
        headers = ?headers,
        "Diagnostic upload received"
    );

    Ok(Message::new("Data received successfully."))
}

#[cfg(test)]
mod tests {
    use crate::testutil::*;
    use axum::http::StatusCode;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// In-memory sink for formatted log lines.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    #[tokio::test]
    async fn test_echo_writes_scratch_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let parts = vec![
            Part::Text("name", "Ada"),
            Part::Text("number", "12"),
            Part::Text("class", "Math"),
            Part::File {
                name: "reqfile",
                file_name: "notes.txt",
                content_type: "text/plain",
                data: b"hello",
            },
        ];
        let response = send(&state, multipart_request("/deneme", &parts)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            serde_json::json!({"message": "Data received successfully."})
        );

        let entries: Vec<_> = std::fs::read_dir(dir.path().join("uploads"))
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].to_string_lossy().ends_with("-notes.txt"));
        assert_eq!(std::fs::read(&entries[0]).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_echo_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let response = send(
            &state,
            multipart_request("/deneme", &[Part::Text("name", "Ada")]),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let entries = std::fs::read_dir(dir.path().join("uploads")).unwrap().count();
        assert_eq!(entries, 0);
    }

    #[tokio::test]
    async fn test_echo_logs_headers_at_info() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let response = send(
            &state,
            multipart_request("/deneme", &[Part::Text("name", "Ada")]),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let logs = logs.contents();
        assert!(logs.contains("Diagnostic upload received"));
        assert!(logs.contains("multipart/form-data"));
    }
}
