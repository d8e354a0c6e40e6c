//! Shared test helpers: temporary application state and failing backends.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use bytes::Bytes;
use tower::ServiceExt;

use crate::config::{Config, ServerConfig, StorageConfig};
use crate::object_store::{LocalStore, ObjectStore, ObjectStoreError};
use crate::storage::models::{Class, Student};
use crate::storage::{Database, DatabaseError, Repository};
use crate::AppState;

/// Create a test AppState with a temporary database and local object store.
pub fn test_state(temp_dir: &tempfile::TempDir) -> Arc<AppState> {
    let config = test_config(temp_dir);
    let db = Database::open(&config.storage.data_dir).expect("Failed to open test database");
    let object_store = LocalStore::new(
        &config.storage.local_storage_path,
        &config.server.public_base_url,
    )
    .expect("Failed to create test object store");

    test_state_with(temp_dir, Arc::new(object_store), Arc::new(db))
}

/// Create a test AppState around the given backends.
pub fn test_state_with(
    temp_dir: &tempfile::TempDir,
    object_store: Arc<dyn ObjectStore>,
    repository: Arc<dyn Repository>,
) -> Arc<AppState> {
    let config = test_config(temp_dir);
    std::fs::create_dir_all(&config.storage.upload_dir).expect("Failed to create upload dir");

    Arc::new(AppState {
        config,
        object_store,
        repository,
    })
}

fn test_config(temp_dir: &tempfile::TempDir) -> Config {
    let dir = |name: &str| temp_dir.path().join(name).to_string_lossy().to_string();

    Config {
        server: ServerConfig::default(),
        storage: StorageConfig {
            data_dir: dir("data"),
            local_storage_path: dir("files"),
            upload_dir: dir("uploads"),
            ..Default::default()
        },
        max_upload_size: 1024 * 1024, // 1MB for tests
    }
}

/// Object store whose writes always fail.
pub struct FailingObjectStore;

#[async_trait]
impl ObjectStore for FailingObjectStore {
    async fn put(
        &self,
        _key: &str,
        _data: Bytes,
        _content_type: &str,
    ) -> Result<String, ObjectStoreError> {
        Err(ObjectStoreError::Backend("bucket unreachable".to_string()))
    }

    async fn get(&self, key: &str) -> Result<Bytes, ObjectStoreError> {
        Err(ObjectStoreError::NotFound(key.to_string()))
    }

    async fn exists(&self, _key: &str) -> Result<bool, ObjectStoreError> {
        Ok(false)
    }
}

/// Repository whose every operation fails.
pub struct FailingRepository;

fn unavailable() -> DatabaseError {
    DatabaseError::Io(std::io::Error::other("database unavailable"))
}

#[async_trait]
impl Repository for FailingRepository {
    async fn insert_student(&self, _student: Student) -> Result<Student, DatabaseError> {
        Err(unavailable())
    }

    async fn list_students(&self) -> Result<Vec<Student>, DatabaseError> {
        Err(unavailable())
    }

    async fn insert_class(&self, _class: Class) -> Result<Class, DatabaseError> {
        Err(unavailable())
    }

    async fn list_classes(&self) -> Result<Vec<Class>, DatabaseError> {
        Err(unavailable())
    }
}

// ============================================================================
// HTTP helpers
// ============================================================================

const BOUNDARY: &str = "student-projects-test-boundary";

/// One part of a multipart/form-data body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

/// Build a multipart/form-data POST request.
pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("valid multipart request")
}

/// Build a JSON POST request.
pub fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid json request")
}

/// Build a GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid get request")
}

/// Send one request through a fresh router.
pub async fn send(state: &Arc<AppState>, request: Request<Body>) -> Response {
    crate::api::create_router(Arc::clone(state))
        .oneshot(request)
        .await
        .expect("router is infallible")
}

pub async fn read_body(response: Response) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body")
}

pub async fn read_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&read_body(response).await).expect("json body")
}
