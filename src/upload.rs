//! Upload-and-persist workflow for student project files.
//!
//! The file is written to the object store first, then a student document
//! pointing at the returned location is inserted. The two steps are not atomic:
//! when the insert fails the blob is left in place.

use bytes::Bytes;
use thiserror::Error;

use crate::object_store::{ObjectStore, ObjectStoreError};
use crate::storage::models::Student;
use crate::storage::{DatabaseError, Repository};

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("id must be an integer, got '{0}'")]
    InvalidId(String),
    #[error("projectFile must be a file upload with a filename")]
    MissingFileName,
    #[error("projectFile must not be empty")]
    EmptyFile,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    Store(#[from] ObjectStoreError),
    #[error("Object store returned no location for {key}")]
    EmptyLocation { key: String },
    /// The blob at `location` was stored but no document references it.
    #[error("{source}")]
    Persist {
        location: String,
        source: DatabaseError,
    },
}

/// The uploaded project file as received from the client.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Raw add-student form fields, before validation.
#[derive(Debug, Default)]
pub struct StudentForm {
    pub name: Option<String>,
    pub id: Option<String>,
    pub project_file: Option<ProjectFile>,
}

/// A validated add-student request.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub id: i64,
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl StudentForm {
    /// Check required fields before any I/O happens.
    pub fn validate(self) -> Result<Submission, ValidationError> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(ValidationError::MissingField("name"))?;

        let raw_id = self
            .id
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .ok_or(ValidationError::MissingField("id"))?;
        let id = raw_id
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidId(raw_id.clone()))?;

        let file = self
            .project_file
            .ok_or(ValidationError::MissingField("projectFile"))?;
        let file_name = file
            .file_name
            .as_deref()
            .map(base_name)
            .filter(|n| !n.is_empty())
            .ok_or(ValidationError::MissingFileName)?
            .to_string();
        if file.data.is_empty() {
            return Err(ValidationError::EmptyFile);
        }

        // Prefer the client's Content-Type, then guess from the filename
        let content_type = file
            .content_type
            .filter(|ct| ct != "application/octet-stream")
            .or_else(|| {
                mime_guess::from_path(&file_name)
                    .first()
                    .map(|m| m.to_string())
            })
            .unwrap_or_else(|| "application/octet-stream".to_string());

        Ok(Submission {
            name,
            id,
            file_name,
            content_type,
            data: file.data,
        })
    }
}

/// Last path segment of a client-supplied filename.
fn base_name(file_name: &str) -> &str {
    file_name.rsplit(['/', '\\']).next().unwrap_or(file_name).trim()
}

/// Fresh object key: a random UUID prefix keeps keys unique, the filename keeps them readable.
pub fn object_key(file_name: &str) -> String {
    format!("{}-{}", uuid::Uuid::new_v4(), base_name(file_name))
}

/// Store the project file, then record the student. Returns the stored document.
pub async fn upload_and_record(
    object_store: &dyn ObjectStore,
    repository: &dyn Repository,
    submission: Submission,
) -> Result<Student, UploadError> {
    let key = object_key(&submission.file_name);
    let byte_size = submission.data.len();

    // Step 1: object store. Nothing is recorded if this fails.
    let location = object_store
        .put(&key, submission.data, &submission.content_type)
        .await?;
    if location.trim().is_empty() {
        tracing::warn!(key = %key, "Object store returned an empty location");
        return Err(UploadError::EmptyLocation { key });
    }

    tracing::debug!(key = %key, bytes = byte_size, location = %location, "Stored project file");

    // Step 2: student document
    let student = Student::new(submission.name, submission.id, location.clone());
    match repository.insert_student(student).await {
        Ok(student) => {
            tracing::debug!(
                student_id = student.id,
                document_id = %student.document_id,
                "Created student"
            );
            Ok(student)
        }
        Err(source) => {
            tracing::warn!(
                location = %location,
                error = %source,
                "Student not saved; project file left orphaned"
            );
            Err(UploadError::Persist { location, source })
        }
    }
}
