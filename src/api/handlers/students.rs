use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use bytes::Bytes;
use std::sync::Arc;

use super::multipart_error;
use crate::api::response::{ApiError, Message};
use crate::storage::models::Student;
use crate::upload::{self, ProjectFile, StudentForm};
use crate::AppState;

pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state.repository.list_students().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list students");
        ApiError::text(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;

    Ok(Json(students))
}

/// Multipart fields: `name`, `id`, and the `projectFile` file part.
pub async fn add_student(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let mut multipart = multipart
        .map_err(|e| ApiError::upload(StatusCode::INTERNAL_SERVER_ERROR, e.body_text()))?;

    let mut form = StudentForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "projectFile" => {
                let file_name = field.file_name().map(|s| s.to_string());
                let content_type = field.content_type().map(|s| s.to_string());
                let data: Bytes = field.bytes().await.map_err(multipart_error)?;

                form.project_file = Some(ProjectFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            "name" => form.name = Some(field.text().await.map_err(multipart_error)?),
            "id" => form.id = Some(field.text().await.map_err(multipart_error)?),
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let submission = form
        .validate()
        .map_err(|e| ApiError::upload(StatusCode::BAD_REQUEST, e.to_string()))?;

    upload::upload_and_record(
        state.object_store.as_ref(),
        state.repository.as_ref(),
        submission,
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to add student");
        ApiError::upload(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Message::new("Student added successfully."),
    ))
}
