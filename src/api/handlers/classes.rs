use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::api::response::{ApiError, AppJson, Envelope};
use crate::storage::models::Class;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    #[serde(default)]
    pub name: Option<String>,
}

pub async fn create_class(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateClassRequest>,
) -> Result<(StatusCode, Json<Envelope<Class>>), ApiError> {
    let name = req
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::envelope(StatusCode::BAD_REQUEST, "name is required"))?;

    let class = state
        .repository
        .insert_class(Class::new(name))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create class");
            ApiError::envelope(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create class")
        })?;

    tracing::debug!(document_id = %class.document_id, name = %class.name, "Created class");

    Ok((StatusCode::CREATED, Envelope::success(class)))
}

pub async fn list_classes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Class>>, ApiError> {
    let classes = state.repository.list_classes().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list classes");
        ApiError::text(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    })?;

    Ok(Json(classes))
}
