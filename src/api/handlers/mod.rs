mod admin;
mod classes;
mod diagnostics;
mod files;
mod students;

pub use admin::health;
pub use classes::{create_class, list_classes};
pub use diagnostics::echo_upload;
pub use files::serve_file;
pub use students::{add_student, list_students};

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use crate::api::response::ApiError;

/// Map a multipart read failure to an upload error, keeping 413 for oversized bodies.
fn multipart_error(e: MultipartError) -> ApiError {
    let status = match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    ApiError::upload(status, e.body_text())
}
