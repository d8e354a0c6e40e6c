use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

// ============================================================================
// Success bodies
// ============================================================================

/// `{"message": ...}` acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Json<Message> {
        Json(Message {
            message: message.into(),
        })
    }
}

/// `{"success": true, "data": ...}` envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Json<Envelope<T>> {
        Json(Envelope {
            success: true,
            data,
        })
    }
}

// ============================================================================
// Error bodies
// ============================================================================

/// `{"error": ...}` body used by the upload route
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `{"success": false, "message": ...}` body used by the class routes
#[derive(Debug, Serialize, Deserialize)]
pub struct FailureBody {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Unified error type for handlers
// ============================================================================

/// Handler error. Each route family keeps its own error body shape.
#[derive(Debug)]
pub enum ApiError {
    /// Rendered as `{"error": ...}`
    Upload(StatusCode, String),
    /// Rendered as `{"success": false, "message": ...}`
    Envelope(StatusCode, String),
    /// Rendered as a plain-text body
    Text(StatusCode, String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Upload(code, error) => (code, Json(ErrorBody { error })).into_response(),
            ApiError::Envelope(code, message) => (
                code,
                Json(FailureBody {
                    success: false,
                    message,
                }),
            )
                .into_response(),
            ApiError::Text(code, text) => (code, text).into_response(),
        }
    }
}

impl ApiError {
    pub fn upload(status: StatusCode, error: impl Into<String>) -> Self {
        ApiError::Upload(status, error.into())
    }

    pub fn envelope(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::Envelope(status, message.into())
    }

    pub fn text(status: StatusCode, text: impl Into<String>) -> Self {
        ApiError::Text(status, text.into())
    }
}

// ============================================================================
// Custom extractors
// ============================================================================

/// Drop-in replacement for `axum::Json` that rejects with a `{success: false}` body.
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, ApiError> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                let message = match rejection {
                    JsonRejection::JsonDataError(err) => {
                        format!("Invalid request body: {}", err.body_text())
                    }
                    JsonRejection::JsonSyntaxError(_) => "Malformed JSON in request body".into(),
                    JsonRejection::MissingJsonContentType(_) => {
                        "Missing Content-Type: application/json header".into()
                    }
                    _ => "Failed to read request body".into(),
                };
                Err(ApiError::envelope(StatusCode::BAD_REQUEST, message))
            }
        }
    }
}
