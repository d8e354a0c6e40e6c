use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::config::StorageBackend;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_size as usize;

    let mut router = Router::new()
        // Students
        .route("/students", get(handlers::list_students))
        .route(
            "/add-student",
            post(handlers::add_student).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Classes
        .route("/classes", get(handlers::list_classes))
        .route("/create-class", post(handlers::create_class))
        // Diagnostics
        .route(
            "/deneme",
            post(handlers::echo_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Internal
        .route("/_internal/health", get(handlers::health));

    // Local blobs are only reachable through this server
    if state.config.storage.backend == StorageBackend::Local {
        router = router.route("/files/:key", get(handlers::serve_file));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
