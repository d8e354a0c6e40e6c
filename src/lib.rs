//! student-projects - Student project file uploads backed by object storage
//!
//! This crate provides:
//! - Multipart upload of project files to a swappable object store (S3, local filesystem)
//! - Student and class documents in a redb embedded database
//! - REST API for listing students, creating and listing classes

pub mod api;
pub mod config;
pub mod object_store;
pub mod storage;
#[cfg(test)]
pub mod testutil;
pub mod upload;

use std::sync::Arc;

use config::Config;
use storage::Repository;

/// Shared application state, built once at startup and injected into handlers
pub struct AppState {
    pub config: Config,
    pub object_store: Arc<dyn object_store::ObjectStore>,
    pub repository: Arc<dyn Repository>,
}
