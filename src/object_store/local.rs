use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

use super::{ObjectStore, ObjectStoreError};

/// Local filesystem object store for development and testing.
/// Objects are served back by the `/files/:key` route under `public_base_url`.
pub struct LocalStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(
        base_path: P,
        public_base_url: &str,
    ) -> Result<Self, std::io::Error> {
        let base_path = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self {
            base_path,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Keys are flat file names; anything that could leave `base_path` is refused.
    fn object_path(&self, key: &str) -> Option<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return None;
        }
        Some(self.base_path.join(key))
    }

    fn location(&self, key: &str) -> String {
        format!("{}/files/{}", self.public_base_url, urlencoding::encode(key))
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        _content_type: &str,
    ) -> Result<String, ObjectStoreError> {
        let path = self
            .object_path(key)
            .ok_or_else(|| ObjectStoreError::Backend(format!("Invalid object key: {key}")))?;
        tokio::fs::write(&path, &data).await?;
        Ok(self.location(key))
    }

    async fn get(&self, key: &str) -> Result<Bytes, ObjectStoreError> {
        let path = match self.object_path(key) {
            Some(path) if path.is_file() => path,
            _ => return Err(ObjectStoreError::NotFound(key.to_string())),
        };
        let data = tokio::fs::read(&path).await?;
        Ok(Bytes::from(data))
    }

    async fn exists(&self, key: &str) -> Result<bool, ObjectStoreError> {
        Ok(self.object_path(key).is_some_and(|path| path.is_file()))
    }
}
