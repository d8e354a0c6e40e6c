use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    /// Maximum upload size in bytes
    pub max_upload_size: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_host: String,
    pub port: u16,
    /// Base URL clients use to reach this server; prefixes local blob locations.
    pub public_base_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Local,
    S3,
}

#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// S3-compatible endpoint (MinIO, LocalStack). Enables path-style addressing.
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory holding the redb database file
    pub data_dir: String,
    /// Directory for local storage backend
    pub local_storage_path: String,
    /// Scratch directory for the diagnostic upload route
    pub upload_dir: String,
    /// Required when backend is s3
    pub s3: Option<S3Config>,
}

pub const DEFAULT_PORT: u16 = 7373;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            public_base_url: format!("http://localhost:{DEFAULT_PORT}"),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            data_dir: "./data".to_string(),
            local_storage_path: "./files".to_string(),
            upload_dir: "./uploads".to_string(),
            s3: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_host = var("BIND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match var("PORT") {
            Some(p) => p.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("PORT '{p}' is not a valid port"))
            })?,
            None => DEFAULT_PORT,
        };

        let public_base_url = var("PUBLIC_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        let max_upload_size = var("MAX_UPLOAD_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(50 * 1024 * 1024); // 50MB

        let backend = match var("STORAGE_BACKEND")
            .unwrap_or_else(|| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "s3" => StorageBackend::S3,
            _ => StorageBackend::Local,
        };

        let s3 = var("AWS_BUCKET_NAME").map(|bucket| S3Config {
            bucket,
            region: var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            endpoint: var("AWS_ENDPOINT_URL").map(|e| e.trim_end_matches('/').to_string()),
        });

        let config = Config {
            server: ServerConfig {
                bind_host,
                port,
                public_base_url,
            },
            storage: StorageConfig {
                backend,
                data_dir: var("DATA_DIR").unwrap_or_else(|| "./data".to_string()),
                local_storage_path: var("LOCAL_STORAGE_PATH")
                    .unwrap_or_else(|| "./files".to_string()),
                upload_dir: var("UPLOAD_DIR").unwrap_or_else(|| "./uploads".to_string()),
                s3,
            },
            max_upload_size,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "PORT must be greater than 0".to_string(),
            ));
        }

        if self.storage.backend == StorageBackend::S3 {
            match self.storage.s3 {
                None => {
                    return Err(ConfigError::ValidationError(
                        "AWS_BUCKET_NAME is required when STORAGE_BACKEND=s3".to_string(),
                    ));
                }
                Some(ref s3) if s3.bucket.trim().is_empty() => {
                    return Err(ConfigError::ValidationError(
                        "AWS_BUCKET_NAME cannot be empty".to_string(),
                    ));
                }
                Some(_) => {}
            }
        }

        if !self.server.public_base_url.starts_with("http://")
            && !self.server.public_base_url.starts_with("https://")
        {
            return Err(ConfigError::ValidationError(format!(
                "PUBLIC_BASE_URL '{}' must be an http(s) URL",
                self.server.public_base_url
            )));
        }

        if self.max_upload_size == 0 {
            tracing::warn!("MAX_UPLOAD_SIZE is 0; every upload will be rejected");
        }

        Ok(())
    }

    /// Socket address string to bind the HTTP listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.bind_host, self.server.port)
    }
}
