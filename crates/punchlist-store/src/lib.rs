mod local;
mod sanitize;
#[cfg(feature = "spaces")]
mod spaces;

pub use local::LocalStore;
pub use sanitize::sanitize_filename;
#[cfg(feature = "spaces")]
pub use spaces::SpacesStore;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("store error: {0}")]
    Internal(String),
}

/// A store for attachment blobs keyed by sanitized filename.
///
/// `put` is create-or-overwrite: a second upload under the same key silently
/// replaces the first object. Objects are publicly readable and the declared
/// content type is stored verbatim.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write (create or overwrite) an object.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<(), StoreError>;

    /// Read an object back. Returns `StoreError::NotFound` if absent.
    async fn get(&self, key: &str) -> Result<Bytes, StoreError>;

    /// Delete an object. No-op if absent.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Public retrieval URL for a key: base endpoint + "/" + key.
    /// Deterministic; never verified to resolve.
    fn public_url(&self, key: &str) -> String;
}

// -- Configuration --

/// Deployment configuration for the attachment store.
pub struct StoreConfig {
    /// S3-compatible endpoint URL.
    pub endpoint_url: String,
    /// Region name (e.g., "sgp1").
    pub region: String,
    /// Bucket name.
    pub bucket: String,
    /// Spaces access key. Required unless the local backend is selected.
    pub access_key: Option<String>,
    /// Spaces secret key. Required unless the local backend is selected.
    pub secret_key: Option<String>,
    /// Base for public URLs; defaults to the endpoint.
    pub public_base: Option<String>,
    /// When set, use the local filesystem backend instead of Spaces.
    pub local_data_dir: Option<String>,
}

pub const DEFAULT_ENDPOINT: &str = "https://todo-app.sgp1.digitaloceanspaces.com";
pub const DEFAULT_REGION: &str = "sgp1";
pub const DEFAULT_BUCKET: &str = "todo-app";

impl StoreConfig {
    /// Build from environment variables. Endpoint, region, and bucket are
    /// fixed deployment values with overrides; credentials come from
    /// `DO_SPACES_KEY` / `DO_SPACES_SECRET`. Setting `PUNCHLIST_DATA_DIR`
    /// selects the local filesystem backend.
    pub fn from_env() -> Self {
        Self {
            endpoint_url: std::env::var("PUNCHLIST_S3_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.into()),
            region: std::env::var("PUNCHLIST_S3_REGION")
                .unwrap_or_else(|_| DEFAULT_REGION.into()),
            bucket: std::env::var("PUNCHLIST_S3_BUCKET")
                .unwrap_or_else(|_| DEFAULT_BUCKET.into()),
            access_key: std::env::var("DO_SPACES_KEY").ok(),
            secret_key: std::env::var("DO_SPACES_SECRET").ok(),
            public_base: std::env::var("PUNCHLIST_PUBLIC_BASE").ok(),
            local_data_dir: std::env::var("PUNCHLIST_DATA_DIR").ok(),
        }
    }

    pub(crate) fn public_base(&self) -> String {
        self.public_base
            .as_deref()
            .unwrap_or(&self.endpoint_url)
            .trim_end_matches('/')
            .to_string()
    }
}

// -- Factory --

/// Create an `ObjectStore` from configuration. Missing credentials are a
/// hard error so a misconfigured process fails before serving any request.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn ObjectStore>, StoreError> {
    if config.local_data_dir.is_some() {
        tracing::debug!("attachment store: local filesystem");
        return Ok(Arc::new(LocalStore::new(config)));
    }
    tracing::debug!("attachment store: spaces bucket {}", config.bucket);
    #[cfg(feature = "spaces")]
    {
        Ok(Arc::new(SpacesStore::new(config)?))
    }
    #[cfg(not(feature = "spaces"))]
    {
        Err(StoreError::MissingConfig(
            "built without the 'spaces' feature and no PUNCHLIST_DATA_DIR set".into(),
        ))
    }
}
