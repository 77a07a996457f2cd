use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use crate::{ObjectStore, StoreConfig, StoreError};

/// Filesystem attachment backend for development and tests.
///
/// Public URLs are relative (`/files/<key>`) and served by the server's
/// file route; content types are not persisted.
pub struct LocalStore {
    base_dir: PathBuf,
}

impl LocalStore {
    pub fn new(config: &StoreConfig) -> Self {
        let base_dir = config
            .local_data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("uploads"));
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn resolve(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(&self, key: &str, data: Bytes, _content_type: &str) -> Result<(), StoreError> {
        let path = self.resolve(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Internal(format!("mkdir: {e}")))?;
        }
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| StoreError::Internal(format!("write {}: {e}", path.display())))
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        let path = self.resolve(key);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(key.to_string()))
            }
            Err(e) => Err(StoreError::Internal(format!(
                "read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.resolve(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Internal(format!(
                "delete {}: {e}",
                path.display()
            ))),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("/files/{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(dir: &std::path::Path) -> LocalStore {
        let config = StoreConfig {
            endpoint_url: crate::DEFAULT_ENDPOINT.into(),
            region: crate::DEFAULT_REGION.into(),
            bucket: crate::DEFAULT_BUCKET.into(),
            access_key: None,
            secret_key: None,
            public_base: None,
            local_data_dir: Some(dir.to_string_lossy().to_string()),
        };
        LocalStore::new(&config)
    }

    #[tokio::test]
    async fn put_then_get_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        store
            .put("rent.pdf", Bytes::from("pdf bytes"), "application/pdf")
            .await
            .unwrap();
        let data = store.get("rent.pdf").await.unwrap();
        assert_eq!(data.as_ref(), b"pdf bytes");
    }

    #[tokio::test]
    async fn get_missing_returns_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        let err = store.get("nope.txt").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn put_overwrites_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        store
            .put("key", Bytes::from("first"), "text/plain")
            .await
            .unwrap();
        store
            .put("key", Bytes::from("second"), "text/plain")
            .await
            .unwrap();

        let data = store.get("key").await.unwrap();
        assert_eq!(data.as_ref(), b"second");
    }

    #[tokio::test]
    async fn delete_is_noop_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        store.delete("never-existed").await.unwrap();
    }

    #[tokio::test]
    async fn delete_removes_object() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());

        store
            .put("gone.txt", Bytes::from("x"), "text/plain")
            .await
            .unwrap();
        store.delete("gone.txt").await.unwrap();

        let err = store.get("gone.txt").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn public_url_is_relative_files_path() {
        let tmp = tempfile::tempdir().unwrap();
        let store = test_store(tmp.path());
        assert_eq!(store.public_url("rent.pdf"), "/files/rent.pdf");
    }
}
