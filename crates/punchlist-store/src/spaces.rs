use async_trait::async_trait;
use bytes::Bytes;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::region::Region;
use s3::Bucket;

use crate::{ObjectStore, StoreConfig, StoreError};

/// DigitalOcean Spaces (S3-compatible) attachment backend.
///
/// Every object is written with `x-amz-acl: public-read` so the returned
/// URL is directly fetchable.
pub struct SpacesStore {
    bucket: Box<Bucket>,
    public_base: String,
}

impl std::fmt::Debug for SpacesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpacesStore").finish_non_exhaustive()
    }
}

impl SpacesStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let access_key = config
            .access_key
            .as_deref()
            .ok_or_else(|| StoreError::MissingConfig("DO_SPACES_KEY".into()))?;
        let secret_key = config
            .secret_key
            .as_deref()
            .ok_or_else(|| StoreError::MissingConfig("DO_SPACES_SECRET".into()))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint_url.clone(),
        };

        let credentials = Credentials::new(Some(access_key), Some(secret_key), None, None, None)
            .map_err(|e| StoreError::Internal(format!("credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StoreError::Internal(format!("bucket: {e}")))?;
        bucket.set_path_style();
        bucket.add_header("x-amz-acl", "public-read");

        Ok(Self {
            bucket,
            public_base: config.public_base(),
        })
    }
}

fn map_s3_error(e: S3Error) -> StoreError {
    StoreError::Internal(format!("s3: {e}"))
}

#[async_trait]
impl ObjectStore for SpacesStore {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<(), StoreError> {
        self.bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(map_s3_error)?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        let response = self.bucket.get_object(key).await.map_err(map_s3_error)?;
        if response.status_code() == 404 {
            return Err(StoreError::NotFound(key.to_string()));
        }
        if response.status_code() >= 400 {
            return Err(StoreError::Internal(format!(
                "s3 get {}: status {}",
                key,
                response.status_code()
            )));
        }
        Ok(Bytes::from(response.to_vec()))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.bucket.delete_object(key).await.map_err(map_s3_error)?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}
