use async_trait::async_trait;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::{Client, config::BehaviorVersion, config::Credentials, config::Region};
use bytes::Bytes;
use futures_util::stream;
use tracing::info;

use crate::infrastructure::storage::store::{ByteChunkStream, ObjectStore, StoreError};

#[derive(Clone)]
pub struct StorageService {
    pub client: Client,
}

impl StorageService {
    pub async fn new(endpoint: &str, region: &str, access_key: &str, secret_key: &str) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "static");

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .force_path_style(true) // Required for MinIO / R2 style endpoints
            .build();

        let client = Client::from_conf(config);

        info!("✅ Connected to S3-compatible object store");

        Self { client }
    }
}

#[async_trait]
impl ObjectStore for StorageService {
    async fn get(&self, bucket: &str, key: &str) -> Result<ByteChunkStream, StoreError> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    StoreError::NotFound
                } else {
                    StoreError::Read(e.to_string())
                }
            })?;

        // Surface the paged SDK body as a plain chunk stream.
        let chunks = stream::unfold(resp.body, |mut body| async move {
            match body.next().await {
                Some(Ok(chunk)) => Some((Ok(chunk), body)),
                Some(Err(e)) => Some((Err(StoreError::Read(e.to_string())), body)),
                None => None,
            }
        });

        Ok(Box::pin(chunks))
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(aws_sdk_s3::primitives::ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        Ok(())
    }
}
