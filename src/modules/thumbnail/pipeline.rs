use bytes::Bytes;
use tracing::info;

use crate::common::collect::collect_stream;
use crate::infrastructure::storage::store::{ObjectStore, StoreError};

use super::codec;
use super::error::{JobError, JobErrorKind, Stage};
use super::resize;

/// Every thumbnail lands under this prefix in the destination bucket.
pub const DESTINATION_KEY_PREFIX: &str = "thumbnails/";

/// One unit of work: one source object transformed into one destination
/// object. The destination key is derived from the source key at
/// construction, so repeated delivery of the same message overwrites the same
/// object with the same bytes.
#[derive(Debug, Clone)]
pub struct Job {
    pub source_bucket: String,
    pub source_key: String,
    pub destination_bucket: String,
    pub destination_key: String,
}

impl Job {
    pub fn new(source_bucket: &str, source_key: &str, destination_bucket: &str) -> Self {
        Self {
            source_bucket: source_bucket.to_string(),
            source_key: source_key.to_string(),
            destination_bucket: destination_bucket.to_string(),
            destination_key: format!("{DESTINATION_KEY_PREFIX}{source_key}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredThumbnail {
    pub bucket: String,
    pub key: String,
    pub width: u32,
    pub height: u32,
}

struct Encoded {
    data: Bytes,
    width: u32,
    height: u32,
}

/// The fetch → decode → resize → encode → store state machine. Strictly
/// sequential, no internal retries; every failure is tagged with the stage it
/// happened in so the dispatcher can decide what to do with it.
#[derive(Clone, Debug)]
pub struct ThumbnailPipeline {
    pub target_width: u32,
    pub jpeg_quality: u8,
}

impl ThumbnailPipeline {
    pub fn new(target_width: u32, jpeg_quality: u8) -> Self {
        Self {
            target_width,
            jpeg_quality,
        }
    }

    pub async fn run<S: ObjectStore>(
        &self,
        store: &S,
        job: &Job,
    ) -> Result<StoredThumbnail, JobError> {
        // Fetching
        let stream = store
            .get(&job.source_bucket, &job.source_key)
            .await
            .map_err(fetch_error)?;
        let source_bytes = collect_stream(stream).await.map_err(fetch_error)?;

        info!(
            "⬇️ Fetched {} bytes from {}/{}",
            source_bytes.len(),
            job.source_bucket,
            job.source_key
        );

        // Decoding / Resizing / Encoding are CPU-bound; run them off the
        // async runtime.
        let target_width = self.target_width;
        let quality = self.jpeg_quality;
        let encoded =
            tokio::task::spawn_blocking(move || transform(&source_bytes, target_width, quality))
                .await
                .map_err(|e| {
                    JobError::new(
                        Stage::Encoding,
                        JobErrorKind::Encode(format!("transform task panicked: {e}")),
                    )
                })??;

        // Storing
        store
            .put(
                &job.destination_bucket,
                &job.destination_key,
                encoded.data,
                mime::IMAGE_JPEG.as_ref(),
            )
            .await
            .map_err(|e| JobError::new(Stage::Storing, JobErrorKind::Write(e.to_string())))?;

        info!(
            "✅ Stored {}x{} thumbnail at {}/{}",
            encoded.width, encoded.height, job.destination_bucket, job.destination_key
        );

        Ok(StoredThumbnail {
            bucket: job.destination_bucket.clone(),
            key: job.destination_key.clone(),
            width: encoded.width,
            height: encoded.height,
        })
    }
}

fn fetch_error(e: StoreError) -> JobError {
    let kind = match e {
        StoreError::NotFound => JobErrorKind::NotFound,
        other => JobErrorKind::Read(other.to_string()),
    };
    JobError::new(Stage::Fetching, kind)
}

// Each stage consumes the previous stage's output by value; nothing is
// aliased across stages.
fn transform(bytes: &[u8], target_width: u32, quality: u8) -> Result<Encoded, JobError> {
    let raster = codec::decode(bytes).map_err(|kind| JobError::new(Stage::Decoding, kind))?;

    let resized =
        resize::resize(raster, target_width).map_err(|kind| JobError::new(Stage::Resizing, kind))?;
    let (width, height) = (resized.width, resized.height);

    let data = codec::encode(resized, quality).map_err(|kind| JobError::new(Stage::Encoding, kind))?;

    Ok(Encoded {
        data,
        width,
        height,
    })
}
