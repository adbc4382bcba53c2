use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use thiserror::Error;

/// Pull-style byte source handed back by [`ObjectStore::get`]. Chunk sizes
/// and total length are unknown ahead of time.
pub type ByteChunkStream = BoxStream<'static, Result<Bytes, StoreError>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object not found")]
    NotFound,
    #[error("read from object store failed: {0}")]
    Read(String),
    #[error("write to object store failed: {0}")]
    Write(String),
}

/// The blob-store surface the pipeline depends on. Implemented by the real
/// S3 client and by the in-memory store used in tests.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get(&self, bucket: &str, key: &str) -> Result<ByteChunkStream, StoreError>;

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StoreError>;
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use bytes::Bytes;
    use futures_util::stream;

    use super::{ByteChunkStream, ObjectStore, StoreError};

    /// In-memory object store for pipeline and worker tests.
    #[derive(Default)]
    pub struct MockStore {
        objects: Mutex<HashMap<(String, String), (Bytes, String)>>,
        /// When set, every `put` fails with a transient write error.
        pub fail_writes: bool,
        /// Chunk size for `get` streams; 0 returns the object as one chunk.
        pub chunk_size: usize,
        get_calls: AtomicUsize,
    }

    impl MockStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&self, bucket: &str, key: &str, data: Bytes) {
            self.objects
                .lock()
                .unwrap()
                .insert((bucket.to_string(), key.to_string()), (data, String::new()));
        }

        /// Returns the stored body and content type, if any.
        pub fn stored(&self, bucket: &str, key: &str) -> Option<(Bytes, String)> {
            self.objects
                .lock()
                .unwrap()
                .get(&(bucket.to_string(), key.to_string()))
                .cloned()
        }

        pub fn get_calls(&self) -> usize {
            self.get_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ObjectStore for MockStore {
        async fn get(&self, bucket: &str, key: &str) -> Result<ByteChunkStream, StoreError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);

            let data = self
                .objects
                .lock()
                .unwrap()
                .get(&(bucket.to_string(), key.to_string()))
                .map(|(data, _)| data.clone())
                .ok_or(StoreError::NotFound)?;

            let size = if self.chunk_size == 0 {
                data.len().max(1)
            } else {
                self.chunk_size
            };
            let chunks: Vec<Result<Bytes, StoreError>> = data
                .chunks(size)
                .map(|c| Ok(Bytes::copy_from_slice(c)))
                .collect();

            Ok(Box::pin(stream::iter(chunks)))
        }

        async fn put(
            &self,
            bucket: &str,
            key: &str,
            body: Bytes,
            content_type: &str,
        ) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError::Write("injected write failure".to_string()));
            }

            self.objects.lock().unwrap().insert(
                (bucket.to_string(), key.to_string()),
                (body, content_type.to_string()),
            );
            Ok(())
        }
    }
}
