use bytes::{BufMut, Bytes, BytesMut};
use futures_util::TryStreamExt;

use crate::infrastructure::storage::store::{ByteChunkStream, StoreError};

/// Drains a chunk stream into one contiguous buffer, preserving arrival
/// order. The total length is the sum of the chunk lengths. A mid-stream
/// error aborts the collection; no partial buffer is returned.
pub async fn collect_stream(mut stream: ByteChunkStream) -> Result<Bytes, StoreError> {
    let mut chunks: Vec<Bytes> = Vec::new();
    while let Some(chunk) = stream.try_next().await? {
        chunks.push(chunk);
    }

    let total: usize = chunks.iter().map(|c| c.len()).sum();
    let mut buffer = BytesMut::with_capacity(total);
    for chunk in &chunks {
        buffer.put_slice(chunk);
    }

    Ok(buffer.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn chunk_stream(chunks: Vec<Result<Bytes, StoreError>>) -> ByteChunkStream {
        Box::pin(stream::iter(chunks))
    }

    #[tokio::test]
    async fn concatenates_chunks_in_arrival_order() {
        let stream = chunk_stream(vec![
            Ok(Bytes::from_static(b"ab")),
            Ok(Bytes::from_static(b"cde")),
            Ok(Bytes::from_static(b"")),
            Ok(Bytes::from_static(b"f")),
        ]);

        let buf = collect_stream(stream).await.unwrap();
        assert_eq!(&buf[..], b"abcdef");
        assert_eq!(buf.len(), 6);
    }

    #[tokio::test]
    async fn empty_stream_yields_empty_buffer() {
        let buf = collect_stream(chunk_stream(vec![])).await.unwrap();
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn single_chunk_passes_through() {
        let stream = chunk_stream(vec![Ok(Bytes::from_static(b"hello"))]);
        let buf = collect_stream(stream).await.unwrap();
        assert_eq!(&buf[..], b"hello");
    }

    #[tokio::test]
    async fn mid_stream_error_propagates() {
        let stream = chunk_stream(vec![
            Ok(Bytes::from_static(b"ab")),
            Err(StoreError::Read("connection reset".to_string())),
            Ok(Bytes::from_static(b"cd")),
        ]);

        let err = collect_stream(stream).await.unwrap_err();
        assert!(matches!(err, StoreError::Read(_)));
    }
}
