use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMetadata {
    pub title: String,
    pub size: Option<u64>,
    pub container_id: Option<String>,
}

#[async_trait]
pub trait SourceStore: Send + Sync {
    async fn fetch_metadata(&self, source_ref: &str) -> Result<SourceMetadata, SourceStoreError>;

    async fn fetch_bytes(&self, source_ref: &str) -> Result<Bytes, SourceStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceStoreError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("payload of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
    #[error("request failed: {0}")]
    RequestFailed(String),
}
