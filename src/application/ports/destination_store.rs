use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::ContainerTarget;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreHints {
    pub container: Option<ContainerTarget>,
    pub owner_id: Option<String>,
    /// The copy was produced by a background job rather than inline.
    pub async_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub handle: String,
    pub name: String,
}

#[async_trait]
pub trait DestinationStore: Send + Sync {
    async fn store(
        &self,
        title: &str,
        data: Bytes,
        hints: &StoreHints,
    ) -> Result<StoredDocument, DestinationStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DestinationStoreError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("upload session could not be opened: {0}")]
    SessionFailed(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}
