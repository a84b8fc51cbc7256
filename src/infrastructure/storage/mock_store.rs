use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::application::ports::{
    DestinationStore, DestinationStoreError, SourceMetadata, SourceStore, SourceStoreError,
    StoreHints, StoredDocument,
};

/// Serves one fixed document for any reference.
pub struct MockSourceStore {
    title: String,
    data: Bytes,
    reported_size: Option<u64>,
    container_id: Option<String>,
}

impl MockSourceStore {
    pub fn new(title: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            title: title.into(),
            reported_size: Some(data.len() as u64),
            data,
            container_id: None,
        }
    }

    /// Overrides the size answered by the metadata probe; `None` simulates a
    /// store that does not report sizes.
    pub fn with_reported_size(mut self, size: Option<u64>) -> Self {
        self.reported_size = size;
        self
    }

    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }
}

#[async_trait]
impl SourceStore for MockSourceStore {
    async fn fetch_metadata(&self, _source_ref: &str) -> Result<SourceMetadata, SourceStoreError> {
        Ok(SourceMetadata {
            title: self.title.clone(),
            size: self.reported_size,
            container_id: self.container_id.clone(),
        })
    }

    async fn fetch_bytes(&self, _source_ref: &str) -> Result<Bytes, SourceStoreError> {
        Ok(self.data.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredCall {
    pub title: String,
    pub size: usize,
    pub hints: StoreHints,
}

/// Accepts every upload and remembers what it was given.
#[derive(Default)]
pub struct MockDestinationStore {
    calls: Mutex<Vec<StoredCall>>,
}

impl MockDestinationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<StoredCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DestinationStore for MockDestinationStore {
    async fn store(
        &self,
        title: &str,
        data: Bytes,
        hints: &StoreHints,
    ) -> Result<StoredDocument, DestinationStoreError> {
        let mut calls = self
            .calls
            .lock()
            .map_err(|_| DestinationStoreError::UploadFailed("mock store poisoned".into()))?;
        calls.push(StoredCall {
            title: title.to_string(),
            size: data.len(),
            hints: hints.clone(),
        });
        Ok(StoredDocument {
            handle: format!("mock-{}", calls.len()),
            name: title.to_string(),
        })
    }
}
