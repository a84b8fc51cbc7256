use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    DestinationStore, DestinationStoreError, StoreHints, StoredDocument,
};
use crate::domain::ContainerTarget;
use crate::infrastructure::auth::TokenProvider;
use crate::infrastructure::observability::sanitize_upstream_body;

pub const DEFAULT_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";
const PDF_MIME: &str = "application/pdf";
const UPLOAD_CHUNK_BYTES: usize = 256 * 1024;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata<'a> {
    name: &'a str,
    mime_type: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    parents: Vec<&'a str>,
}

#[derive(Deserialize)]
struct UploadedFile {
    id: String,
    name: String,
}

/// Tracks bytes sent against the total and reports each 10% step once.
pub struct UploadProgress {
    total: u64,
    sent: AtomicU64,
    last_decile: AtomicU8,
}

impl UploadProgress {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            sent: AtomicU64::new(0),
            last_decile: AtomicU8::new(0),
        }
    }

    /// Records `len` more bytes. Returns the percentage when a new 10% step
    /// has been crossed.
    pub fn advance(&self, len: u64) -> Option<u8> {
        let sent = self.sent.fetch_add(len, Ordering::Relaxed) + len;
        let percent = if self.total == 0 {
            100
        } else {
            (sent.min(self.total) * 100 / self.total) as u8
        };
        let decile = percent / 10;
        let previous = self.last_decile.fetch_max(decile, Ordering::Relaxed);
        (decile > previous).then_some(decile * 10)
    }
}

/// Google Drive resumable upload: one initiation call opens a session, the
/// payload is then streamed to the session URL in a single PUT.
pub struct GoogleDriveStore {
    client: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
    upload_url: String,
    upload_timeout: Duration,
}

impl GoogleDriveStore {
    pub fn new(
        client: reqwest::Client,
        tokens: Arc<dyn TokenProvider>,
        upload_url: Option<String>,
        upload_timeout: Duration,
    ) -> Self {
        Self {
            client,
            tokens,
            upload_url: upload_url.unwrap_or_else(|| DEFAULT_UPLOAD_URL.to_string()),
            upload_timeout,
        }
    }

    async fn open_session(
        &self,
        token: &str,
        title: &str,
        size: u64,
        hints: &StoreHints,
    ) -> Result<String, DestinationStoreError> {
        // Inherited containers belong to the source system and mean nothing here.
        let parents = match &hints.container {
            Some(ContainerTarget::Parent(folder_id)) => vec![folder_id.as_str()],
            _ => Vec::new(),
        };
        let metadata = FileMetadata {
            name: title,
            mime_type: PDF_MIME,
            parents,
        };

        let response = self
            .client
            .post(&self.upload_url)
            .query(&[("uploadType", "resumable")])
            .bearer_auth(token)
            .header("X-Upload-Content-Type", PDF_MIME)
            .header("X-Upload-Content-Length", size)
            .json(&metadata)
            .send()
            .await
            .map_err(|e| DestinationStoreError::SessionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = sanitize_upstream_body(&response.text().await.unwrap_or_default());
            return Err(DestinationStoreError::SessionFailed(format!("{status}: {body}")));
        }

        response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or_else(|| {
                DestinationStoreError::SessionFailed("response carried no session location".into())
            })
    }
}

#[async_trait]
impl DestinationStore for GoogleDriveStore {
    #[tracing::instrument(skip(self, data, hints), fields(bytes = data.len()))]
    async fn store(
        &self,
        title: &str,
        data: Bytes,
        hints: &StoreHints,
    ) -> Result<StoredDocument, DestinationStoreError> {
        let token = self
            .tokens
            .access_token()
            .await
            .map_err(|e| DestinationStoreError::Auth(e.to_string()))?;

        let size = data.len() as u64;
        let session_url = self.open_session(&token, title, size, hints).await?;
        tracing::debug!("Upload session created");

        let progress = Arc::new(UploadProgress::new(size));
        let chunks: Vec<Bytes> = (0..data.len())
            .step_by(UPLOAD_CHUNK_BYTES)
            .map(|start| data.slice(start..(start + UPLOAD_CHUNK_BYTES).min(data.len())))
            .collect();
        let body_stream = stream::iter(chunks.into_iter().map(move |chunk| {
            if let Some(percent) = progress.advance(chunk.len() as u64) {
                tracing::info!(percent, "Upload progress");
            }
            Ok::<Bytes, std::io::Error>(chunk)
        }));

        let response = self
            .client
            .put(&session_url)
            .header(CONTENT_TYPE, PDF_MIME)
            .header(CONTENT_LENGTH, size)
            .body(reqwest::Body::wrap_stream(body_stream))
            .timeout(self.upload_timeout)
            .send()
            .await
            .map_err(|e| DestinationStoreError::UploadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = sanitize_upstream_body(&response.text().await.unwrap_or_default());
            return Err(DestinationStoreError::UploadFailed(format!("{status}: {body}")));
        }

        let uploaded: UploadedFile = response
            .json()
            .await
            .map_err(|e| DestinationStoreError::InvalidResponse(e.to_string()))?;

        tracing::info!(file_id = %uploaded.id, name = %uploaded.name, "File uploaded to Google Drive");
        Ok(StoredDocument {
            handle: uploaded.id,
            name: uploaded.name,
        })
    }
}
