use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    DestinationStore, DestinationStoreError, SourceMetadata, SourceStore, SourceStoreError,
    StoreHints, StoredDocument,
};
use crate::domain::ContainerTarget;
use crate::infrastructure::auth::TokenProvider;
use crate::infrastructure::observability::sanitize_upstream_body;

pub const DEFAULT_API_VERSION: &str = "v58.0";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ContentVersionRecord {
    title: String,
    content_document_id: Option<String>,
    content_size: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ContentVersionInsert<'a> {
    title: &'a str,
    path_on_client: String,
    version_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_publish_location_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_document_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner_id: Option<&'a str>,
    #[serde(rename = "Async_Comression__c")]
    async_compression: bool,
}

#[derive(Debug, Deserialize)]
struct InsertResponse {
    id: String,
}

/// Salesforce Files (ContentVersion) as both source and write-back target.
pub struct SalesforceStore {
    client: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
    data_url: String,
    max_payload_bytes: u64,
    request_timeout: Duration,
}

impl SalesforceStore {
    pub fn new(
        client: reqwest::Client,
        tokens: Arc<dyn TokenProvider>,
        instance_url: &str,
        api_version: &str,
        max_payload_bytes: u64,
        request_timeout: Duration,
    ) -> Self {
        Self {
            client,
            tokens,
            data_url: format!(
                "{}/services/data/{}/sobjects/ContentVersion",
                instance_url.trim_end_matches('/'),
                api_version
            ),
            max_payload_bytes,
            request_timeout,
        }
    }

    async fn bearer(&self) -> Result<String, SourceStoreError> {
        self.tokens
            .access_token()
            .await
            .map_err(|e| SourceStoreError::Auth(e.to_string()))
    }

    async fn source_error(response: reqwest::Response, source_ref: &str) -> SourceStoreError {
        let status = response.status();
        let body = sanitize_upstream_body(&response.text().await.unwrap_or_default());
        match status {
            StatusCode::NOT_FOUND => SourceStoreError::NotFound(source_ref.to_string()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                SourceStoreError::Auth(format!("{status}: {body}"))
            }
            _ => SourceStoreError::RequestFailed(format!("{status}: {body}")),
        }
    }
}

#[async_trait]
impl SourceStore for SalesforceStore {
    #[tracing::instrument(skip(self))]
    async fn fetch_metadata(&self, source_ref: &str) -> Result<SourceMetadata, SourceStoreError> {
        let token = self.bearer().await?;
        let response = self
            .client
            .get(format!("{}/{}", self.data_url, source_ref))
            .query(&[("fields", "Title,ContentDocumentId,ContentSize")])
            .bearer_auth(token)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| SourceStoreError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::source_error(response, source_ref).await);
        }

        let record: ContentVersionRecord = response
            .json()
            .await
            .map_err(|e| SourceStoreError::RequestFailed(format!("invalid metadata: {e}")))?;

        Ok(SourceMetadata {
            title: record.title,
            size: record.content_size,
            container_id: record.content_document_id,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_bytes(&self, source_ref: &str) -> Result<Bytes, SourceStoreError> {
        let token = self.bearer().await?;
        let response = self
            .client
            .get(format!("{}/{}/VersionData", self.data_url, source_ref))
            .bearer_auth(token)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| SourceStoreError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::source_error(response, source_ref).await);
        }

        let limit = self.max_payload_bytes;
        if let Some(size) = response.content_length().filter(|size| *size > limit) {
            return Err(SourceStoreError::TooLarge { size, limit });
        }

        let mut buffer = BytesMut::with_capacity(response.content_length().unwrap_or(0) as usize);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| SourceStoreError::RequestFailed(e.to_string()))?;
            let size = (buffer.len() + chunk.len()) as u64;
            if size > limit {
                return Err(SourceStoreError::TooLarge { size, limit });
            }
            buffer.extend_from_slice(&chunk);
        }

        tracing::debug!(bytes = buffer.len(), "Document downloaded from Salesforce");
        Ok(buffer.freeze())
    }
}

#[async_trait]
impl DestinationStore for SalesforceStore {
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

        let (first_publish_location_id, content_document_id) = match &hints.container {
            Some(ContainerTarget::Parent(id)) => (Some(id.as_str()), None),
            Some(ContainerTarget::Inherited(id)) => (None, Some(id.as_str())),
            None => (None, None),
        };

        let body = ContentVersionInsert {
            title,
            path_on_client: format!("{title}.pdf"),
            version_data: BASE64.encode(&data),
            first_publish_location_id,
            content_document_id,
            owner_id: hints.owner_id.as_deref(),
            async_compression: hints.async_run,
        };

        let response = self
            .client
            .post(&self.data_url)
            .bearer_auth(token)
            .json(&body)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| DestinationStoreError::UploadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = sanitize_upstream_body(&response.text().await.unwrap_or_default());
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    DestinationStoreError::Auth(format!("{status}: {body}"))
                }
                _ => DestinationStoreError::UploadFailed(format!("{status}: {body}")),
            });
        }

        let inserted: InsertResponse = response
            .json()
            .await
            .map_err(|e| DestinationStoreError::InvalidResponse(e.to_string()))?;

        tracing::info!(content_version_id = %inserted.id, "File saved to Salesforce");
        Ok(StoredDocument {
            handle: inserted.id,
            name: title.to_string(),
        })
    }
}
