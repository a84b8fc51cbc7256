use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use crate::application::ports::{DestinationStore, SourceStore};
use crate::infrastructure::auth::{GoogleTokenProvider, SalesforceTokenProvider};
use crate::presentation::config::{Settings, StoreProvider};

use super::google_drive_store::GoogleDriveStore;
use super::mock_store::{MockDestinationStore, MockSourceStore};
use super::salesforce_store::SalesforceStore;

const MOCK_DOCUMENT: &[u8] = b"%PDF-1.4\n% mock document\n%%EOF\n";

/// Adapters for both transfer kinds. Compress jobs read from and write back
/// to the same system; relay jobs read there and write to the drive.
pub struct Stores {
    pub source: Arc<dyn SourceStore>,
    pub write_back: Arc<dyn DestinationStore>,
    pub drive: Arc<dyn DestinationStore>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreFactoryError {
    #[error("{0} settings required for the remote store provider")]
    MissingSettings(&'static str),
    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
}

pub struct StoreFactory;

impl StoreFactory {
    pub fn create(settings: &Settings) -> Result<Stores, StoreFactoryError> {
        match settings.stores.provider {
            StoreProvider::Mock => {
                tracing::warn!("Using mock document stores");
                Ok(Stores {
                    source: Arc::new(MockSourceStore::new(
                        "mock-document",
                        Bytes::from_static(MOCK_DOCUMENT),
                    )),
                    write_back: Arc::new(MockDestinationStore::new()),
                    drive: Arc::new(MockDestinationStore::new()),
                })
            }
            StoreProvider::Remote => {
                let salesforce = settings
                    .salesforce
                    .as_ref()
                    .ok_or(StoreFactoryError::MissingSettings("salesforce"))?;
                let google = settings
                    .google_drive
                    .as_ref()
                    .ok_or(StoreFactoryError::MissingSettings("google_drive"))?;

                let client = reqwest::Client::builder()
                    .connect_timeout(Duration::from_secs(10))
                    .build()?;

                let salesforce_tokens = Arc::new(SalesforceTokenProvider::new(
                    client.clone(),
                    &salesforce.instance_url,
                    salesforce.client_id.clone(),
                    salesforce.client_secret.clone(),
                ));
                let salesforce_store = Arc::new(SalesforceStore::new(
                    client.clone(),
                    salesforce_tokens,
                    &salesforce.instance_url,
                    &salesforce.api_version,
                    salesforce.max_payload_bytes(),
                    Duration::from_secs(salesforce.fetch_timeout_secs),
                ));

                let google_tokens = Arc::new(GoogleTokenProvider::new(
                    client.clone(),
                    google.token_url.clone(),
                    google.client_id.clone(),
                    google.client_secret.clone(),
                    google.refresh_token.clone(),
                ));
                let drive = Arc::new(GoogleDriveStore::new(
                    client,
                    google_tokens,
                    google.upload_url.clone(),
                    Duration::from_secs(google.upload_timeout_secs),
                ));

                tracing::info!(
                    instance_url = %salesforce.instance_url,
                    "Remote document stores configured"
                );
                Ok(Stores {
                    source: salesforce_store.clone(),
                    write_back: salesforce_store,
                    drive,
                })
            }
        }
    }
}
