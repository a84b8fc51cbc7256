use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Job, JobId, JobPatch, TransferRequest};

/// Single source of truth for job visibility. Holds params and small result
/// metadata only, never document bytes.
#[async_trait]
pub trait JobRegistry: Send + Sync {
    async fn create(&self, params: TransferRequest) -> Result<JobId, RegistryError>;

    async fn get(&self, id: JobId) -> Result<Option<Job>, RegistryError>;

    /// Merges `patch` into the record. Unknown or already swept ids are a
    /// silent no-op; the return value tells whether the record changed.
    async fn update(&self, id: JobId, patch: JobPatch) -> Result<bool, RegistryError>;

    /// Schedules removal of the record once `after` has elapsed.
    async fn sweep(&self, id: JobId, after: Duration) -> Result<(), RegistryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}
