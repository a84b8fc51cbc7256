use std::sync::Arc;

use crate::application::ports::JobRegistry;
use crate::application::services::TransferService;

/// Shared by every handler. Both services write into the same registry, so
/// one status endpoint covers compress and relay jobs.
#[derive(Clone)]
pub struct AppState {
    pub compress_service: Arc<TransferService>,
    pub relay_service: Arc<TransferService>,
    pub job_registry: Arc<dyn JobRegistry>,
}
